//! Trend and income-versus-expense reports

use crate::error::LedgerResult;
use crate::models::Money;
use crate::services::{MonthlyTrendEntry, SummaryService, TypeTotals};
use crate::storage::Storage;

/// Monthly income and expense, oldest month first
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub months: Vec<MonthlyTrendEntry>,
}

impl TrendReport {
    /// Generate the monthly trend over the whole ledger
    pub fn generate(storage: &Storage) -> LedgerResult<Self> {
        Ok(Self {
            months: SummaryService::new(storage).monthly_trend()?,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Trend\n");
        output.push_str(&"=".repeat(54));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions yet.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(54));
        output.push('\n');

        for entry in &self.months {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                entry.month.to_string(),
                entry.income.to_string(),
                entry.expense.to_string(),
                entry.net().to_string()
            ));
        }

        output
    }
}

/// Ledger-wide income versus expense
#[derive(Debug, Clone)]
pub struct TotalsReport {
    pub totals: TypeTotals,
}

impl TotalsReport {
    pub fn generate(storage: &Storage) -> LedgerResult<Self> {
        Ok(Self {
            totals: SummaryService::new(storage).totals_by_type()?,
        })
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.totals.income - self.totals.expense
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Income vs Expenses\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Income:", self.totals.income.to_string()));
        output.push_str(&format!("{:<20} {:>19}\n", "Expenses:", self.totals.expense.to_string()));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>19}\n", "Net:", self.net().to_string()));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{TransactionInput, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, month: u32, cents: i64, kind: TransactionType) {
        storage
            .transactions
            .insert(TransactionInput::new(
                NaiveDate::from_ymd_opt(2025, month, 5).unwrap(),
                "Misc",
                Money::from_cents(cents),
                kind,
            ))
            .unwrap();
    }

    #[test]
    fn test_trend_report() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, 3, 5000, TransactionType::Expense);
        add(&storage, 1, 100000, TransactionType::Income);

        let report = TrendReport::generate(&storage).unwrap();
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].month.to_string(), "2025-01");
        assert!(report.months[1].income.is_zero());

        let output = report.format_terminal();
        assert!(output.contains("2025-01"));
        assert!(output.contains("-$50.00"));
    }

    #[test]
    fn test_totals_report() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, 1, 100000, TransactionType::Income);
        add(&storage, 2, 40000, TransactionType::Expense);

        let report = TotalsReport::generate(&storage).unwrap();
        assert_eq!(report.net(), Money::from_cents(60000));

        let output = report.format_terminal();
        assert!(output.contains("Income vs Expenses"));
        assert!(output.contains("$600.00"));
    }

    #[test]
    fn test_empty_trend() {
        let (_temp_dir, storage) = create_test_storage();
        let output = TrendReport::generate(&storage).unwrap().format_terminal();
        assert!(output.contains("No transactions yet."));
    }
}
