//! Category Report
//!
//! Totals per category for one transaction type, largest first, with each
//! category's share of the whole.

use crate::error::LedgerResult;
use crate::models::{Money, TransactionType};
use crate::services::{checked_total, SummaryService};
use crate::storage::Storage;

/// One category's total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Percentage of the report total
    pub percentage: f64,
}

/// Category Report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// Transaction type the report covers
    pub kind: TransactionType,
    /// Largest total first; ties ascending by category
    pub categories: Vec<CategoryShare>,
    /// Sum over all categories
    pub total: Money,
}

impl CategoryReport {
    /// Generate a breakdown for one transaction type
    pub fn generate(storage: &Storage, kind: TransactionType) -> LedgerResult<Self> {
        let breakdown = SummaryService::new(storage).category_breakdown(kind)?;
        let total = checked_total(breakdown.values().copied())?;

        let mut categories: Vec<CategoryShare> = breakdown
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                total: amount,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.as_f64() / total.as_f64() * 100.0
                },
            })
            .collect();

        // BTreeMap order is already ascending by name; the sort is stable
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Self {
            kind,
            categories,
            total,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} by Category\n", self.kind));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str(&format!("No {} recorded.\n", self.kind.as_str().to_lowercase()));
            return output;
        }

        output.push_str(&format!("{:<30} {:>14} {:>10}\n", "Category", "Total", "Share"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for share in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>14} {:>9.1}%\n",
                share.category,
                share.total.to_string(),
                share.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>14}\n", "TOTAL", self.total.to_string()));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::TransactionInput;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, category: &str, cents: i64, kind: TransactionType) {
        storage
            .transactions
            .insert(TransactionInput::new(
                NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
                category,
                Money::from_cents(cents),
                kind,
            ))
            .unwrap();
    }

    #[test]
    fn test_expense_breakdown() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "Food", 3000, TransactionType::Expense);
        add(&storage, "Rent", 6000, TransactionType::Expense);
        add(&storage, "Food", 1000, TransactionType::Expense);
        add(&storage, "Salary", 90000, TransactionType::Income);

        let report = CategoryReport::generate(&storage, TransactionType::Expense).unwrap();

        assert_eq!(report.total, Money::from_cents(10000));
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, "Rent");
        assert!((report.categories[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!(report.categories[1].total, Money::from_cents(4000));
    }

    #[test]
    fn test_terminal_format() {
        let (_temp_dir, storage) = create_test_storage();

        let output = CategoryReport::generate(&storage, TransactionType::Income)
            .unwrap()
            .format_terminal();
        assert!(output.contains("No income recorded."));

        add(&storage, "Salary", 90000, TransactionType::Income);
        let output = CategoryReport::generate(&storage, TransactionType::Income)
            .unwrap()
            .format_terminal();
        assert!(output.contains("Income by Category"));
        assert!(output.contains("Salary"));
        assert!(output.contains("100.0%"));
    }
}
