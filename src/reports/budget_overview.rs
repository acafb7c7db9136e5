//! Budget Overview Report
//!
//! Every budget with its period window, the amount spent in that window,
//! what remains and the status text.

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::Money;
use crate::services::{checked_total, BudgetStatus, SummaryService};
use crate::storage::Storage;

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    /// Reference date the windows were measured from
    pub as_of: NaiveDate,
    /// One row per budget, ascending by category
    pub rows: Vec<BudgetStatus>,
    /// Grand total budgeted
    pub total_budgeted: Money,
    /// Grand total spent
    pub total_spent: Money,
    /// Grand total remaining
    pub total_remaining: Money,
}

impl BudgetOverviewReport {
    /// Generate the overview as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate) -> LedgerResult<Self> {
        let rows = SummaryService::with_today(storage, today).budget_overview()?;

        let total_budgeted = checked_total(rows.iter().map(|r| r.budget.amount))?;
        let total_spent = checked_total(rows.iter().map(|r| r.spent))?;
        let total_remaining = checked_total(rows.iter().map(|r| r.remaining))?;

        Ok(Self {
            as_of: today,
            rows,
            total_budgeted,
            total_spent,
            total_remaining,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Overview - {}\n", self.as_of));
        output.push_str(&"=".repeat(88));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:<8} {:<11} {:>12} {:>12} {:>12}  {}\n",
            "Category", "Period", "Since", "Budgeted", "Spent", "Remaining", "Status"
        ));
        output.push_str(&"-".repeat(88));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:<8} {:<11} {:>12} {:>12} {:>12}  {}\n",
                row.budget.category,
                row.budget.period.as_str(),
                row.window_start.to_string(),
                row.budget.amount.to_string(),
                row.spent.to_string(),
                row.remaining.to_string(),
                row.status
            ));
        }

        output.push_str(&"-".repeat(88));
        output.push('\n');
        output.push_str(&format!(
            "{:<41} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            self.total_budgeted.to_string(),
            self.total_spent.to_string(),
            self.total_remaining.to_string()
        ));

        output
    }

    /// Get count of budgets over their limit
    pub fn over_budget_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_over_budget()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{BudgetPeriod, TransactionInput, TransactionType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn setup_test_data(storage: &Storage) -> NaiveDate {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

        storage
            .budgets
            .upsert("Food", Money::from_cents(50000), BudgetPeriod::Monthly)
            .unwrap();
        storage
            .budgets
            .upsert("Fun", Money::from_cents(5000), BudgetPeriod::Weekly)
            .unwrap();

        for (day, category, cents) in [(3, "Food", 10000), (18, "Fun", 8000), (2, "Fun", 9999)] {
            storage
                .transactions
                .insert(TransactionInput::new(
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    category,
                    Money::from_cents(cents),
                    TransactionType::Expense,
                ))
                .unwrap();
        }

        today
    }

    #[test]
    fn test_generate_report() {
        let (_temp_dir, storage) = create_test_storage();
        let today = setup_test_data(&storage);

        let report = BudgetOverviewReport::generate(&storage, today).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].budget.category, "Food");
        assert_eq!(report.rows[0].status, "80.0% Left");
        // Jan 2 is outside the rolling week
        assert_eq!(report.rows[1].spent, Money::from_cents(8000));
        assert!(report.rows[1].is_over_budget());

        assert_eq!(report.total_budgeted, Money::from_cents(55000));
        assert_eq!(report.total_spent, Money::from_cents(18000));
        assert_eq!(report.total_remaining, Money::from_cents(37000));
        assert_eq!(report.over_budget_count(), 1);
    }

    #[test]
    fn test_terminal_format() {
        let (_temp_dir, storage) = create_test_storage();
        let today = setup_test_data(&storage);

        let output = BudgetOverviewReport::generate(&storage, today)
            .unwrap()
            .format_terminal();

        assert!(output.contains("Budget Overview"));
        assert!(output.contains("Food"));
        assert!(output.contains("Over Budget"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_no_budgets() {
        let (_temp_dir, storage) = create_test_storage();
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

        let report = BudgetOverviewReport::generate(&storage, today).unwrap();
        assert!(report.rows.is_empty());
        assert!(report.total_budgeted.is_zero());
        assert!(report.format_terminal().contains("No budgets set."));
    }
}
