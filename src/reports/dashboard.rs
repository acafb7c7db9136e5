//! Dashboard Report
//!
//! The at-a-glance view: overall balance, this month's income and
//! expense, the savings rate and the most recent transactions.

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::{Money, Month, Transaction};
use crate::services::SummaryService;
use crate::storage::Storage;

/// Dashboard Report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Reference date the report was computed for
    pub as_of: NaiveDate,
    /// Month the income, expense and savings figures cover
    pub month: Month,
    /// Total income minus total expense over the whole ledger
    pub balance: Money,
    pub monthly_income: Money,
    pub monthly_expense: Money,
    /// Percentage of the month's income not spent
    pub savings_rate: f64,
    /// Newest first
    pub recent: Vec<Transaction>,
}

impl DashboardReport {
    /// Generate the dashboard as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate, recent_limit: usize) -> LedgerResult<Self> {
        let summary = SummaryService::with_today(storage, today);
        let month = Month::of(today);

        Ok(Self {
            as_of: today,
            month,
            balance: summary.total_balance()?,
            monthly_income: summary.monthly_income(month)?,
            monthly_expense: summary.monthly_expense(month)?,
            savings_rate: summary.savings_rate(month)?,
            recent: summary.recent_transactions(recent_limit)?,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.as_of));
        output.push_str(&"=".repeat(70));
        output.push('\n');

        output.push_str(&format!("{:<28} {:>14}\n", "Total Balance:", self.balance.to_string()));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            format!("Income ({}):", self.month),
            self.monthly_income.to_string()
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            format!("Expenses ({}):", self.month),
            self.monthly_expense.to_string()
        ));
        output.push_str(&format!("{:<28} {:>13.1}%\n", "Savings Rate:", self.savings_rate));

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');

        if self.recent.is_empty() {
            output.push_str("  No transactions yet.\n");
            return output;
        }

        for txn in &self.recent {
            output.push_str(&format!(
                "  {:<5} {}  {:<18} {:<8} {:>12}\n",
                txn.id.to_string(),
                txn.date,
                txn.category,
                txn.kind.as_str(),
                txn.amount.to_string()
            ));
        }

        output
    }
}
