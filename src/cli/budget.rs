//! Budget CLI commands
//!
//! Implements CLI commands for setting budgets and checking spending
//! against them.

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::reports::BudgetOverviewReport;
use crate::services::{today, BudgetService, SummaryService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create or replace the budget for a category
    Set {
        /// Category name
        category: String,
        /// Amount (e.g., "500" or "500.00")
        amount: String,
        /// Weekly, Monthly or Yearly
        #[arg(short, long, default_value = "Monthly")]
        period: String,
    },

    /// List all budgets
    List,

    /// Remove the budget for a category
    Remove {
        /// Category name
        category: String,
    },

    /// Show spending against budgets
    Status {
        /// Only this category
        category: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> LedgerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let budget = service.set_from_fields(&category, &amount, &period)?;
            println!(
                "Set {} budget for '{}': {}",
                budget.period, budget.category, budget.amount
            );
        }

        BudgetCommands::List => {
            let budgets = service.list()?;
            if budgets.is_empty() {
                println!("No budgets set.");
                println!("Create one with: fintrack budget set <category> <amount>");
                return Ok(());
            }

            println!("{:<5} {:<24} {:>12}  {}", "ID", "Category", "Amount", "Period");
            println!("{}", "-".repeat(52));
            for budget in &budgets {
                println!(
                    "{:<5} {:<24} {:>12}  {}",
                    budget.id.to_string(),
                    budget.category,
                    budget.amount.to_string(),
                    budget.period
                );
            }
        }

        BudgetCommands::Remove { category } => {
            let removed = service.remove(&category)?;
            println!("Removed budget for '{}'", removed.category);
        }

        BudgetCommands::Status { category: None } => {
            let report = BudgetOverviewReport::generate(storage, today())?;
            print!("{}", report.format_terminal());
        }

        BudgetCommands::Status {
            category: Some(category),
        } => {
            let budget = service
                .get(&category)?
                .ok_or_else(|| LedgerError::budget_not_found(category.as_str()))?;
            let status = SummaryService::new(storage).budget_status(&budget)?;

            println!("Budget: {} ({})", budget.category, budget.period);
            println!("  Since:     {}", status.window_start);
            println!("  Budgeted:  {}", budget.amount);
            println!("  Spent:     {}", status.spent);
            println!("  Remaining: {}", status.remaining);
            println!("  Status:    {}", status.status);
        }
    }

    Ok(())
}
