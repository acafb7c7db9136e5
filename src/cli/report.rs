//! CLI commands for reports

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::TransactionType;
use crate::reports::{CategoryReport, DashboardReport, TotalsReport, TrendReport};
use crate::services::today;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Balance, this month's figures and recent transactions
    Dashboard {
        /// Number of recent transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Totals per category
    Categories {
        /// Income or Expense
        #[arg(short = 'k', long = "type", default_value = "Expense")]
        kind: String,
    },

    /// Income and expense per month
    Trend,

    /// Income versus expense over the whole ledger
    Totals,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let output = match cmd {
        ReportCommands::Dashboard { limit } => {
            let limit = limit.unwrap_or(settings.recent_transaction_limit);
            DashboardReport::generate(storage, today(), limit)?.format_terminal()
        }
        ReportCommands::Categories { kind } => {
            let kind = kind
                .parse::<TransactionType>()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            CategoryReport::generate(storage, kind)?.format_terminal()
        }
        ReportCommands::Trend => TrendReport::generate(storage)?.format_terminal(),
        ReportCommands::Totals => TotalsReport::generate(storage)?.format_terminal(),
    };

    print!("{}", output);
    Ok(())
}
