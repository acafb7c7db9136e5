use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_backup_command, handle_budget_command, handle_export_command, handle_import_command,
    handle_report_command, handle_transaction_command,
};
use fintrack::config::{LedgerPaths, Settings};
use fintrack::export::InterchangeFormat;
use fintrack::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "fintrack",
    author,
    version,
    about = "Personal ledger and budget tracker",
    long_about = "fintrack records income and expense transactions, tracks spending \
                  against per-category budgets, and reports balances and trends \
                  from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(fintrack::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Dashboard and summary reports
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Export data to a CSV or JSON file
    Export {
        #[arg(value_enum)]
        format: InterchangeFormat,
        /// Output file path
        output: PathBuf,
    },

    /// Import data from a CSV or JSON file
    Import {
        #[arg(value_enum)]
        format: InterchangeFormat,
        /// Input file path
        file: PathBuf,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(fintrack::cli::BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    fintrack::init_tracing();
    let cli = Cli::parse();

    // Initialize paths, settings and storage
    let paths = LedgerPaths::new()?;
    initialize_storage(&paths)?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export { format, output }) => {
            handle_export_command(&storage, format, &output)?
        }
        Some(Commands::Import { format, file }) => handle_import_command(&storage, format, &file)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, &settings, cmd)?,
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Store file:       {}", paths.ledger_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Backup retention:    {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            println!("  Recent transactions: {}", settings.recent_transaction_limit);
            println!(
                "  Backup before restore: {}",
                settings.auto_backup_before_restore
            );
            println!(
                "  Suggested categories: {}",
                settings.suggested_categories.join(", ")
            );
        }
        None => {
            println!("fintrack - personal ledger and budget tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
