//! CLI command for data export

use std::path::Path;

use crate::error::LedgerResult;
use crate::export::{export_file, InterchangeFormat};
use crate::storage::Storage;

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    format: InterchangeFormat,
    output: &Path,
) -> LedgerResult<()> {
    export_file(storage, format, output)?;

    let transactions = storage.transactions.count()?;
    match format {
        InterchangeFormat::Csv => {
            println!("Exported {} transactions to {}", transactions, output.display());
        }
        InterchangeFormat::Json => {
            println!(
                "Exported {} transactions and {} budgets to {}",
                transactions,
                storage.budgets.count()?,
                output.display()
            );
        }
    }
    Ok(())
}
