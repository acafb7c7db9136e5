//! CLI command handler for import
//!
//! Invalid records are skipped and counted; a document that cannot be
//! read at all fails without touching the store.

use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::export::InterchangeFormat;
use crate::import::import_file;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    format: InterchangeFormat,
    file: &Path,
) -> LedgerResult<()> {
    if !file.exists() {
        return Err(LedgerError::Import(format!("File not found: {}", file.display())));
    }

    let counts = import_file(storage, format, file)?;

    println!("Import from {}", file.display());
    println!("{}", "=".repeat(40));
    println!("  Transactions imported: {}", counts.transactions);
    println!("  Budgets imported:      {}", counts.budgets);
    println!("  Records skipped:       {}", counts.skipped);
    Ok(())
}
