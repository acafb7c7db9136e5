//! Export module for fintrack
//!
//! Provides data export in two interchange formats:
//! - CSV: transactions only (spreadsheet-compatible)
//! - JSON: transactions and budgets

pub mod csv;
pub mod json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

pub use self::csv::{export_transactions_csv, CSV_HEADERS};
pub use self::json::{export_full_json, ExportedBudget, ExportedTransaction, LedgerExport};

/// Interchange format for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterchangeFormat {
    /// Tabular, transactions only
    Csv,
    /// Structured, transactions and budgets
    Json,
}

impl InterchangeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for InterchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterchangeFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(LedgerError::Validation(format!(
                "Unknown format '{}' (expected csv or json)",
                other
            ))),
        }
    }
}

/// Write the store to `writer` in the given format
pub fn export_data<W: Write>(
    storage: &Storage,
    format: InterchangeFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        InterchangeFormat::Csv => export_transactions_csv(storage, writer),
        InterchangeFormat::Json => export_full_json(storage, writer),
    }
}

/// Export to a file, replacing it if present
pub fn export_file(storage: &Storage, format: InterchangeFormat, path: &Path) -> LedgerResult<()> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_data(storage, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(format = %format, path = %path.display(), "export complete");
    Ok(())
}
