//! CSV Export functionality
//!
//! Writes transactions, newest first, with amounts as plain two-place
//! decimals. Budgets are not part of the CSV layout.

use std::io::Write;

use ::csv::WriterBuilder;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::Storage;

/// Column names in output order
pub const CSV_HEADERS: [&str; 7] = ["ID", "Date", "Category", "Description", "Amount", "Type", "Tags"];

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Tags")]
    tags: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.get(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            category: &txn.category,
            description: &txn.description,
            amount: txn.amount.to_decimal_string(),
            kind: txn.kind.as_str(),
            tags: &txn.tags,
        }
    }
}

/// Export all transactions to CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<()> {
    // Header written by hand so an empty ledger still gets one
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in storage.transactions.get_all()? {
        csv_writer
            .serialize(CsvRow::from(&txn))
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
