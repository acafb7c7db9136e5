//! CSV import
//!
//! Reads the tabular transaction layout written by the CSV exporter.
//! Columns are found by header name (case-sensitive); missing optional
//! columns and extra columns are fine. CSV files carry no budgets.

use std::io::Read;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::record::{RawAmount, RawTransaction};
use super::ImportBatch;

/// One row keyed by the exported header names
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Amount")]
    amount: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Tags")]
    tags: Option<String>,
}

impl From<CsvRow> for RawTransaction {
    fn from(row: CsvRow) -> Self {
        Self {
            date: row.date,
            category: row.category,
            description: row.description,
            amount: row.amount.map(RawAmount::Text),
            kind: row.kind,
            tags: row.tags,
        }
    }
}

/// Parse a CSV document into validated records.
///
/// A header that cannot be read fails the whole document. Rows that cannot
/// be decoded or validated are skipped.
pub fn parse_csv<R: Read>(reader: R) -> LedgerResult<ImportBatch> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(format!("Unreadable CSV header: {}", e)))?
        .clone();

    let mut batch = ImportBatch::default();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Data rows start on line 2
        let line = index + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                debug!(line, error = %e, "skipping unreadable CSV row");
                batch.skipped += 1;
                continue;
            }
        };

        match RawTransaction::from(row).validate() {
            Ok(input) => batch.transactions.push(input),
            Err(e) => {
                debug!(line, error = %e, "skipping invalid CSV row");
                batch.skipped += 1;
            }
        }
    }

    debug!(
        columns = headers.len(),
        admitted = batch.transactions.len(),
        skipped = batch.skipped,
        "parsed CSV document"
    );
    Ok(batch)
}
