//! JSON import
//!
//! Reads the structured layout written by the JSON exporter: an object
//! with optional `transactions` and `budgets` arrays. Other keys such as
//! `export_date` are ignored.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::record::{RawBudget, RawTransaction};
use super::ImportBatch;

#[derive(Debug, Default, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    budgets: Vec<Value>,
}

/// Parse a JSON document into validated records.
///
/// The document itself must parse; individual records that are the wrong
/// shape or fail validation are skipped.
pub fn parse_json<R: Read>(reader: R) -> LedgerResult<ImportBatch> {
    let document: JsonDocument = serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Import(format!("Malformed JSON document: {}", e)))?;

    let mut batch = ImportBatch::default();

    for (index, value) in document.transactions.into_iter().enumerate() {
        match decode::<RawTransaction>(value).and_then(|raw| raw.validate()) {
            Ok(input) => batch.transactions.push(input),
            Err(e) => {
                debug!(index, error = %e, "skipping invalid transaction record");
                batch.skipped += 1;
            }
        }
    }

    for (index, value) in document.budgets.into_iter().enumerate() {
        match decode::<RawBudget>(value).and_then(|raw| raw.validate()) {
            Ok(budget) => batch.budgets.push(budget),
            Err(e) => {
                debug!(index, error = %e, "skipping invalid budget record");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

fn decode<T: DeserializeOwned>(value: Value) -> LedgerResult<T> {
    serde_json::from_value(value).map_err(|e| LedgerError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetPeriod;

    #[test]
    fn test_parse_exported_layout() {
        let data = r#"{
            "transactions": [
                {"id": 3, "date": "2025-03-02", "category": "Food", "description": "Lunch",
                 "amount": 12.5, "type": "Expense", "tags": ""},
                {"id": 1, "date": "2025-03-01", "category": "Salary", "description": "",
                 "amount": "2500", "type": "Income", "tags": null}
            ],
            "budgets": [
                {"id": 1, "category": "Food", "amount": 500.0, "period": "Monthly"}
            ],
            "export_date": "2025-03-05T10:00:00"
        }"#;

        let batch = parse_json(data.as_bytes()).unwrap();
        assert_eq!(batch.transactions.len(), 2);
        assert_eq!(batch.transactions[0].amount.cents(), 1250);
        assert_eq!(batch.transactions[1].amount.cents(), 250000);
        assert_eq!(batch.budgets.len(), 1);
        assert_eq!(batch.budgets[0].period, BudgetPeriod::Monthly);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn test_skips_bad_records() {
        let data = r#"{
            "transactions": [
                {"date": "2025-03-02", "category": "Food", "type": "Expense"},
                {"date": 20250302, "category": "Food", "amount": 1, "type": "Expense"},
                "not an object",
                {"date": "2025-03-02", "category": "Food", "amount": 1, "type": "Expense"}
            ],
            "budgets": [
                {"category": "Food", "amount": 0, "period": "Monthly"},
                {"category": "Rent", "amount": 900, "period": "Quarterly"}
            ]
        }"#;

        let batch = parse_json(data.as_bytes()).unwrap();
        assert_eq!(batch.transactions.len(), 1);
        assert!(batch.budgets.is_empty());
        assert_eq!(batch.skipped, 5);
    }

    #[test]
    fn test_missing_sections() {
        let batch = parse_json("{}".as_bytes()).unwrap();
        assert!(batch.transactions.is_empty());
        assert!(batch.budgets.is_empty());
    }

    #[test]
    fn test_malformed_document_fails() {
        let err = parse_json("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));

        let err = parse_json("[1, 2, 3]".as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
