//! JSON Export functionality
//!
//! Writes transactions and budgets with amounts as JSON numbers, plus the
//! export timestamp.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetPeriod, Transaction, TransactionType};
use crate::storage::Storage;

/// A transaction as it appears in a JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedTransaction {
    pub id: u64,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub tags: String,
}

impl From<&Transaction> for ExportedTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.get(),
            date: txn.date,
            category: txn.category.clone(),
            description: txn.description.clone(),
            amount: txn.amount.as_f64(),
            kind: txn.kind,
            tags: txn.tags.clone(),
        }
    }
}

/// A budget as it appears in a JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedBudget {
    pub id: u64,
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
}

impl From<&Budget> for ExportedBudget {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id.get(),
            category: budget.category.clone(),
            amount: budget.amount.as_f64(),
            period: budget.period,
        }
    }
}

/// Full JSON export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Newest first, as listed
    pub transactions: Vec<ExportedTransaction>,

    /// Ascending by category
    pub budgets: Vec<ExportedBudget>,

    pub export_date: DateTime<Utc>,
}

impl LedgerExport {
    /// Build an export document from storage
    pub fn from_storage(storage: &Storage) -> LedgerResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;

        Ok(Self {
            transactions: transactions.iter().map(ExportedTransaction::from).collect(),
            budgets: budgets.iter().map(ExportedBudget::from).collect(),
            export_date: Utc::now(),
        })
    }
}

/// Export transactions and budgets as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<()> {
    let export = LedgerExport::from_storage(storage)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Money, TransactionInput};
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_export_layout() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        storage
            .transactions
            .insert(
                TransactionInput::new(
                    NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
                    "Food",
                    Money::from_cents(1999),
                    TransactionType::Expense,
                )
                .with_tags("groceries"),
            )
            .unwrap();
        storage
            .budgets
            .upsert("Food", Money::from_cents(50000), BudgetPeriod::Monthly)
            .unwrap();

        let mut out = Vec::new();
        export_full_json(&storage, &mut out).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();

        let txn = &doc["transactions"][0];
        assert_eq!(txn["id"], 1);
        assert_eq!(txn["date"], "2025-05-06");
        assert_eq!(txn["amount"].as_f64().unwrap(), 19.99);
        assert_eq!(txn["type"], "Expense");
        assert_eq!(txn["tags"], "groceries");

        let budget = &doc["budgets"][0];
        assert_eq!(budget["category"], "Food");
        assert_eq!(budget["amount"].as_f64().unwrap(), 500.0);
        assert_eq!(budget["period"], "Monthly");

        assert!(doc["export_date"].is_string());
    }
}
