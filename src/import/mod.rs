//! Import module for fintrack
//!
//! Loads transactions (CSV and JSON) and budgets (JSON only) into the
//! store. Each record is validated on its own and skipped if invalid; the
//! admitted records are committed together in one store write.

pub mod csv;
pub mod json;
pub mod record;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::export::InterchangeFormat;
use crate::models::TransactionInput;
use crate::storage::Storage;

pub use record::{BudgetRecord, RawAmount, RawBudget, RawTransaction};

/// Records that passed validation, ready to be written
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub transactions: Vec<TransactionInput>,
    pub budgets: Vec<BudgetRecord>,
    /// Records dropped during parsing or validation
    pub skipped: usize,
}

/// How many records an import admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportCounts {
    pub transactions: usize,
    pub budgets: usize,
    pub skipped: usize,
}

/// Parse a document in the given format and commit the admitted records.
///
/// A document that cannot be parsed at all returns an error and leaves the
/// store unchanged.
pub fn import_data<R: Read>(
    storage: &Storage,
    format: InterchangeFormat,
    reader: R,
) -> LedgerResult<ImportCounts> {
    let batch = match format {
        InterchangeFormat::Csv => csv::parse_csv(reader)?,
        InterchangeFormat::Json => json::parse_json(reader)?,
    };
    apply_batch(storage, batch)
}

/// Import from a file
pub fn import_file(
    storage: &Storage,
    format: InterchangeFormat,
    path: &Path,
) -> LedgerResult<ImportCounts> {
    let file = File::open(path)
        .map_err(|e| LedgerError::Import(format!("Failed to open {}: {}", path.display(), e)))?;
    import_data(storage, format, BufReader::new(file))
}

/// Write a validated batch into the store with a single commit
pub fn apply_batch(storage: &Storage, batch: ImportBatch) -> LedgerResult<ImportCounts> {
    let counts = ImportCounts {
        transactions: batch.transactions.len(),
        budgets: batch.budgets.len(),
        skipped: batch.skipped,
    };

    if let Err(e) = stage_batch(storage, batch) {
        warn!(error = %e, "import failed, discarding staged records");
        if let Err(reload) = storage.load_all() {
            warn!(error = %reload, "rollback reload failed");
        }
        return Err(e);
    }
    storage.commit()?;

    info!(
        transactions = counts.transactions,
        budgets = counts.budgets,
        skipped = counts.skipped,
        "import complete"
    );
    Ok(counts)
}

fn stage_batch(storage: &Storage, batch: ImportBatch) -> LedgerResult<()> {
    for input in batch.transactions {
        storage.transactions.insert(input)?;
    }
    for budget in batch.budgets {
        storage
            .budgets
            .upsert(&budget.category, budget.amount, budget.period)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::services::{BudgetService, TransactionFilter, TransactionService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_import_json_counts() {
        let (_temp_dir, storage) = create_test_storage();
        let data = r#"{
            "transactions": [
                {"date": "2025-03-02", "category": "Food", "amount": 10, "type": "Expense"},
                {"date": "2025-03-02", "category": "Food", "type": "Expense"}
            ],
            "budgets": [{"category": "Food", "amount": 300, "period": "weekly"}]
        }"#;

        let counts = import_data(&storage, InterchangeFormat::Json, data.as_bytes()).unwrap();
        assert_eq!(counts.transactions, 1);
        assert_eq!(counts.budgets, 1);
        assert_eq!(counts.skipped, 1);

        let service = TransactionService::new(&storage);
        assert_eq!(service.list(&TransactionFilter::new()).unwrap().len(), 1);
        assert!(BudgetService::new(&storage).get("Food").unwrap().is_some());
    }

    #[test]
    fn test_import_assigns_fresh_ids() {
        let (_temp_dir, storage) = create_test_storage();
        let data = "ID,Date,Category,Amount,Type\n500,2025-03-02,Food,1,Expense\n";

        import_data(&storage, InterchangeFormat::Csv, data.as_bytes()).unwrap();
        let all = TransactionService::new(&storage)
            .list(&TransactionFilter::new())
            .unwrap();
        assert_eq!(all[0].id.get(), 1);
    }

    #[test]
    fn test_malformed_document_leaves_store_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(TransactionInput::from_fields("2025-01-01", "Food", None, "5", "Expense", None).unwrap())
            .unwrap();

        let err = import_data(&storage, InterchangeFormat::Json, "{\"transactions\": [".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_batch_discards_staged_records() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(TransactionInput::from_fields("2025-01-01", "Food", None, "5", "Expense", None).unwrap())
            .unwrap();

        // The budget fails inside the store after the transaction was staged
        let batch = ImportBatch {
            transactions: vec![TransactionInput::from_fields(
                "2025-01-02", "Food", None, "7", "Expense", None,
            )
            .unwrap()],
            budgets: vec![BudgetRecord {
                category: "Food".into(),
                amount: crate::models::Money::zero(),
                period: crate::models::BudgetPeriod::Monthly,
            }],
            skipped: 0,
        };

        assert!(apply_batch(&storage, batch).unwrap_err().is_validation());
        assert_eq!(service.count().unwrap(), 1);
        assert!(BudgetService::new(&storage).get("Food").unwrap().is_none());
    }

    #[test]
    fn test_import_file_missing() {
        let (temp_dir, storage) = create_test_storage();
        let path = temp_dir.path().join("absent.csv");
        assert!(import_file(&storage, InterchangeFormat::Csv, &path).is_err());
    }
}
