//! Backup restoration for fintrack
//!
//! Restore is a destructive full replace. The archive is read and checked
//! in full before the store file is touched, and the store file is then
//! swapped atomically, so a failed restore leaves the prior store intact.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{read_json_required, write_json_atomic, Storage};

use super::manager::{BackupArchive, BACKUP_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: LedgerPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Replace the store with the contents of a backup file and reload it
    pub fn restore_from_file(&self, storage: &Storage, backup_path: &Path) -> LedgerResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        check_archive(&archive)?;

        write_json_atomic(self.paths.ledger_file(), &archive.ledger)?;
        storage.load_all()?;

        let result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            transactions: archive.ledger.transactions.len(),
            budgets: archive.ledger.budgets.len(),
        };
        info!(path = %backup_path.display(), "{}", result.summary());
        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> LedgerResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        let problem = check_archive(&archive).err().map(|e| e.to_string());

        Ok(ValidationResult {
            is_valid: problem.is_none(),
            problem,
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            transaction_count: archive.ledger.transactions.len(),
            budget_count: archive.ledger.budgets.len(),
        })
    }
}

fn read_archive(path: &Path) -> LedgerResult<BackupArchive> {
    read_json_required(path)
}

/// Reject archives the store could not hold
fn check_archive(archive: &BackupArchive) -> LedgerResult<()> {
    if archive.schema_version > BACKUP_SCHEMA_VERSION {
        return Err(LedgerError::Storage(format!(
            "Backup schema version {} is newer than supported version {}",
            archive.schema_version, BACKUP_SCHEMA_VERSION
        )));
    }

    for txn in &archive.ledger.transactions {
        txn.to_input().validate().map_err(|e| {
            LedgerError::Storage(format!("Backup holds invalid transaction {}: {}", txn.id, e))
        })?;
    }

    let mut categories = std::collections::HashSet::new();
    for budget in &archive.ledger.budgets {
        budget.validate().map_err(|e| {
            LedgerError::Storage(format!("Backup holds invalid budget {}: {}", budget.category, e))
        })?;
        if !categories.insert(budget.category.as_str()) {
            return Err(LedgerError::Storage(format!(
                "Backup holds two budgets for category {}",
                budget.category
            )));
        }
    }

    Ok(())
}

/// Result of a restore operation
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// Schema version of the restored backup
    pub schema_version: u32,
    /// Date the backup was created
    pub backup_date: DateTime<Utc>,
    pub transactions: usize,
    pub budgets: usize,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} transactions and {} budgets from backup taken {}",
            self.transactions,
            self.budgets,
            self.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Result of validating a backup
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Why the backup would be rejected, if it would
    pub problem: Option<String>,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub transaction_count: usize,
    pub budget_count: usize,
}
