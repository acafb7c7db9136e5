//! Backup manager for fintrack
//!
//! Writes point-in-time archives of the whole store, either to a chosen
//! path or into the managed backup directory with rolling retention.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{write_json_atomic, Storage, StoreFile};

/// Current archive layout version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup in the managed directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created (from the filename)
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// First backup of its calendar month; kept under the monthly quota
    pub is_monthly: bool,
}

/// Backup archive format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version of the archive layout
    pub schema_version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Both tables and their ID counters, exactly as stored
    pub ledger: StoreFile,
}

impl BackupArchive {
    /// Capture the current store contents
    pub fn capture(storage: &Storage) -> LedgerResult<Self> {
        Ok(Self {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: Utc::now(),
            ledger: storage.snapshot()?,
        })
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LedgerPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    /// Write a copy of the whole store to `destination`.
    ///
    /// The file is written atomically; an existing file there is replaced.
    pub fn snapshot(&self, storage: &Storage, destination: &Path) -> LedgerResult<BackupArchive> {
        let archive = BackupArchive::capture(storage)?;
        write_json_atomic(destination, &archive)?;

        info!(
            path = %destination.display(),
            transactions = archive.ledger.transactions.len(),
            budgets = archive.ledger.budgets.len(),
            "wrote snapshot"
        );
        Ok(archive)
    }

    /// Create a timestamped backup in the managed directory.
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self, storage: &Storage) -> LedgerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LedgerError::Storage(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(filename);

        self.snapshot(storage, &backup_path)?;
        Ok(backup_path)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(
        &self,
        storage: &Storage,
    ) -> LedgerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(storage)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// List managed backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            LedgerError::Storage(format!("Failed to read backup directory: {}", e))
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LedgerError::Storage(format!("Failed to read directory entry: {}", e))
            })?;
            if let Some(parsed) = parse_backup_entry(&entry.path()) {
                found.push(parsed);
            }
        }

        // Oldest first to find the first backup of each month
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut months_seen = HashSet::new();
        for backup in &mut found {
            let key = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = months_seen.insert(key);
        }

        found.reverse();
        Ok(found)
    }

    /// Delete backups beyond the retention quotas. Returns deleted paths.
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to delete old backup {}: {}",
                    backup.filename, e
                ))
            })?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(count = deleted.len(), "pruned old backups");
        }
        Ok(deleted)
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> LedgerResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> LedgerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_entry(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS` with an optional `-mmm` millisecond suffix
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis.checked_mul(1_000_000)?)?;

    Some(date.and_time(time).and_utc())
}
