//! Backup system for fintrack
//!
//! Provides whole-store snapshots, a managed backup directory with rolling
//! retention, and restore.
//!
//! # Architecture
//!
//! - `BackupManager`: writes snapshots and manages the backup directory
//! - `RestoreManager`: validates and restores backups
//!
//! # Backup Format
//!
//! Backups are JSON files with the following structure:
//! - `schema_version`: archive layout version
//! - `created_at`: timestamp when the backup was taken
//! - `ledger`: the store file contents (both tables and ID counters)
//!
//! # Retention Policy
//!
//! By default the managed directory keeps:
//! - 30 daily backups
//! - 12 monthly backups (first backup of each month)
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::backup::{BackupManager, RestoreManager};
//! use fintrack::config::{LedgerPaths, BackupRetention};
//! use fintrack::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let storage = Storage::open(paths.clone())?;
//! let backup_manager = BackupManager::new(&paths, BackupRetention::default());
//!
//! let backup_path = backup_manager.create_backup(&storage)?;
//! backup_manager.enforce_retention()?;
//!
//! // Later, restore from backup
//! let result = RestoreManager::new(paths).restore_from_file(&storage, &backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
