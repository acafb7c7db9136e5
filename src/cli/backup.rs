//! Backup CLI commands
//!
//! Implements CLI commands for snapshots, the managed backup directory
//! and restore.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup in the backup directory
    Create,

    /// Write a backup to a chosen path
    Snapshot {
        /// Destination file
        destination: PathBuf,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replace all data with the contents of a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Check a backup without restoring it
    Info {
        /// Backup filename or path
        backup: String,
    },

    /// Delete old backups according to retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> LedgerResult<()> {
    let paths = storage.paths().clone();
    let manager = BackupManager::new(&paths, settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention(storage)?;
            println!("Backup created: {}", display_name(&backup_path));
            println!("Location: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::Snapshot { destination } => {
            let archive = manager.snapshot(storage, &destination)?;
            println!(
                "Snapshot written to {} ({} transactions, {} budgets)",
                destination.display(),
                archive.ledger.transactions.len(),
                archive.ledger.budgets.len()
            );
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: fintrack backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };

                if verbose {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}){}",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                        monthly_marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let restore_manager = RestoreManager::new(paths);
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "Contents: {} transactions, {} budgets",
                validation.transaction_count, validation.budget_count
            );
            println!();

            if let Some(problem) = validation.problem {
                return Err(LedgerError::Storage(problem));
            }

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  fintrack backup restore {} --force", backup);
                return Ok(());
            }

            if settings.auto_backup_before_restore {
                let pre_restore = manager.create_backup(storage)?;
                println!("Pre-restore backup saved: {}", display_name(&pre_restore));
            }

            let result = restore_manager.restore_from_file(storage, &backup_path)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let validation = RestoreManager::new(paths).validate_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Schema version: {}", validation.schema_version);
            println!("Transactions: {}", validation.transaction_count);
            println!("Budgets: {}", validation.budget_count);
            match validation.problem {
                None => println!("Status: Valid"),
                Some(problem) => println!("Status: Invalid ({})", problem),
            }
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let retention = &settings.backup_retention;

            let (monthly, daily): (Vec<_>, Vec<_>) = backups.iter().partition(|b| b.is_monthly);
            let daily_to_delete = daily.len().saturating_sub(retention.daily_count as usize);
            let monthly_to_delete = monthly
                .len()
                .saturating_sub(retention.monthly_count as usize);
            let total_to_delete = daily_to_delete + monthly_to_delete;

            if total_to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Current retention policy: {} daily, {} monthly",
                    retention.daily_count, retention.monthly_count
                );
                return Ok(());
            }

            println!(
                "To be deleted: {} daily, {} monthly ({} total)",
                daily_to_delete, monthly_to_delete, total_to_delete
            );

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  fintrack backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> LedgerResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| LedgerError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    if let Some(info) = manager.get_backup(backup)? {
        return Ok(info.path);
    }

    let with_ext = manager.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(LedgerError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes < 1 {
        return format!("{}s", duration.num_seconds().max(0));
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        format!("{}d", days)
    } else {
        format!("{}mo", days / 30)
    }
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
