//! User settings for fintrack
//!
//! Manages user preferences: backup retention, the dashboard's recent
//! transaction count and the suggested category list offered to input forms.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// How many transactions the dashboard lists as recent
    #[serde(default = "default_recent_limit")]
    pub recent_transaction_limit: usize,

    /// Categories offered by input forms. Not enforced by the store.
    #[serde(default = "default_categories")]
    pub suggested_categories: Vec<String>,

    /// Take a backup of the current store before restoring another one
    #[serde(default = "default_true")]
    pub auto_backup_before_restore: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_recent_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_categories() -> Vec<String> {
    [
        "Food",
        "Transportation",
        "Entertainment",
        "Utilities",
        "Healthcare",
        "Shopping",
        "Income",
        "Investment",
        "Other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: BackupRetention::default(),
            recent_transaction_limit: default_recent_limit(),
            suggested_categories: default_categories(),
            auto_backup_before_restore: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_retention.daily_count, 30);
        assert_eq!(settings.backup_retention.monthly_count, 12);
        assert_eq!(settings.recent_transaction_limit, 10);
        assert!(settings.suggested_categories.contains(&"Food".to_string()));
        assert!(settings.auto_backup_before_restore);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.recent_transaction_limit = 5;
        settings.backup_retention.daily_count = 7;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.recent_transaction_limit, 5);
        assert_eq!(loaded.backup_retention.daily_count, 7);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"recent_transaction_limit": 3}"#).unwrap();
        assert_eq!(settings.recent_transaction_limit, 3);
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.suggested_categories.len(), 9);
    }
}
