//! Storage initialization
//!
//! Handles first-run setup: directories, an empty store file and the
//! default settings file.

use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;

use super::file_io::write_json_atomic;
use super::StoreFile;

/// Initialize storage for a fresh installation.
///
/// Existing files are left alone, so this is safe to call on every start.
pub fn initialize_storage(paths: &LedgerPaths) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if !paths.ledger_file().exists() {
        write_json_atomic(paths.ledger_file(), &StoreFile::default())?;
        info!(path = %paths.ledger_file().display(), "created empty store");
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json_required;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let file: StoreFile = read_json_required(paths.ledger_file()).unwrap();
        assert_eq!(file, StoreFile::default());
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn test_initialize_keeps_existing_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut file = StoreFile::default();
        file.next_transaction_id = crate::models::TransactionId::new(42);
        write_json_atomic(paths.ledger_file(), &file).unwrap();

        initialize_storage(&paths).unwrap();

        let loaded: StoreFile = read_json_required(paths.ledger_file()).unwrap();
        assert_eq!(loaded.next_transaction_id.get(), 42);
    }
}
