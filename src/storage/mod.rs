//! Storage layer for fintrack
//!
//! Both tables live in one JSON store file that is rewritten atomically
//! on every mutation. A failed write leaves the file untouched and the
//! in-memory tables are reloaded from it.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{Budget, BudgetId, Transaction, TransactionId};

/// On-disk layout of the store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default = "first_transaction_id")]
    pub next_transaction_id: TransactionId,

    #[serde(default = "first_budget_id")]
    pub next_budget_id: BudgetId,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

fn first_transaction_id() -> TransactionId {
    TransactionId::new(1)
}

fn first_budget_id() -> BudgetId {
    BudgetId::new(1)
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_transaction_id: first_transaction_id(),
            next_budget_id: first_budget_id(),
            transactions: Vec::new(),
            budgets: Vec::new(),
        }
    }
}

/// Main storage coordinator that provides access to both tables
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance. Tables start empty until `load_all`.
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(),
            budgets: BudgetRepository::new(),
            paths,
        })
    }

    /// Create storage and load the store file in one step
    pub fn open(paths: LedgerPaths) -> Result<Self, LedgerError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load both tables from disk; a missing file means an empty store
    pub fn load_all(&self) -> Result<(), LedgerError> {
        let file: StoreFile = read_json(self.paths.ledger_file())?;
        debug!(
            transactions = file.transactions.len(),
            budgets = file.budgets.len(),
            "loaded store"
        );
        self.apply(file)
    }

    /// Replace the in-memory tables with the contents of a store file
    pub(crate) fn apply(&self, file: StoreFile) -> Result<(), LedgerError> {
        self.transactions
            .replace_all(file.transactions, file.next_transaction_id)?;
        self.budgets.replace_all(file.budgets, file.next_budget_id)?;
        Ok(())
    }

    /// Current contents of both tables in store-file form
    pub fn snapshot(&self) -> Result<StoreFile, LedgerError> {
        let (transactions, next_transaction_id) = self.transactions.snapshot()?;
        let (budgets, next_budget_id) = self.budgets.snapshot()?;

        Ok(StoreFile {
            next_transaction_id,
            next_budget_id,
            transactions,
            budgets,
        })
    }

    /// Save both tables to disk atomically
    pub fn save_all(&self) -> Result<(), LedgerError> {
        let file = self.snapshot()?;
        write_json_atomic(self.paths.ledger_file(), &file)
    }

    /// Persist pending in-memory changes.
    ///
    /// If the write fails the tables are reloaded from the unchanged file,
    /// discarding everything since the last successful commit.
    pub fn commit(&self) -> Result<(), LedgerError> {
        if let Err(e) = self.save_all() {
            warn!(error = %e, "store write failed, rolling back");
            if let Err(reload) = self.load_all() {
                warn!(error = %reload, "rollback reload failed");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Check if a store file has been written yet
    pub fn is_initialized(&self) -> bool {
        self.paths.ledger_file().exists()
    }
}
