//! Transaction table
//!
//! Holds the ledger in memory keyed by ID. Persistence of the table is done
//! by [`Storage`](super::Storage) together with the budget table, so one
//! write covers every mutation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Transaction, TransactionId, TransactionInput, TransactionType};

/// Repository for ledger entries
pub struct TransactionRepository {
    /// Ascending ID order doubles as insertion order
    data: RwLock<BTreeMap<TransactionId, Transaction>>,
    /// Next ID to hand out; only ever grows
    next_id: RwLock<TransactionId>,
}

impl Default for TransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(TransactionId::new(1)),
        }
    }

    /// Replace the table contents, e.g. after reading the store file.
    ///
    /// `next_id` is raised past the highest stored ID if it lags behind.
    pub fn replace_all(
        &self,
        transactions: Vec<Transaction>,
        next_id: TransactionId,
    ) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next = self.next_id.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        let mut high_water = next_id.max(TransactionId::new(1));
        for txn in transactions {
            if txn.id >= high_water {
                high_water = txn.id.next();
            }
            data.insert(txn.id, txn);
        }
        *next = high_water;

        Ok(())
    }

    /// All rows in ID order plus the next ID, for persisting
    pub fn snapshot(&self) -> Result<(Vec<Transaction>, TransactionId), LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let next = self.next_id.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok((data.values().cloned().collect(), *next))
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest date first.
    ///
    /// Entries sharing a date stay in insertion order.
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get transactions in a category (exact match)
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, LedgerError> {
        let mut transactions = self.get_all()?;
        transactions.retain(|t| t.category == category);
        Ok(transactions)
    }

    /// Get transactions of one type
    pub fn get_by_type(&self, kind: TransactionType) -> Result<Vec<Transaction>, LedgerError> {
        let mut transactions = self.get_all()?;
        transactions.retain(|t| t.kind == kind);
        Ok(transactions)
    }

    /// Store a new transaction under a freshly issued ID
    pub fn insert(&self, input: TransactionInput) -> Result<TransactionId, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next = self.next_id.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = *next;
        *next = id.next();
        data.insert(id, Transaction::from_input(id, input));
        Ok(id)
    }

    /// Replace the record stored under `id`. Returns false if there is none.
    pub fn replace(&self, id: TransactionId, input: TransactionInput) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.get_mut(&id) {
            Some(slot) => {
                *slot = Transaction::from_input(id, input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete a transaction. Returns false if there is none.
    pub fn delete(&self, id: TransactionId) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn input(day: u32, category: &str, cents: i64, kind: TransactionType) -> TransactionInput {
        TransactionInput::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category,
            Money::from_cents(cents),
            kind,
        )
    }

    #[test]
    fn test_empty_repo() {
        let repo = TransactionRepository::new();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let repo = TransactionRepository::new();
        let a = repo.insert(input(1, "Food", 100, TransactionType::Expense)).unwrap();
        let b = repo.insert(input(2, "Food", 200, TransactionType::Expense)).unwrap();

        assert_eq!(a, TransactionId::new(1));
        assert_eq!(b, TransactionId::new(2));
        assert_eq!(repo.get(b).unwrap().unwrap().amount.cents(), 200);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let repo = TransactionRepository::new();
        let a = repo.insert(input(1, "Food", 100, TransactionType::Expense)).unwrap();
        assert!(repo.delete(a).unwrap());
        assert!(!repo.delete(a).unwrap());

        let b = repo.insert(input(1, "Food", 100, TransactionType::Expense)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_all_orders_by_date_desc_then_insertion() {
        let repo = TransactionRepository::new();
        let first = repo.insert(input(5, "A", 1, TransactionType::Expense)).unwrap();
        let newest = repo.insert(input(9, "B", 2, TransactionType::Expense)).unwrap();
        let second = repo.insert(input(5, "C", 3, TransactionType::Expense)).unwrap();

        let ids: Vec<_> = repo.get_all().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![newest, first, second]);
    }

    #[test]
    fn test_replace_keeps_identity() {
        let repo = TransactionRepository::new();
        let id = repo.insert(input(1, "Food", 100, TransactionType::Expense)).unwrap();

        assert!(repo.replace(id, input(3, "Rent", 900, TransactionType::Expense)).unwrap());
        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.category, "Rent");

        assert!(!repo
            .replace(TransactionId::new(99), input(3, "Rent", 900, TransactionType::Expense))
            .unwrap());
    }

    #[test]
    fn test_replace_all_raises_next_id() {
        let repo = TransactionRepository::new();
        let existing = Transaction::from_input(
            TransactionId::new(7),
            input(1, "Food", 100, TransactionType::Expense),
        );
        repo.replace_all(vec![existing], TransactionId::new(1)).unwrap();

        let (_, next) = repo.snapshot().unwrap();
        assert_eq!(next, TransactionId::new(8));
    }

    #[test]
    fn test_filters() {
        let repo = TransactionRepository::new();
        repo.insert(input(10, "Food", 100, TransactionType::Expense)).unwrap();
        repo.insert(input(15, "Food", 200, TransactionType::Expense)).unwrap();
        repo.insert(input(20, "Salary", 300, TransactionType::Income)).unwrap();

        assert_eq!(repo.get_by_category("Food").unwrap().len(), 2);
        assert_eq!(repo.get_by_category("food").unwrap().len(), 0);
        assert_eq!(repo.get_by_type(TransactionType::Income).unwrap().len(), 1);
    }
}
