//! Transaction service
//!
//! Ledger CRUD on top of the storage layer. Every mutation validates its
//! input, changes the table and commits the store in one step.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId, TransactionInput};
use crate::storage::Storage;

/// Category filter value that means "every category"
pub const ALL_CATEGORIES: &str = "All";

/// Service for ledger management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of description or category
    pub search_text: Option<String>,
    /// Exact category; `None` or `"All"` keeps every category
    pub category: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction and return its ID
    pub fn add(&self, input: TransactionInput) -> LedgerResult<TransactionId> {
        let input = input
            .validated()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let id = self.storage.transactions.insert(input)?;
        self.storage.commit()?;

        info!(id = %id, "added transaction");
        Ok(id)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Replace every field of an existing transaction. The ID is kept.
    pub fn update(&self, id: TransactionId, input: TransactionInput) -> LedgerResult<Transaction> {
        if self.storage.transactions.get(id)?.is_none() {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }

        let input = input
            .validated()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let updated = Transaction::from_input(id, input.clone());
        self.storage.transactions.replace(id, input)?;
        self.storage.commit()?;

        info!(id = %id, "updated transaction");
        Ok(updated)
    }

    /// Permanently remove a transaction
    pub fn delete(&self, id: TransactionId) -> LedgerResult<()> {
        if !self.storage.transactions.delete(id)? {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }
        self.storage.commit()?;

        info!(id = %id, "deleted transaction");
        Ok(())
    }

    /// List transactions, newest first, narrowed by the filter
    pub fn list(&self, filter: &TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = match filter.category.as_deref() {
            Some(category) if category != ALL_CATEGORIES => {
                self.storage.transactions.get_by_category(category)?
            }
            _ => self.storage.transactions.get_all()?,
        };

        if let Some(text) = filter.search_text.as_deref().filter(|t| !t.is_empty()) {
            transactions.retain(|t| t.matches_search(text));
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Count all transactions
    pub fn count(&self) -> LedgerResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn input(day: u32, category: &str, description: &str, cents: i64) -> TransactionInput {
        TransactionInput::new(
            NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            category,
            Money::from_cents(cents),
            TransactionType::Expense,
        )
        .with_description(description)
    }

    #[test]
    fn test_add_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let id = service.add(input(1, "Food", "Groceries", 4500)).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        let matching: Vec<_> = all.iter().filter(|t| t.id == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].description, "Groceries");
        assert_eq!(matching[0].amount.cents(), 4500);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.add(input(1, "  ", "", 100)).unwrap_err();
        assert!(err.is_validation());

        let err = service.add(input(1, "Food", "", -100)).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(input(1, "Salary", "", 9_000_000_000_000_000))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_category_stored_trimmed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        storage
            .budgets
            .upsert("Food", Money::from_cents(10000), crate::models::BudgetPeriod::Monthly)
            .unwrap();

        let id = service.add(input(1, " Food ", "", 2500)).unwrap();
        assert_eq!(service.get(id).unwrap().unwrap().category, "Food");

        service.update(id, input(2, "Food\n", "", 3000)).unwrap();
        assert_eq!(service.get(id).unwrap().unwrap().category, "Food");

        let today = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        let budget = storage.budgets.get("Food").unwrap().unwrap();
        let status = crate::services::SummaryService::with_today(&storage, today)
            .budget_status(&budget)
            .unwrap();
        assert_eq!(status.spent.cents(), 3000);
    }

    #[test]
    fn test_update_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let id = service.add(input(1, "Food", "Lunch", 1200)).unwrap();
        let updated = service.update(id, input(2, "Dining", "Dinner", 3000)).unwrap();

        assert_eq!(updated.id, id);
        let stored = service.get(id).unwrap().unwrap();
        assert_eq!(stored.category, "Dining");
        assert_eq!(stored.amount.cents(), 3000);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .update(TransactionId::new(12), input(1, "Food", "", 100))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let id = service.add(input(1, "Food", "", 100)).unwrap();
        service.delete(id).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        assert!(all.iter().all(|t| t.id != id));

        let err = service.delete(id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.add(input(1, "Food", "Coffee beans", 900)).unwrap();
        service.add(input(2, "Transportation", "Bus pass", 5000)).unwrap();
        service.add(input(3, "Food", "Pizza", 1500)).unwrap();

        let food = service
            .list(&TransactionFilter::new().category("Food"))
            .unwrap();
        assert_eq!(food.len(), 2);

        let all = service
            .list(&TransactionFilter::new().category(ALL_CATEGORIES))
            .unwrap();
        assert_eq!(all.len(), 3);

        let search = service
            .list(&TransactionFilter::new().search("COFFEE"))
            .unwrap();
        assert_eq!(search.len(), 1);

        // Category text also matches the search
        let search = service
            .list(&TransactionFilter::new().search("transport"))
            .unwrap();
        assert_eq!(search.len(), 1);

        let limited = service.list(&TransactionFilter::new().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].description, "Pizza");
    }

    #[test]
    fn test_list_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.add(input(5, "Food", "a", 100)).unwrap();
        service.add(input(5, "Food", "b", 100)).unwrap();

        let first = service.list(&TransactionFilter::new()).unwrap();
        let second = service.list(&TransactionFilter::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].description, "a");
    }
}
