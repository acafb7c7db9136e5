//! Budget table
//!
//! One row per category. Rows are keyed by category so listing is
//! naturally in ascending category order.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Budget, BudgetId, BudgetPeriod, Money};

/// Repository for per-category budgets
pub struct BudgetRepository {
    data: RwLock<BTreeMap<String, Budget>>,
    next_id: RwLock<BudgetId>,
}

impl Default for BudgetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(BudgetId::new(1)),
        }
    }

    /// Replace the table contents after reading the store file
    pub fn replace_all(&self, budgets: Vec<Budget>, next_id: BudgetId) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next = self.next_id.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        let mut high_water = next_id.max(BudgetId::new(1));
        for budget in budgets {
            if budget.id >= high_water {
                high_water = budget.id.next();
            }
            data.insert(budget.category.clone(), budget);
        }
        *next = high_water;

        Ok(())
    }

    /// All rows in category order plus the next ID, for persisting
    pub fn snapshot(&self) -> Result<(Vec<Budget>, BudgetId), LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let next = self.next_id.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok((data.values().cloned().collect(), *next))
    }

    /// Get the budget for a category
    pub fn get(&self, category: &str) -> Result<Option<Budget>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(category).cloned())
    }

    /// Get all budgets, ascending by category
    pub fn get_all(&self) -> Result<Vec<Budget>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Insert or replace the budget for `category`.
    ///
    /// The stored row always gets a fresh ID, even when it replaces one.
    pub fn upsert(
        &self,
        category: &str,
        amount: Money,
        period: BudgetPeriod,
    ) -> Result<Budget, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next = self.next_id.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let budget = Budget::new(*next, category, amount, period)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        *next = next.next();

        data.insert(budget.category.clone(), budget.clone());
        Ok(budget)
    }

    /// Remove the budget for a category. Returns the removed row, if any.
    pub fn remove(&self, category: &str) -> Result<Option<Budget>, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(category))
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
