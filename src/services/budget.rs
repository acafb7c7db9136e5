//! Budget service
//!
//! Per-category spending ceilings. Setting a budget for a category that
//! already has one replaces it.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetPeriod, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or replace the budget for a category
    pub fn set(&self, category: &str, amount: Money, period: BudgetPeriod) -> LedgerResult<Budget> {
        let budget = self.storage.budgets.upsert(category, amount, period)?;
        self.storage.commit()?;

        info!(category = %budget.category, amount = %budget.amount, period = %budget.period, "set budget");
        Ok(budget)
    }

    /// Like [`set`](Self::set), parsing amount and period from text
    pub fn set_from_fields(&self, category: &str, amount: &str, period: &str) -> LedgerResult<Budget> {
        let amount = Money::parse(amount).map_err(|e| LedgerError::Validation(e.to_string()))?;
        let period = period
            .parse::<BudgetPeriod>()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.set(category, amount, period)
    }

    /// Get the budget for a category
    pub fn get(&self, category: &str) -> LedgerResult<Option<Budget>> {
        self.storage.budgets.get(category)
    }

    /// List all budgets, ascending by category
    pub fn list(&self) -> LedgerResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Remove the budget for a category
    pub fn remove(&self, category: &str) -> LedgerResult<Budget> {
        let removed = self
            .storage
            .budgets
            .remove(category)?
            .ok_or_else(|| LedgerError::budget_not_found(category))?;
        self.storage.commit()?;

        info!(category = %removed.category, "removed budget");
        Ok(removed)
    }
}
