//! Budget model
//!
//! At most one budget exists per category. A budget caps expense spending
//! in that category over its recurrence period.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::BudgetPeriod;

/// A spending ceiling for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Store-assigned identity; a replacing `set` issues a new one
    pub id: BudgetId,

    /// Unique key
    pub category: String,

    /// Positive ceiling for the period
    pub amount: Money,

    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a budget, validating its fields
    pub fn new(
        id: BudgetId,
        category: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
    ) -> Result<Self, BudgetValidationError> {
        let budget = Self {
            id,
            category: category.into().trim().to_string(),
            amount,
            period,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.amount, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NonPositiveAmount(m) => write!(f, "Budget amount must be positive: {}", m),
            Self::AmountTooLarge(m) => {
                write!(f, "Budget amount {} exceeds the limit of {}", m, Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(
            BudgetId::new(1),
            " Food ",
            Money::from_cents(50000),
            BudgetPeriod::Monthly,
        )
        .unwrap();
        assert_eq!(budget.category, "Food");
        assert_eq!(budget.amount.cents(), 50000);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        let zero = Budget::new(BudgetId::new(1), "Food", Money::zero(), BudgetPeriod::Monthly);
        assert_eq!(
            zero.unwrap_err(),
            BudgetValidationError::NonPositiveAmount(Money::zero())
        );

        let negative = Budget::new(
            BudgetId::new(1),
            "Food",
            Money::from_cents(-1),
            BudgetPeriod::Weekly,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_rejects_amount_over_limit() {
        let over = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        let result = Budget::new(BudgetId::new(1), "Food", over, BudgetPeriod::Monthly);
        assert_eq!(result.unwrap_err(), BudgetValidationError::AmountTooLarge(over));
    }

    #[test]
    fn test_rejects_empty_category() {
        let result = Budget::new(BudgetId::new(1), "", Money::from_cents(100), BudgetPeriod::Yearly);
        assert_eq!(result.unwrap_err(), BudgetValidationError::EmptyCategory);
    }
}
