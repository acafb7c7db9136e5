//! Core data models for fintrack
//!
//! This module contains the data structures of the ledger domain:
//! transactions, budgets, money amounts, periods and months.

pub mod budget;
pub mod ids;
pub mod money;
pub mod month;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};
pub use period::{BudgetPeriod, PeriodParseError};
pub use transaction::{Transaction, TransactionInput, TransactionType, TransactionValidationError};
