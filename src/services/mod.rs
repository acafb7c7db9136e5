//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, commits, and the read-only aggregations behind reports.

pub mod budget;
pub mod period;
pub mod summary;
pub mod transaction;

pub use budget::BudgetService;
pub use period::{period_start, today};
pub use summary::{
    checked_total, BudgetStatus, MonthlyTrendEntry, SummaryService, TypeTotals, OVER_BUDGET,
};
pub use transaction::{TransactionFilter, TransactionService, ALL_CATEGORIES};
