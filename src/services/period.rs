//! Budget period calculations
//!
//! Resolves the start of the window a budget is measured over. "Today" is
//! always passed in so callers and tests control the reference date.

use chrono::{Local, NaiveDate};

use crate::models::BudgetPeriod;

/// The local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive first day of the current window of `period`
pub fn period_start(period: BudgetPeriod, today: NaiveDate) -> NaiveDate {
    period.start_date(today)
}
