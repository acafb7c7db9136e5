//! Budget recurrence periods
//!
//! A budget repeats over one of three periods. Spending counts against a
//! budget from the period start onwards, the start day included.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetPeriod {
    /// Trailing seven days
    Weekly,
    /// Calendar month
    Monthly,
    /// Calendar year
    Yearly,
}

impl BudgetPeriod {
    /// First day of the window that contains `today`.
    ///
    /// Weekly is a rolling window starting exactly seven days back, not an
    /// aligned calendar week.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => today - Duration::days(7),
            Self::Monthly => today.with_day(1).unwrap_or(today),
            Self::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        }
    }

    /// Check if a transaction dated `date` counts toward the current window.
    ///
    /// There is no upper bound: future-dated entries count as well.
    pub fn counts_toward(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.start_date(today)
    }

    /// Canonical name as stored and exported
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error returned when a period name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown budget period '{}' (expected Weekly, Monthly or Yearly)",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
