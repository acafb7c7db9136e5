//! Calendar month key ("YYYY-MM")

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` if `month` is not 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Month::new(year, month).ok_or_else(err)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned for strings that are not "YYYY-MM"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month '{}' (expected YYYY-MM)", self.0)
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let m: Month = "2025-03".parse().unwrap();
        assert_eq!(m.year(), 2025);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2025-03");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("2025-13".parse::<Month>().is_err());
        assert!("2025-3".parse::<Month>().is_err());
        assert!("March".parse::<Month>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months: Vec<Month> = ["2025-01", "2024-12", "2024-02"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        months.sort();
        let rendered: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(rendered, vec!["2024-02", "2024-12", "2025-01"]);
    }

    #[test]
    fn test_contains() {
        let m = Month::new(2025, 2).unwrap();
        assert!(m.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!m.contains(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()));
    }
}
