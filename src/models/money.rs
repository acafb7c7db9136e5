//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Ledger amounts are non-negative magnitudes; the sign of a
//! transaction lives in its type, but intermediate results such as a
//! balance or a budget's remaining amount may go negative.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single transaction or budget may carry
    /// (one hundred billion units).
    pub const MAX_AMOUNT: Money = Money(10_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_decimal_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a floating point amount, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 cent range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Check if the amount is above `MAX_AMOUNT`
    pub const fn exceeds_limit(&self) -> bool {
        self.0 > Self::MAX_AMOUNT.0
    }

    /// Addition that reports overflow instead of wrapping
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtraction that reports overflow instead of wrapping
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Sum of all amounts, or `None` if the total leaves the i64 cent range
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// The amount as a float, for ratios and JSON numbers
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Plain decimal rendering with two places and no symbol ("-12.05")
    pub fn to_decimal_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "10", "10.5" and anything else
    /// that reads as a finite decimal number ("1e3"). Digits past the
    /// second decimal place are rounded.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let body = body.strip_prefix('$').unwrap_or(body);
        if body.starts_with(['-', '+']) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = match parse_fixed_point(body) {
            Some(cents) => cents,
            None => {
                // Exponent forms and the like
                let value: f64 = body
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                Money::from_f64(value)
                    .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
                    .cents()
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// Parse "123", "123.4", "123.456" into cents. `None` if not plain digits.
fn parse_fixed_point(s: &str) -> Option<i64> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut digits = frac.chars().map(|c| c as i64 - '0' as i64);
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().map_or(false, |d| d >= 5);

    whole
        .checked_mul(100)?
        .checked_add(tenths * 10 + hundredths + i64::from(round_up))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
