//! Transaction model
//!
//! A ledger entry is a dated, categorised, non-negative amount whose
//! direction is given by its type (income or expense).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Canonical name as stored and exported
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TransactionValidationError::UnknownType(s.to_string())),
        }
    }
}

/// A transaction before the store has assigned it an ID.
///
/// Used both for `add` and for the full-record replace done by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub tags: String,
}

impl TransactionInput {
    /// Create an input with empty description and tags
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        kind: TransactionType,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            description: String::new(),
            amount,
            kind,
            tags: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Build an input from raw text fields as a form or import row supplies them.
    ///
    /// Missing optional fields become empty strings.
    pub fn from_fields(
        date: &str,
        category: &str,
        description: Option<&str>,
        amount: &str,
        kind: &str,
        tags: Option<&str>,
    ) -> Result<Self, TransactionValidationError> {
        let date = parse_date(date)?;
        if category.trim().is_empty() {
            return Err(TransactionValidationError::MissingField("category"));
        }
        if amount.trim().is_empty() {
            return Err(TransactionValidationError::MissingField("amount"));
        }
        if kind.trim().is_empty() {
            return Err(TransactionValidationError::MissingField("type"));
        }
        let amount = Money::parse(amount)
            .map_err(|_| TransactionValidationError::InvalidAmount(amount.to_string()))?;
        let kind: TransactionType = kind.parse()?;

        Self {
            date,
            category: category.to_string(),
            description: description.unwrap_or_default().to_string(),
            amount,
            kind,
            tags: tags.unwrap_or_default().to_string(),
        }
        .validated()
    }

    /// Trim the category and validate, returning the input as it is stored
    pub fn validated(mut self) -> Result<Self, TransactionValidationError> {
        self.category = self.category.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingField("category"));
        }
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

/// Parse an ISO-8601 calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate, TransactionValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TransactionValidationError::MissingField("date"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TransactionValidationError::InvalidDate(s.to_string()))
}

/// A stored ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identity, never reused
    pub id: TransactionId,

    /// Calendar date, no time component
    pub date: NaiveDate,

    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Non-negative magnitude
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    #[serde(default)]
    pub tags: String,
}

impl Transaction {
    /// Materialise an input under the given ID
    pub fn from_input(id: TransactionId, input: TransactionInput) -> Self {
        Self {
            id,
            date: input.date,
            category: input.category,
            description: input.description,
            amount: input.amount,
            kind: input.kind,
            tags: input.tags,
        }
    }

    /// The record without its identity
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            date: self.date,
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            tags: self.tags.clone(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Case-insensitive substring match against description or category
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingField(&'static str),
    InvalidDate(String),
    InvalidAmount(String),
    NegativeAmount(Money),
    AmountTooLarge(Money),
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {}", field),
            Self::InvalidDate(s) => write!(f, "Invalid date '{}' (expected YYYY-MM-DD)", s),
            Self::InvalidAmount(s) => write!(f, "Invalid amount '{}'", s),
            Self::NegativeAmount(m) => write!(f, "Amount must not be negative: {}", m),
            Self::AmountTooLarge(m) => {
                write!(f, "Amount {} exceeds the limit of {}", m, Money::MAX_AMOUNT)
            }
            Self::UnknownType(s) => {
                write!(f, "Unknown transaction type '{}' (expected Income or Expense)", s)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_fields() {
        let input = TransactionInput::from_fields(
            "2025-01-15",
            " Food ",
            Some("Lunch"),
            "12.50",
            "expense",
            None,
        )
        .unwrap();

        assert_eq!(input.date, date(2025, 1, 15));
        assert_eq!(input.category, "Food");
        assert_eq!(input.description, "Lunch");
        assert_eq!(input.amount.cents(), 1250);
        assert_eq!(input.kind, TransactionType::Expense);
        assert_eq!(input.tags, "");
    }

    #[test]
    fn test_from_fields_rejects_missing_and_malformed() {
        let missing_amount =
            TransactionInput::from_fields("2025-01-15", "Food", None, "", "Expense", None);
        assert_eq!(
            missing_amount.unwrap_err(),
            TransactionValidationError::MissingField("amount")
        );

        let bad_amount =
            TransactionInput::from_fields("2025-01-15", "Food", None, "ten", "Expense", None);
        assert!(matches!(
            bad_amount.unwrap_err(),
            TransactionValidationError::InvalidAmount(_)
        ));

        let negative =
            TransactionInput::from_fields("2025-01-15", "Food", None, "-5", "Expense", None);
        assert!(matches!(
            negative.unwrap_err(),
            TransactionValidationError::NegativeAmount(_)
        ));

        let bad_date = TransactionInput::from_fields("15/01/2025", "Food", None, "5", "Expense", None);
        assert!(matches!(
            bad_date.unwrap_err(),
            TransactionValidationError::InvalidDate(_)
        ));

        let bad_type = TransactionInput::from_fields("2025-01-15", "Food", None, "5", "Refund", None);
        assert!(matches!(
            bad_type.unwrap_err(),
            TransactionValidationError::UnknownType(_)
        ));

        let no_category = TransactionInput::from_fields("2025-01-15", "  ", None, "5", "Income", None);
        assert_eq!(
            no_category.unwrap_err(),
            TransactionValidationError::MissingField("category")
        );
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let input = TransactionInput::new(date(2025, 1, 1), "Other", Money::zero(), TransactionType::Income);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validated_trims_category() {
        let input = TransactionInput::new(date(2025, 1, 1), " Food\t", Money::from_cents(100), TransactionType::Expense)
            .validated()
            .unwrap();
        assert_eq!(input.category, "Food");

        let blank = TransactionInput::new(date(2025, 1, 1), "   ", Money::from_cents(100), TransactionType::Expense);
        assert_eq!(
            blank.validated().unwrap_err(),
            TransactionValidationError::MissingField("category")
        );
    }

    #[test]
    fn test_rejects_amount_over_limit() {
        let at_limit = TransactionInput::new(date(2025, 1, 1), "Salary", Money::MAX_AMOUNT, TransactionType::Income);
        assert!(at_limit.validate().is_ok());

        let huge = TransactionInput::from_fields("2025-01-01", "Salary", None, "90000000000000000", "Income", None);
        assert!(matches!(
            huge.unwrap_err(),
            TransactionValidationError::AmountTooLarge(_)
        ));
    }

    #[test]
    fn test_from_fields_rejects_doubled_sign() {
        let doubled = TransactionInput::from_fields("2025-01-15", "Food", None, "--5", "Expense", None);
        assert!(matches!(
            doubled.unwrap_err(),
            TransactionValidationError::InvalidAmount(_)
        ));
    }

    #[test]
    fn test_matches_search() {
        let txn = Transaction::from_input(
            TransactionId::new(1),
            TransactionInput::new(date(2025, 1, 1), "Food", Money::from_cents(100), TransactionType::Expense)
                .with_description("Corner Bakery"),
        );
        assert!(txn.matches_search("bakery"));
        assert!(txn.matches_search("FOO"));
        assert!(!txn.matches_search("rent"));
    }

    #[test]
    fn test_serde_field_names() {
        let txn = Transaction::from_input(
            TransactionId::new(3),
            TransactionInput::new(date(2025, 2, 3), "Food", Money::from_cents(250), TransactionType::Expense),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["date"], "2025-02-03");
        assert_eq!(json["id"], 3);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }
}
