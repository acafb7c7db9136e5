//! Raw import records
//!
//! Every field of an incoming record is optional. `validate` turns a raw
//! record into something the store accepts, or says why it cannot.

use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::parse_date;
use crate::models::{BudgetPeriod, Money, TransactionInput, TransactionType};

/// An amount as it appears in a document: a number or numeric text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    fn to_money(&self) -> LedgerResult<Money> {
        match self {
            Self::Number(n) => Money::from_f64(*n)
                .ok_or_else(|| LedgerError::Validation(format!("Invalid amount '{}'", n))),
            Self::Text(s) => Money::parse(s).map_err(|e| LedgerError::Validation(e.to_string())),
        }
    }
}

/// A transaction record before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawTransaction {
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<RawAmount>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub tags: Option<String>,
}

impl RawTransaction {
    /// Check required fields and build a store input.
    ///
    /// Date, category, amount and type must be present and non-empty.
    /// Any source ID is ignored; the store issues a new one.
    pub fn validate(&self) -> LedgerResult<TransactionInput> {
        let date = required(&self.date, "date")?;
        let category = required(&self.category, "category")?;
        let kind = required(&self.kind, "type")?;
        let amount = match &self.amount {
            Some(amount) if !amount.is_blank() => amount.to_money()?,
            _ => return Err(missing("amount")),
        };

        let date = parse_date(date).map_err(|e| LedgerError::Validation(e.to_string()))?;
        let kind = kind
            .parse::<TransactionType>()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        TransactionInput::new(date, category, amount, kind)
            .with_description(self.description.clone().unwrap_or_default())
            .with_tags(self.tags.clone().unwrap_or_default())
            .validated()
            .map_err(|e| LedgerError::Validation(e.to_string()))
    }
}

/// A validated budget ready to be set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRecord {
    pub category: String,
    pub amount: Money,
    pub period: BudgetPeriod,
}

/// A budget record before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawBudget {
    pub category: Option<String>,
    pub amount: Option<RawAmount>,
    pub period: Option<String>,
}

impl RawBudget {
    /// Check required fields; the amount must be positive
    pub fn validate(&self) -> LedgerResult<BudgetRecord> {
        let category = required(&self.category, "category")?;
        let period = required(&self.period, "period")?;
        let amount = match &self.amount {
            Some(amount) if !amount.is_blank() => amount.to_money()?,
            _ => return Err(missing("amount")),
        };

        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Budget amount must be positive: {}",
                amount
            )));
        }
        if amount.exceeds_limit() {
            return Err(LedgerError::Validation(format!(
                "Budget amount {} exceeds the limit of {}",
                amount,
                Money::MAX_AMOUNT
            )));
        }
        let period = period
            .parse::<BudgetPeriod>()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        Ok(BudgetRecord {
            category: category.trim().to_string(),
            amount,
            period,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> LedgerResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

fn missing(field: &str) -> LedgerError {
    LedgerError::Validation(format!("Missing required field: {}", field))
}
