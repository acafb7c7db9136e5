//! Aggregation service
//!
//! Read-only figures derived from the ledger on every call: balance,
//! monthly totals, savings rate, category breakdowns, the monthly trend and
//! budget-versus-spend. Nothing is cached.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money, Month, Transaction, TransactionType};
use crate::storage::Storage;

use super::period::{period_start, today};

/// Status text used when spending exceeds the budget
pub const OVER_BUDGET: &str = "Over Budget";

/// Income and expense for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTrendEntry {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTrendEntry {
    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Ledger-wide income and expense totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeTotals {
    pub income: Money,
    pub expense: Money,
}

/// Spending measured against one budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    /// First day counted toward the budget
    pub window_start: NaiveDate,
    /// Expenses in the category since the window start
    pub spent: Money,
    /// Budget amount minus spent; negative when overspent
    pub remaining: Money,
    /// `"Over Budget"` or `"<pct>% Left"`
    pub status: String,
}

impl BudgetStatus {
    /// Check if spending exceeds the budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Service computing ledger aggregates
pub struct SummaryService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> SummaryService<'a> {
    /// Create a service measuring periods against the local date
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, today())
    }

    /// Create a service with a fixed reference date
    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    /// The reference date used for period windows
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Total income minus total expense over the whole ledger
    pub fn total_balance(&self) -> LedgerResult<Money> {
        let totals = self.totals_by_type()?;
        difference(totals.income, totals.expense)
    }

    /// Sum of income in a month
    pub fn monthly_income(&self, month: Month) -> LedgerResult<Money> {
        self.monthly_sum(month, TransactionType::Income)
    }

    /// Sum of expenses in a month
    pub fn monthly_expense(&self, month: Month) -> LedgerResult<Money> {
        self.monthly_sum(month, TransactionType::Expense)
    }

    /// Share of the month's income that was not spent, as a percentage.
    ///
    /// Zero when the month has no income. Negative when spending exceeds
    /// income.
    pub fn savings_rate(&self, month: Month) -> LedgerResult<f64> {
        let income = self.monthly_income(month)?;
        if !income.is_positive() {
            return Ok(0.0);
        }
        let expense = self.monthly_expense(month)?;
        Ok(percent_of(difference(income, expense)?, income))
    }

    /// Total per category for one transaction type.
    ///
    /// Categories without a transaction of that type are absent.
    pub fn category_breakdown(&self, kind: TransactionType) -> LedgerResult<BTreeMap<String, Money>> {
        let mut breakdown: BTreeMap<String, Money> = BTreeMap::new();
        for txn in self.storage.transactions.get_by_type(kind)? {
            let total = breakdown.entry(txn.category).or_default();
            *total = accumulate(*total, txn.amount)?;
        }
        Ok(breakdown)
    }

    /// Income and expense totals over the whole ledger
    pub fn totals_by_type(&self) -> LedgerResult<TypeTotals> {
        let mut totals = TypeTotals::default();
        for txn in self.storage.transactions.get_all()? {
            match txn.kind {
                TransactionType::Income => totals.income = accumulate(totals.income, txn.amount)?,
                TransactionType::Expense => totals.expense = accumulate(totals.expense, txn.amount)?,
            }
        }
        Ok(totals)
    }

    /// Income and expense per month, oldest first.
    ///
    /// Only months with at least one transaction appear.
    pub fn monthly_trend(&self) -> LedgerResult<Vec<MonthlyTrendEntry>> {
        let mut months: BTreeMap<Month, MonthlyTrendEntry> = BTreeMap::new();
        for txn in self.storage.transactions.get_all()? {
            let month = Month::of(txn.date);
            let entry = months.entry(month).or_insert(MonthlyTrendEntry {
                month,
                income: Money::zero(),
                expense: Money::zero(),
            });
            match txn.kind {
                TransactionType::Income => entry.income = accumulate(entry.income, txn.amount)?,
                TransactionType::Expense => entry.expense = accumulate(entry.expense, txn.amount)?,
            }
        }
        Ok(months.into_values().collect())
    }

    /// Spending in the budget's category since the start of its period
    pub fn budget_status(&self, budget: &Budget) -> LedgerResult<BudgetStatus> {
        let spent = checked_total(
            self.storage
                .transactions
                .get_by_category(&budget.category)?
                .iter()
                .filter(|t| t.is_expense() && budget.period.counts_toward(t.date, self.today))
                .map(|t| t.amount),
        )?;

        let remaining = difference(budget.amount, spent)?;
        let status = if remaining.is_negative() {
            OVER_BUDGET.to_string()
        } else {
            format!("{:.1}% Left", percent_of(remaining, budget.amount))
        };

        Ok(BudgetStatus {
            budget: budget.clone(),
            window_start: period_start(budget.period, self.today),
            spent,
            remaining,
            status,
        })
    }

    /// Status of every budget, ascending by category
    pub fn budget_overview(&self) -> LedgerResult<Vec<BudgetStatus>> {
        self.storage
            .budgets
            .get_all()?
            .iter()
            .map(|b| self.budget_status(b))
            .collect()
    }

    /// The most recent transactions, newest first
    pub fn recent_transactions(&self, limit: usize) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        transactions.truncate(limit);
        Ok(transactions)
    }

    fn monthly_sum(&self, month: Month, kind: TransactionType) -> LedgerResult<Money> {
        checked_total(
            self.storage
                .transactions
                .get_by_type(kind)?
                .iter()
                .filter(|t| month.contains(t.date))
                .map(|t| t.amount),
        )
    }
}

/// Sum amounts, failing instead of overflowing
pub fn checked_total<I: IntoIterator<Item = Money>>(amounts: I) -> LedgerResult<Money> {
    Money::checked_sum(amounts).ok_or_else(out_of_range)
}

fn accumulate(total: Money, amount: Money) -> LedgerResult<Money> {
    total.checked_add(amount).ok_or_else(out_of_range)
}

fn difference(a: Money, b: Money) -> LedgerResult<Money> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

fn out_of_range() -> LedgerError {
    LedgerError::Validation("Ledger totals exceed the supported amount range".into())
}

fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.as_f64() / whole.as_f64() * 100.0
}
