//! Record types for incomes, expenses, and monthly budgets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{ExpenseCategory, IncomeCategory};

/// An income entry ("receita")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    /// Unique identifier for this record
    pub id: String,
    /// Always positive; validated at creation, not here
    pub amount: f64,
    pub description: String,
    pub category: IncomeCategory,
    /// Date received (day granularity)
    pub date: NaiveDate,
}

impl IncomeRecord {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        category: IncomeCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description: description.into(),
            category,
            date,
        }
    }
}

/// An expense entry ("despesa")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: String,
    /// Always positive; validated at creation, not here
    pub amount: f64,
    pub description: String,
    pub category: ExpenseCategory,
    /// Due date (day granularity)
    pub date: NaiveDate,
    /// Whether the money has actually left the account
    pub is_paid: bool,
}

impl ExpenseRecord {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description: description.into(),
            category,
            date,
            is_paid: false,
        }
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }

    /// Overdue: unpaid and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && self.date < today
    }

    /// Signed day count until the due date (negative when past due).
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// A monthly spending ceiling for one expense category ("orçamento")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRecord {
    pub id: String,
    pub category: ExpenseCategory,
    /// "YYYY-MM"
    pub month_key: String,
    /// Always positive
    pub limit_amount: f64,
    /// Running sum of the month's expenses in this category.
    /// Kept in sync by the store layer; only read here.
    pub current_amount: f64,
    /// Percent of the limit at which the alert fires (1-100)
    pub alert_percent: f64,
}

impl BudgetRecord {
    /// Percent of the limit consumed; 0 when the limit is zero.
    pub fn usage_percent(&self) -> f64 {
        if self.limit_amount <= 0.0 {
            0.0
        } else {
            self.current_amount / self.limit_amount * 100.0
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.usage_percent() >= 100.0
    }
}

/// Month key ("YYYY-MM") used to bucket budgets and report groupings.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
