use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::types::user::{Credential, UserId};

#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: UserId,
    pub(crate) username: String,
    pub(crate) email: String,
}

impl From<Credential> for UserResponse {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username,
            email: credential.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: &'static str,
}

impl LoginResponse {
    pub(crate) fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub(crate) message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Expense {
    pub(crate) id: i32,
    pub(crate) note: Option<String>,
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpenseSummary {
    pub(crate) total_amount: f64,
    pub(crate) expenses: Vec<Expense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<&'static str>,
}

impl ExpenseSummary {
    pub(crate) fn new(expenses: Vec<Expense>) -> Self {
        let message = expenses
            .is_empty()
            .then_some("No expenses found for the given date range.");

        Self {
            total_amount: expenses.iter().map(|expense| expense.amount).sum(),
            expenses,
            message,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total_amount: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategorySummary {
    pub(crate) total_amount: f64,
    pub(crate) categories: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryExpenses {
    pub(crate) total_amount: f64,
    pub(crate) expenses: Vec<Expense>,
}

/// An income or saving entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Entry {
    pub(crate) id: i32,
    pub(crate) amount: f64,
    pub(crate) note: Option<String>,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct Balance {
    pub(crate) total_income: f64,
    pub(crate) total_expense: f64,
    pub(crate) total_saving: f64,
    pub(crate) balance: f64,
}

impl Balance {
    pub(crate) fn new(total_income: f64, total_expense: f64, total_saving: f64) -> Self {
        Self {
            total_income: round_cents(total_income),
            total_expense: round_cents(total_expense),
            total_saving: round_cents(total_saving),
            balance: round_cents(total_income - total_expense - total_saving),
        }
    }
}

/// A monthly figure, rendered as `"-"` when the month has no entries of
/// that kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Total(pub(crate) Option<f64>);

impl Serialize for Total {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str("-"),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct MonthlySummary {
    pub(crate) month: String,
    pub(crate) total_income: Total,
    pub(crate) total_expense: Total,
    pub(crate) total_saving: Total,
    pub(crate) balance: Total,
}

impl MonthlySummary {
    pub(crate) fn new(
        month: String,
        income: Option<f64>,
        expense: Option<f64>,
        saving: Option<f64>,
    ) -> Self {
        let balance = (income.is_some() || expense.is_some() || saving.is_some()).then(|| {
            round_cents(income.unwrap_or(0.0) - expense.unwrap_or(0.0) - saving.unwrap_or(0.0))
        });

        Self {
            month,
            total_income: Total(income.map(round_cents)),
            total_expense: Total(expense.map(round_cents)),
            total_saving: Total(saving.map(round_cents)),
            balance: Total(balance),
        }
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
