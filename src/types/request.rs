use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

/// OAuth2 password-flow form. `username` carries the email address.
#[derive(Deserialize)]
pub(crate) struct TokenForm {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl From<TokenForm> for LoginRequest {
    fn from(form: TokenForm) -> Self {
        Self {
            email: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewExpense {
    pub(crate) category: String,
    pub(crate) amount: f64,
    #[serde(default, alias = "Note")]
    pub(crate) note: Option<String>,
}

/// Body of an income or saving entry.
#[derive(Debug, Deserialize)]
pub(crate) struct NewEntry {
    pub(crate) amount: f64,
    #[serde(default)]
    pub(crate) note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateRange {
    pub(crate) start_date: DateTime<Utc>,
    pub(crate) end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRange {
    pub(crate) category: String,
    pub(crate) start_date: DateTime<Utc>,
    pub(crate) end_date: DateTime<Utc>,
}
