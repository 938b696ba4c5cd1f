use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::request::NewEntry;
use crate::types::response::Entry;
use crate::types::user::UserId;

/// Tables that hold plain `amount` + `note` entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Income,
    Saving,
}

impl EntryKind {
    pub(crate) fn table(self) -> &'static str {
        match self {
            EntryKind::Income => "incomes",
            EntryKind::Saving => "savings",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntryKind::Income => "income",
                EntryKind::Saving => "saving",
            }
        )
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EntryController {
    pool: PgPool,
}

impl EntryController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create(
        &self,
        kind: EntryKind,
        user_id: UserId,
        entry: NewEntry,
    ) -> Result<Entry, Error> {
        let entry = sqlx::query(&format!(
            "INSERT INTO {} (amount, note, user_id) VALUES ($1, $2, $3)
            RETURNING id, amount, note, timestamp;",
            kind.table()
        ))
        .bind(entry.amount)
        .bind(&entry.note)
        .bind(user_id)
        .map(map_entry)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id, %kind, amount = entry.amount, "created entry");

        Ok(entry)
    }

    /// Newest first.
    pub(crate) async fn list(&self, kind: EntryKind, user_id: UserId) -> Result<Vec<Entry>, Error> {
        let entries = sqlx::query(&format!(
            "SELECT id, amount, note, timestamp FROM {}
            WHERE user_id = $1
            ORDER BY timestamp DESC;",
            kind.table()
        ))
        .bind(user_id)
        .map(map_entry)
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(user_id, %kind, count = entries.len(), "listed entries");

        Ok(entries)
    }
}

fn map_entry(row: PgRow) -> Entry {
    Entry {
        id: row.get("id"),
        amount: row.get("amount"),
        note: row.get("note"),
        timestamp: row.get("timestamp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_their_tables() {
        assert_eq!(EntryKind::Income.table(), "incomes");
        assert_eq!(EntryKind::Saving.table(), "savings");
        assert_eq!(EntryKind::Saving.to_string(), "saving");
    }
}
