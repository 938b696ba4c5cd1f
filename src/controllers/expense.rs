use chrono::{DateTime, Duration, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::request::{CategoryRange, DateRange, NewExpense};
use crate::types::response::{
    CategoryExpenses, CategorySummary, CategoryTotal, Expense, ExpenseSummary,
};
use crate::types::user::UserId;

const EXPENSE_COLUMNS: &str = "id, note, amount, category, timestamp";

#[derive(Clone, Debug)]
pub(crate) struct ExpenseController {
    pool: PgPool,
}

impl ExpenseController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list(&self, user_id: UserId) -> Result<Vec<Expense>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = $1 ORDER BY timestamp;"
        ))
        .bind(user_id)
        .map(map_expense)
        .fetch_all(&self.pool)
        .await?)
    }

    pub(crate) async fn get(&self, user_id: UserId, id: i32) -> Result<Expense, Error> {
        sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1 AND user_id = $2;"
        ))
        .bind(id)
        .bind(user_id)
        .map(map_expense)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::EntryNotFound)
    }

    pub(crate) async fn create(
        &self,
        user_id: UserId,
        expense: NewExpense,
    ) -> Result<Expense, Error> {
        Ok(sqlx::query(&format!(
            "INSERT INTO expenses (note, amount, category, user_id) VALUES ($1, $2, $3, $4)
            RETURNING {EXPENSE_COLUMNS};"
        ))
        .bind(&expense.note)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(user_id)
        .map(map_expense)
        .fetch_one(&self.pool)
        .await?)
    }

    pub(crate) async fn update(
        &self,
        user_id: UserId,
        id: i32,
        expense: NewExpense,
    ) -> Result<Expense, Error> {
        sqlx::query(&format!(
            "UPDATE expenses SET note = $1, amount = $2, category = $3
            WHERE id = $4 AND user_id = $5
            RETURNING {EXPENSE_COLUMNS};"
        ))
        .bind(&expense.note)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(id)
        .bind(user_id)
        .map(map_expense)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::EntryNotFound)
    }

    pub(crate) async fn delete(&self, user_id: UserId, id: i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2;")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(Error::EntryNotFound),
            _ => Ok(()),
        }
    }

    /// Expenses between the start of `start_date` and the last instant of
    /// the day holding `end_date`.
    pub(crate) async fn by_date(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<ExpenseSummary, Error> {
        let (start, end) = checked_range(range.start_date, range.end_date)?;

        let expenses = sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
            WHERE user_id = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp;"
        ))
        .bind(user_id)
        .bind(start)
        .bind(through_end_of_day(end))
        .map(map_expense)
        .fetch_all(&self.pool)
        .await?;

        Ok(ExpenseSummary::new(expenses))
    }

    pub(crate) async fn category_totals(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<CategorySummary, Error> {
        let (start, end) = checked_range(range.start_date, range.end_date)?;

        let categories = sqlx::query(
            "SELECT category, SUM(amount) AS total_amount FROM expenses
            WHERE user_id = $1 AND timestamp >= $2 AND timestamp <= $3
            GROUP BY category
            ORDER BY category;",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .map(|row: PgRow| CategoryTotal {
            category: row.get("category"),
            total_amount: row.get("total_amount"),
        })
        .fetch_all(&self.pool)
        .await?;

        Ok(CategorySummary {
            total_amount: categories.iter().map(|c| c.total_amount).sum(),
            categories,
        })
    }

    pub(crate) async fn by_category(
        &self,
        user_id: UserId,
        range: CategoryRange,
    ) -> Result<CategoryExpenses, Error> {
        let (start, end) = checked_range(range.start_date, range.end_date)?;

        let expenses = sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
            WHERE user_id = $1 AND category = $2 AND timestamp >= $3 AND timestamp <= $4
            ORDER BY timestamp;"
        ))
        .bind(user_id)
        .bind(&range.category)
        .bind(start)
        .bind(end)
        .map(map_expense)
        .fetch_all(&self.pool)
        .await?;

        Ok(CategoryExpenses {
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            expenses,
        })
    }
}

fn checked_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), Error> {
    if start > end {
        return Err(Error::InvalidDateRange);
    }

    Ok((start, end))
}

fn through_end_of_day(end: DateTime<Utc>) -> DateTime<Utc> {
    end + Duration::days(1) - Duration::microseconds(1)
}

fn map_expense(row: PgRow) -> Expense {
    Expense {
        id: row.get("id"),
        note: row.get("note"),
        amount: row.get("amount"),
        category: row.get("category"),
        timestamp: row.get("timestamp"),
    }
}
