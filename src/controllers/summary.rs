use std::collections::BTreeMap;

use chrono::{DateTime, Months, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::response::{Balance, MonthlySummary};
use crate::types::user::UserId;

/// Sum of one table's amounts for one `YYYY-MM` month.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MonthTotal {
    pub(crate) month: String,
    pub(crate) total: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct SummaryController {
    pool: PgPool,
}

impl SummaryController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn balance(&self, user_id: UserId) -> Result<Balance, Error> {
        let (income, expense, saving) = sqlx::query(
            "SELECT
                (SELECT COALESCE(SUM(amount), 0.0) FROM incomes WHERE user_id = $1) AS total_income,
                (SELECT COALESCE(SUM(amount), 0.0) FROM expenses WHERE user_id = $1) AS total_expense,
                (SELECT COALESCE(SUM(amount), 0.0) FROM savings WHERE user_id = $1) AS total_saving;",
        )
        .bind(user_id)
        .map(|row: PgRow| {
            (
                row.get::<f64, _>("total_income"),
                row.get::<f64, _>("total_expense"),
                row.get::<f64, _>("total_saving"),
            )
        })
        .fetch_one(&self.pool)
        .await?;

        let balance = Balance::new(income, expense, saving);

        tracing::info!(
            user_id,
            income = balance.total_income,
            expense = balance.total_expense,
            saving = balance.total_saving,
            balance = balance.balance,
            "computed balance"
        );

        Ok(balance)
    }

    /// One row per month holding any entry, newest month first.
    pub(crate) async fn monthly(&self, user_id: UserId) -> Result<Vec<MonthlySummary>, Error> {
        let incomes = self.month_totals("incomes", user_id).await?;
        let expenses = self.month_totals("expenses", user_id).await?;
        let savings = self.month_totals("savings", user_id).await?;

        Ok(fold_months(incomes, expenses, savings))
    }

    pub(crate) async fn month(
        &self,
        user_id: UserId,
        month: &str,
    ) -> Result<MonthlySummary, Error> {
        let (start, end) = month_bounds(month)?;

        let (income, expense, saving) = sqlx::query(
            "SELECT
                (SELECT SUM(amount) FROM incomes
                    WHERE user_id = $1 AND timestamp >= $2 AND timestamp < $3) AS total_income,
                (SELECT SUM(amount) FROM expenses
                    WHERE user_id = $1 AND timestamp >= $2 AND timestamp < $3) AS total_expense,
                (SELECT SUM(amount) FROM savings
                    WHERE user_id = $1 AND timestamp >= $2 AND timestamp < $3) AS total_saving;",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .map(|row: PgRow| {
            (
                row.get::<Option<f64>, _>("total_income"),
                row.get::<Option<f64>, _>("total_expense"),
                row.get::<Option<f64>, _>("total_saving"),
            )
        })
        .fetch_one(&self.pool)
        .await?;

        Ok(MonthlySummary::new(month.to_owned(), income, expense, saving))
    }

    async fn month_totals(
        &self,
        table: &'static str,
        user_id: UserId,
    ) -> Result<Vec<MonthTotal>, Error> {
        Ok(sqlx::query(&format!(
            "SELECT to_char(date_trunc('month', timestamp), 'YYYY-MM') AS month, SUM(amount) AS total
            FROM {table}
            WHERE user_id = $1
            GROUP BY 1;"
        ))
        .bind(user_id)
        .map(|row: PgRow| MonthTotal {
            month: row.get("month"),
            total: row.get("total"),
        })
        .fetch_all(&self.pool)
        .await?)
    }
}

pub(crate) fn fold_months(
    incomes: Vec<MonthTotal>,
    expenses: Vec<MonthTotal>,
    savings: Vec<MonthTotal>,
) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, [Option<f64>; 3]> = BTreeMap::new();

    for (slot, totals) in [incomes, expenses, savings].into_iter().enumerate() {
        for MonthTotal { month, total } in totals {
            months.entry(month).or_default()[slot] = Some(total);
        }
    }

    months
        .into_iter()
        .rev()
        .map(|(month, [income, expense, saving])| {
            MonthlySummary::new(month, income, expense, saving)
        })
        .collect()
}

/// `"2025-06"` → `[2025-06-01T00:00Z, 2025-07-01T00:00Z)`.
pub(crate) fn month_bounds(month: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), Error> {
    let invalid = || Error::InvalidMonth(month.to_owned());

    let (year, month_number) = month.split_once('-').ok_or_else(invalid)?;

    if year.len() != 4 || month_number.len() != 2 {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month_number: u32 = month_number.parse().map_err(|_| invalid())?;

    let first = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(invalid)?;
    let next = first.checked_add_months(Months::new(1)).ok_or_else(invalid)?;

    Ok((
        first.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc(),
        next.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::response::Total;
    use chrono::TimeZone;

    fn total(month: &str, total: f64) -> MonthTotal {
        MonthTotal {
            month: month.into(),
            total,
        }
    }

    #[test]
    fn months_are_merged_newest_first() {
        let summary = fold_months(
            vec![total("2025-05", 1000.0), total("2025-06", 1200.0)],
            vec![total("2025-06", 300.254)],
            vec![total("2024-12", 50.0)],
        );

        let months: Vec<&str> = summary.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["2025-06", "2025-05", "2024-12"]);

        assert_eq!(summary[0].total_income, Total(Some(1200.0)));
        assert_eq!(summary[0].total_expense, Total(Some(300.25)));
        assert_eq!(summary[0].total_saving, Total(None));
        assert_eq!(summary[0].balance, Total(Some(899.75)));

        assert_eq!(summary[2].total_income, Total(None));
        assert_eq!(summary[2].balance, Total(Some(-50.0)));
    }

    #[test]
    fn no_entries_means_no_months() {
        assert!(fold_months(Vec::new(), Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn month_bounds_span_the_calendar_month() {
        let (start, end) = month_bounds("2024-02").unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let (_, end) = month_bounds("2025-12").unwrap();

        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn malformed_months_are_rejected() {
        for month in ["2025", "2025-13", "2025-00", "25-06", "2025-6", "june", "2025-06-01"] {
            assert!(
                matches!(month_bounds(month), Err(Error::InvalidMonth(_))),
                "{month}"
            );
        }
    }
}
