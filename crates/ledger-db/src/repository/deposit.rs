//! # Deposit Repository
//!
//! Database operations for bank deposits. Same write discipline as
//! invoices (one statement per mutation, `RETURNING` the row), but there
//! is no business key, no search, and listings sort by `date DESC` only.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{month_predicate, parse_date};
use ledger_core::{Deposit, MonthKey, NewDeposit};

macro_rules! deposit_columns {
    () => {
        "id, amount, date, description, reference, created_at"
    };
}

#[derive(Debug, sqlx::FromRow)]
struct DepositRow {
    id: i64,
    amount: f64,
    date: String,
    description: String,
    reference: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<DepositRow> for Deposit {
    type Error = DbError;

    fn try_from(row: DepositRow) -> DbResult<Self> {
        Ok(Deposit {
            date: parse_date("deposits", row.id, &row.date)?,
            id: row.id,
            amount: row.amount,
            description: row.description,
            reference: row.reference,
            created_at: row.created_at,
        })
    }
}

fn into_deposits(rows: Vec<DepositRow>) -> DbResult<Vec<Deposit>> {
    rows.into_iter().map(Deposit::try_from).collect()
}

/// Repository for deposit database operations.
#[derive(Debug, Clone)]
pub struct DepositRepository {
    pool: SqlitePool,
}

impl DepositRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DepositRepository { pool }
    }

    /// All deposits, newest date first.
    pub async fn list(&self) -> DbResult<Vec<Deposit>> {
        debug!("Listing deposits");

        let rows = sqlx::query_as::<_, DepositRow>(concat!(
            "SELECT ",
            deposit_columns!(),
            " FROM deposits ORDER BY date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_deposits(rows)
    }

    pub async fn get(&self, id: i64) -> DbResult<Deposit> {
        debug!(id = id, "Fetching deposit");

        let row = sqlx::query_as::<_, DepositRow>(concat!(
            "SELECT ",
            deposit_columns!(),
            " FROM deposits WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Deposit", id))?.try_into()
    }

    pub async fn create(&self, deposit: &NewDeposit) -> DbResult<Deposit> {
        debug!(amount = deposit.amount, date = %deposit.date, "Inserting deposit");

        let row = sqlx::query_as::<_, DepositRow>(concat!(
            r#"
            INSERT INTO deposits (amount, date, description, reference, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING "#,
            deposit_columns!()
        ))
        .bind(deposit.amount)
        .bind(deposit.date.to_string())
        .bind(&deposit.description)
        .bind(&deposit.reference)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, amount = row.amount, "Deposit created");
        row.try_into()
    }

    /// Overwrites every field except `id` and `created_at`.
    pub async fn update(&self, id: i64, deposit: &NewDeposit) -> DbResult<Deposit> {
        debug!(id = id, "Updating deposit");

        let row = sqlx::query_as::<_, DepositRow>(concat!(
            r#"
            UPDATE deposits SET
                amount = ?2,
                date = ?3,
                description = ?4,
                reference = ?5
            WHERE id = ?1
            RETURNING "#,
            deposit_columns!()
        ))
        .bind(id)
        .bind(deposit.amount)
        .bind(deposit.date.to_string())
        .bind(&deposit.description)
        .bind(&deposit.reference)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("Deposit", id))?;
        info!(id = id, amount = row.amount, "Deposit updated");
        row.try_into()
    }

    /// Hard-deletes a deposit and returns what was removed.
    pub async fn delete(&self, id: i64) -> DbResult<Deposit> {
        debug!(id = id, "Deleting deposit");

        let row = sqlx::query_as::<_, DepositRow>(concat!(
            "DELETE FROM deposits WHERE id = ?1 RETURNING ",
            deposit_columns!()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("Deposit", id))?;
        info!(id = id, "Deposit deleted");
        row.try_into()
    }

    /// Deposits of one month, newest date first.
    ///
    /// `MM` selects that month in every year, `YYYY-MM` one specific month.
    pub async fn list_by_month(&self, month: &MonthKey) -> DbResult<Vec<Deposit>> {
        let (predicate, key) = month_predicate(month);
        debug!(month = %key, "Listing deposits for month");

        let sql = format!(
            "SELECT {} FROM deposits WHERE {} ORDER BY date DESC",
            deposit_columns!(),
            predicate
        );
        let rows = sqlx::query_as::<_, DepositRow>(&sql)
            .bind(key)
            .fetch_all(&self.pool)
            .await?;

        into_deposits(rows)
    }

    /// Sum of `amount` and number of deposits in one month.
    pub async fn total_for_month(&self, month: &MonthKey) -> DbResult<(f64, i64)> {
        let (predicate, key) = month_predicate(month);
        debug!(month = %key, "Summing deposits for month");

        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0.0), COUNT(*) FROM deposits WHERE {}",
            predicate
        );
        let totals: (f64, i64) = sqlx::query_as(&sql).bind(key).fetch_one(&self.pool).await?;

        Ok(totals)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deposits")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> DepositRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().deposits()
    }

    fn new_deposit(amount: f64, date: &str) -> NewDeposit {
        NewDeposit {
            amount,
            date: date.parse().unwrap(),
            description: "Weekly cash".to_string(),
            reference: format!("DEP-{}", date),
        }
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let repo = repo().await;

        let created = repo.create(&new_deposit(1500.0, "2025-03-02")).await.unwrap();
        assert_eq!(repo.get(created.id).await.unwrap(), created);

        let updated = repo.update(created.id, &new_deposit(1750.25, "2025-03-03")).await.unwrap();
        assert_eq!(updated.amount, 1750.25);
        assert_eq!(updated.created_at, created.created_at);

        repo.delete(created.id).await.unwrap();
        assert!(matches!(repo.get(created.id).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.delete(created.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo().await;
        for date in ["2025-03-02", "2025-03-10", "2024-12-01"] {
            repo.create(&new_deposit(10.0, date)).await.unwrap();
        }

        let dates: Vec<String> =
            repo.list().await.unwrap().iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-10", "2025-03-02", "2024-12-01"]);
    }

    #[tokio::test]
    async fn test_list_by_month_both_key_shapes() {
        let repo = repo().await;
        for date in ["2025-03-02", "2025-03-10", "2024-03-01", "2025-04-01"] {
            repo.create(&new_deposit(10.0, date)).await.unwrap();
        }

        let march_any_year = repo.list_by_month(&"03".parse().unwrap()).await.unwrap();
        assert_eq!(march_any_year.len(), 3);
        assert_eq!(march_any_year[0].date.to_string(), "2025-03-10");

        let march_2025 = repo.list_by_month(&"2025-03".parse().unwrap()).await.unwrap();
        assert_eq!(march_2025.len(), 2);

        assert!(repo.list_by_month(&"12".parse().unwrap()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_for_month() {
        let repo = repo().await;
        repo.create(&new_deposit(100.0, "2025-03-02")).await.unwrap();
        repo.create(&new_deposit(50.5, "2025-03-20")).await.unwrap();
        repo.create(&new_deposit(999.0, "2025-04-01")).await.unwrap();

        let totals = repo.total_for_month(&"2025-03".parse().unwrap()).await.unwrap();
        assert_eq!(totals, (150.5, 2));
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
