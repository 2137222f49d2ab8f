//! Dining table repository.
//!
//! Table status is written from two places: staff changing it by hand, and
//! the order lifecycle occupying or releasing it inside its transaction
//! ([`TableRepository::find`] / [`TableRepository::set_status`]).

use bistro_core::{DiningTable, TableStatus};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for dining tables.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    // =========================================================================
    // Connection-level operations (usable inside a transaction)
    // =========================================================================

    pub async fn find(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM restaurant_tables WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(table)
    }

    /// Sets a table's status.
    ///
    /// ## Errors
    /// `NotFound` when no row has this id.
    pub async fn set_status(
        conn: &mut SqliteConnection,
        id: &str,
        status: TableStatus,
    ) -> DbResult<()> {
        debug!(table_id = %id, status = %status, "Setting table status");

        let result = sqlx::query(
            "UPDATE restaurant_tables SET status = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }

        Ok(())
    }

    /// Tables in any of `statuses`, by table number.
    pub async fn with_statuses(
        conn: &mut SqliteConnection,
        statuses: &[TableStatus],
    ) -> DbResult<Vec<DiningTable>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM restaurant_tables WHERE status IN (");
        let mut separated = query.separated(", ");
        for status in statuses {
            separated.push_bind(*status);
        }
        query.push(") ORDER BY table_number");

        let tables = query
            .build_query_as::<DiningTable>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(tables)
    }

    // =========================================================================
    // Pool-level CRUD
    // =========================================================================

    /// Every table, by table number.
    pub async fn list(&self) -> DbResult<Vec<DiningTable>> {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT * FROM restaurant_tables ORDER BY table_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<DiningTable>> {
        let mut conn = self.pool.acquire().await?;
        Self::find(&mut conn, id).await
    }

    pub async fn insert(&self, table: &DiningTable) -> DbResult<()> {
        debug!(id = %table.id, number = table.table_number, "Inserting table");

        sqlx::query(
            r#"
            INSERT INTO restaurant_tables (
                id, table_number, capacity, location, status, created_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&table.id)
        .bind(table.table_number)
        .bind(table.capacity)
        .bind(&table.location)
        .bind(table.status)
        .bind(&table.created_by)
        .bind(table.created_at)
        .bind(table.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Manual status change by staff.
    pub async fn update_status(&self, id: &str, status: TableStatus) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::set_status(&mut conn, id, status).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM restaurant_tables WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bistro_core::TableStatus;

    use crate::repository::test_support::*;
    use crate::DbError;

    #[tokio::test]
    async fn test_status_round_trip() {
        let db = test_db().await;
        let table = seed_table(&db, 4).await;

        db.tables()
            .update_status(&table.id, TableStatus::Reserved)
            .await
            .unwrap();
        let stored = db.tables().get_by_id(&table.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TableStatus::Reserved);
    }

    #[tokio::test]
    async fn test_duplicate_table_number_rejected() {
        let db = test_db().await;
        seed_table(&db, 1).await;
        let mut dup = seed_table(&db, 2).await;
        dup.id = crate::repository::generate_id();
        dup.table_number = 1;
        let err = db.tables().insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "restaurant_tables.table_number"));
    }

    #[tokio::test]
    async fn test_with_statuses_filters() {
        let db = test_db().await;
        let t1 = seed_table(&db, 1).await;
        let t2 = seed_table(&db, 2).await;
        seed_table(&db, 3).await;
        db.tables().update_status(&t1.id, TableStatus::Occupied).await.unwrap();
        db.tables().update_status(&t2.id, TableStatus::Reserved).await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        let active = crate::TableRepository::with_statuses(
            &mut conn,
            &[TableStatus::Occupied, TableStatus::Reserved],
        )
        .await
        .unwrap();
        let numbers: Vec<i64> = active.iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_set_status_unknown_table() {
        let db = test_db().await;
        let err = db
            .tables()
            .update_status("missing", TableStatus::Occupied)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
