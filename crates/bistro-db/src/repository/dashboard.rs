//! Dashboard repository.
//!
//! Read-only aggregates over orders, tables and inventory. Time windows are
//! half-open `[start, end)` and compare against stored UTC timestamps.

use bistro_core::{DiningTable, Order, OrderStatus, TableStatus};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::DbResult;
use crate::repository::order::OrderRepository;
use crate::repository::table::TableRepository;

/// Statuses whose orders count as revenue.
const REVENUE_STATUSES: [OrderStatus; 2] = [OrderStatus::Ready, OrderStatus::Served];

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Sum of `final_amount_cents` of READY/SERVED orders created in the window.
    pub async fn revenue_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<i64> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COALESCE(SUM(final_amount_cents), 0) FROM orders WHERE created_at >= ");
        query.push_bind(start);
        query.push(" AND created_at < ").push_bind(end);
        query.push(" AND status IN (");
        let mut separated = query.separated(", ");
        for status in REVENUE_STATUSES {
            separated.push_bind(status);
        }
        query.push(")");

        let (revenue,): (i64,) = query.build_query_as().fetch_one(&self.pool).await?;
        Ok(revenue)
    }

    /// Orders of any status created in the window.
    pub async fn count_orders_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE created_at >= ?1 AND created_at < ?2")
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Orders currently in any of `statuses`.
    pub async fn count_by_statuses(&self, statuses: &[OrderStatus]) -> DbResult<i64> {
        if statuses.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM orders WHERE status IN (");
        let mut separated = query.separated(", ");
        for status in statuses {
            separated.push_bind(*status);
        }
        query.push(")");

        let (count,): (i64,) = query.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Active inventory rows at or below their reorder threshold.
    pub async fn count_low_stock(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM inventory_items WHERE is_active = 1 AND current_stock <= min_stock",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// OCCUPIED and RESERVED tables, each with its newest open order.
    pub async fn active_tables(&self) -> DbResult<Vec<(DiningTable, Option<Order>)>> {
        let mut conn = self.pool.acquire().await?;
        let tables = TableRepository::with_statuses(
            &mut conn,
            &[TableStatus::Occupied, TableStatus::Reserved],
        )
        .await?;

        let mut active = Vec::with_capacity(tables.len());
        for table in tables {
            let order = OrderRepository::latest_open_for_table(&mut conn, &table.id).await?;
            active.push((table, order));
        }

        Ok(active)
    }

    pub async fn recent_orders(&self, limit: i64) -> DbResult<Vec<Order>> {
        let mut conn = self.pool.acquire().await?;
        OrderRepository::recent(&mut conn, limit).await
    }
}
