//! # Order Repository
//!
//! Orders, their items, and the kitchen ticket flag.
//!
//! ## Write Path
//! ```text
//! OrderService (bistro-server)
//!      │  let mut tx = db.begin()
//!      ▼
//! OrderRepository::insert(&mut tx, ..)           orders
//! OrderRepository::insert_items(&mut tx, ..)     order_items
//! OrderRepository::update_totals(&mut tx, ..)    orders.*_cents
//! OrderRepository::update_status(&mut tx, ..)    orders.status
//! OrderRepository::cascade_item_status(&mut tx)  order_items.status
//!      │
//!      ▼  tx.commit()
//! ```
//!
//! Every write is an associated function over a connection so the caller
//! decides the transaction boundary. Nothing here opens its own.

use bistro_core::input::OrderFilter;
use bistro_core::{Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus, OrderTotals};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::table::TableRepository;
use crate::repository::user::UserRepository;

/// Order line columns joined with the menu item and variant names.
const ITEM_DETAIL_SELECT: &str = r#"
    SELECT oi.*, mi.name AS menu_item_name, mv.name AS variant_name
    FROM order_items oi
    JOIN menu_items mi ON mi.id = oi.menu_item_id
    LEFT JOIN menu_variants mv ON mv.id = oi.variant_id
    WHERE oi.order_id = ?1
    ORDER BY oi.created_at, oi.rowid
"#;

/// Repository for orders and order items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            order_number = %order.order_number,
            total = order.final_amount_cents,
            "Inserting order"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, table_id, order_type, customer_name, customer_phone,
                notes, status, total_amount_cents, tax_amount_cents, service_charge_cents,
                discount_amount_cents, final_amount_cents, created_by, kot_printed,
                kot_printed_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(&order.table_id)
        .bind(order.order_type)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(&order.notes)
        .bind(order.status)
        .bind(order.total_amount_cents)
        .bind(order.tax_amount_cents)
        .bind(order.service_charge_cents)
        .bind(order.discount_amount_cents)
        .bind(order.final_amount_cents)
        .bind(&order.created_by)
        .bind(order.kot_printed)
        .bind(order.kot_printed_at)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Inserts order lines in the given order.
    pub async fn insert_items(conn: &mut SqliteConnection, items: &[OrderItem]) -> DbResult<()> {
        for item in items {
            debug!(
                order_id = %item.order_id,
                menu_item_id = %item.menu_item_id,
                quantity = item.quantity,
                "Inserting order item"
            );

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, menu_item_id, variant_id, quantity, unit_price_cents,
                    total_price_cents, notes, status, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.menu_item_id)
            .bind(&item.variant_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.total_price_cents)
            .bind(&item.notes)
            .bind(item.status)
            .bind(item.created_at)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Overwrites the five cached totals.
    pub async fn update_totals(
        conn: &mut SqliteConnection,
        order_id: &str,
        totals: &OrderTotals,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                total_amount_cents = ?2,
                tax_amount_cents = ?3,
                service_charge_cents = ?4,
                discount_amount_cents = ?5,
                final_amount_cents = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(order_id)
        .bind(totals.total_amount.cents())
        .bind(totals.tax_amount.cents())
        .bind(totals.service_charge.cents())
        .bind(totals.discount_amount.cents())
        .bind(totals.final_amount.cents())
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }

    pub async fn update_status(
        conn: &mut SqliteConnection,
        order_id: &str,
        status: OrderStatus,
    ) -> DbResult<()> {
        debug!(order_id = %order_id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(order_id)
            .bind(status)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }

    /// Moves the order's lines to `status`.
    ///
    /// Cancelled lines are left alone unless the target itself is
    /// `Cancelled`. Returns the number of lines touched.
    pub async fn cascade_item_status(
        conn: &mut SqliteConnection,
        order_id: &str,
        status: OrderStatus,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE order_items SET status = ?2 WHERE order_id = ?1 AND (status != ?3 OR ?2 = ?3)",
        )
        .bind(order_id)
        .bind(status)
        .bind(OrderStatus::Cancelled)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Records that a kitchen ticket was printed.
    pub async fn mark_ticket_printed(
        conn: &mut SqliteConnection,
        order_id: &str,
        printed_at: DateTime<Utc>,
    ) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE orders SET kot_printed = 1, kot_printed_at = ?2, updated_at = ?2 WHERE id = ?1",
        )
        .bind(order_id)
        .bind(printed_at)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn find(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(order)
    }

    /// Every line of an order, oldest first.
    pub async fn items(conn: &mut SqliteConnection, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = ?1 ORDER BY created_at, rowid",
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(items)
    }

    /// Every line of an order with menu item and variant names.
    pub async fn item_details(
        conn: &mut SqliteConnection,
        order_id: &str,
    ) -> DbResult<Vec<OrderItemDetail>> {
        let items = sqlx::query_as::<_, OrderItemDetail>(ITEM_DETAIL_SELECT)
            .bind(order_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(items)
    }

    /// Orders matching `filter` (AND-combined), newest first.
    pub async fn list(conn: &mut SqliteConnection, filter: &OrderFilter) -> DbResult<Vec<Order>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM orders WHERE 1 = 1");
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(order_type) = filter.order_type {
            query.push(" AND order_type = ").push_bind(order_type);
        }
        if let Some(table_id) = &filter.table_id {
            query.push(" AND table_id = ").push_bind(table_id.clone());
        }
        query.push(" ORDER BY created_at DESC, rowid DESC");

        let orders = query.build_query_as::<Order>().fetch_all(&mut *conn).await?;

        Ok(orders)
    }

    /// The `limit` most recently created orders.
    pub async fn recent(conn: &mut SqliteConnection, limit: i64) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        Ok(orders)
    }

    /// Newest order on a table that is still being worked on.
    pub async fn latest_open_for_table(
        conn: &mut SqliteConnection,
        table_id: &str,
    ) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE table_id = ?1 AND status IN ('PENDING', 'IN_PREPARATION', 'READY')
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(table_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(order)
    }

    /// Expands an order header with its items, table and creator.
    pub async fn expand(conn: &mut SqliteConnection, order: Order) -> DbResult<OrderDetail> {
        let items = Self::item_details(conn, &order.id).await?;
        let table = match &order.table_id {
            Some(table_id) => TableRepository::find(conn, table_id).await?,
            None => None,
        };
        let creator = UserRepository::find_summary(conn, &order.created_by).await?;

        Ok(OrderDetail {
            order,
            items,
            table,
            creator,
        })
    }

    /// Loads the full detail view of an order.
    pub async fn load_detail(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<OrderDetail>> {
        match Self::find(conn, id).await? {
            Some(order) => Ok(Some(Self::expand(conn, order).await?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Pool-level reads
    // =========================================================================

    pub async fn get_detail(&self, id: &str) -> DbResult<Option<OrderDetail>> {
        let mut conn = self.pool.acquire().await?;
        Self::load_detail(&mut conn, id).await
    }

    /// Filtered order list, each expanded.
    pub async fn list_details(&self, filter: &OrderFilter) -> DbResult<Vec<OrderDetail>> {
        let mut conn = self.pool.acquire().await?;
        let orders = Self::list(&mut conn, filter).await?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(Self::expand(&mut conn, order).await?);
        }

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use bistro_core::input::OrderFilter;
    use bistro_core::{Order, OrderItem, OrderStatus, OrderType};
    use chrono::Utc;

    use super::OrderRepository;
    use crate::repository::generate_id;
    use crate::repository::test_support::*;
    use crate::Database;

    fn order(creator: &str, table_id: Option<&str>, number: &str) -> Order {
        let now = Utc::now();
        Order {
            id: generate_id(),
            order_number: number.to_string(),
            table_id: table_id.map(str::to_string),
            order_type: OrderType::DineIn,
            customer_name: None,
            customer_phone: None,
            notes: None,
            status: OrderStatus::Pending,
            total_amount_cents: 0,
            tax_amount_cents: 0,
            service_charge_cents: 0,
            discount_amount_cents: 0,
            final_amount_cents: 0,
            created_by: creator.to_string(),
            kot_printed: false,
            kot_printed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn line(order_id: &str, menu_item_id: &str, cents: i64, quantity: i64) -> OrderItem {
        OrderItem {
            id: generate_id(),
            order_id: order_id.to_string(),
            menu_item_id: menu_item_id.to_string(),
            variant_id: None,
            quantity,
            unit_price_cents: cents,
            total_price_cents: cents * quantity,
            notes: None,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    async fn insert_order(db: &Database, order: &Order, items: &[OrderItem]) {
        let mut tx = db.begin().await.unwrap();
        OrderRepository::insert(&mut tx, order).await.unwrap();
        OrderRepository::insert_items(&mut tx, items).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_detail_joins_names_table_and_creator() {
        let db = test_db().await;
        let user = seed_user(&db, "waiter@bistro.test").await;
        let table = seed_table(&db, 7).await;
        let mains = seed_category(&db, "Mains").await;
        let burger = seed_item(&db, &mains, "Burger", 1000).await;
        let double = seed_variant(&db, &burger, "Double", 400).await;

        let header = order(&user.id, Some(&table.id), "ORD-1-001");
        let mut with_variant = line(&header.id, &burger.id, 1400, 1);
        with_variant.variant_id = Some(double.id.clone());
        insert_order(&db, &header, &[line(&header.id, &burger.id, 1000, 2), with_variant]).await;

        let detail = db.orders().get_detail(&header.id).await.unwrap().unwrap();
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].menu_item_name, "Burger");
        assert_eq!(detail.items[0].variant_name, None);
        assert_eq!(detail.items[1].variant_name.as_deref(), Some("Double"));
        assert_eq!(detail.table.unwrap().table_number, 7);
        assert_eq!(detail.creator.unwrap().email, "waiter@bistro.test");
    }

    #[tokio::test]
    async fn test_cascade_skips_cancelled_lines() {
        let db = test_db().await;
        let user = seed_user(&db, "waiter@bistro.test").await;
        let mains = seed_category(&db, "Mains").await;
        let burger = seed_item(&db, &mains, "Burger", 1000).await;

        let header = order(&user.id, None, "ORD-1-002");
        let mut cancelled = line(&header.id, &burger.id, 1000, 1);
        cancelled.status = OrderStatus::Cancelled;
        insert_order(&db, &header, &[line(&header.id, &burger.id, 1000, 1), cancelled]).await;

        let mut conn = db.acquire().await.unwrap();
        let touched = OrderRepository::cascade_item_status(&mut conn, &header.id, OrderStatus::Served)
            .await
            .unwrap();
        assert_eq!(touched, 1);

        let touched =
            OrderRepository::cascade_item_status(&mut conn, &header.id, OrderStatus::Cancelled)
                .await
                .unwrap();
        assert_eq!(touched, 2);
        let statuses: Vec<OrderStatus> = OrderRepository::items(&mut conn, &header.id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.status)
            .collect();
        assert_eq!(statuses, vec![OrderStatus::Cancelled, OrderStatus::Cancelled]);
    }

    #[tokio::test]
    async fn test_list_filters_are_and_combined() {
        let db = test_db().await;
        let user = seed_user(&db, "waiter@bistro.test").await;
        let table = seed_table(&db, 1).await;

        let dine_in = order(&user.id, Some(&table.id), "ORD-1-003");
        let mut takeaway = order(&user.id, None, "ORD-1-004");
        takeaway.order_type = OrderType::Takeaway;
        let mut ready = order(&user.id, Some(&table.id), "ORD-1-005");
        ready.status = OrderStatus::Ready;
        for o in [&dine_in, &takeaway, &ready] {
            insert_order(&db, o, &[]).await;
        }

        let all = db.orders().list_details(&OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            table_id: Some(table.id.clone()),
            ..Default::default()
        };
        let hits = db.orders().list_details(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].order.order_number, "ORD-1-003");

        let filter = OrderFilter {
            order_type: Some(OrderType::Takeaway),
            ..Default::default()
        };
        assert_eq!(db.orders().list_details(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_rolls_back() {
        let db = test_db().await;
        let user = seed_user(&db, "waiter@bistro.test").await;
        insert_order(&db, &order(&user.id, None, "ORD-1-006"), &[]).await;

        let mut tx = db.begin().await.unwrap();
        let err = OrderRepository::insert(&mut tx, &order(&user.id, None, "ORD-1-006"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::UniqueViolation { .. }));
        drop(tx);

        assert_eq!(db.orders().list_details(&OrderFilter::default()).await.unwrap().len(), 1);
    }
}
