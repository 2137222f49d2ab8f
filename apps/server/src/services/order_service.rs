//! # Order Service
//!
//! The order lifecycle: create, add items, change status, print the kitchen
//! ticket. Every mutating operation runs inside one transaction.
//!
//! ## Create Order
//! ```text
//! BEGIN
//!   table given? ──► exists? ──no──► 404
//!                    AVAILABLE? ──no──► 409 TableUnavailable
//!   for each line:
//!     menu item exists? ──no──► 404
//!     resolve_line (orderable, variant belongs to item, unit price)
//!   calculate_totals(all lines)
//!   INSERT order, INSERT items
//!   table ──► OCCUPIED
//! COMMIT
//! ```
//!
//! Any `?` before the commit drops the transaction, which rolls back every
//! write made so far. While the transaction is open, every query goes
//! through it.

use bistro_core::input::{CreateOrderInput, OrderFilter};
use bistro_core::kitchen::{build_ticket, KitchenTicket};
use bistro_core::menu::{resolve_line, LineRequest, ResolvedLine};
use bistro_core::order_number::generate_order_number;
use bistro_core::pricing::calculate_totals;
use bistro_core::{
    CoreError, Order, OrderDetail, OrderItem, OrderStatus, OrderTotals, PricingConfig, TableStatus,
};
use bistro_db::{generate_id, Database, MenuRepository, OrderRepository, TableRepository};
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::info;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};

/// Orchestrates order writes across orders, items and tables.
#[derive(Debug, Clone)]
pub struct OrderService {
    db: Database,
    pricing: PricingConfig,
}

impl OrderService {
    pub fn new(db: Database, pricing: PricingConfig) -> Self {
        OrderService { db, pricing }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn list(&self, filter: &OrderFilter) -> ApiResult<Vec<OrderDetail>> {
        Ok(self.db.orders().list_details(filter).await?)
    }

    pub async fn get(&self, order_id: &str) -> ApiResult<OrderDetail> {
        self.db
            .orders()
            .get_detail(order_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order", order_id))
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Creates an order with its lines and occupies the table.
    ///
    /// ## Errors
    /// * `NotFound` - table, menu item or variant does not exist
    /// * `TableUnavailable` - table is not AVAILABLE
    /// * `Unavailable` - a menu item is switched off
    /// * `UniqueViolation` - order number collision (the whole order rolls back)
    pub async fn create_order(&self, input: CreateOrderInput, actor: &Actor) -> ApiResult<OrderDetail> {
        let mut tx = self.db.begin().await?;

        if let Some(table_id) = &input.table_id {
            let table = TableRepository::find(&mut tx, table_id)
                .await?
                .ok_or_else(|| CoreError::not_found("Table", table_id))?;
            if table.status != TableStatus::Available {
                return Err(CoreError::TableUnavailable {
                    table_number: table.table_number,
                    status: table.status,
                }
                .into());
            }
        }

        let lines = resolve_lines(&mut tx, &input.order_items).await?;
        let totals = calculate_totals(&lines, &self.pricing);

        let now = Utc::now();
        let order = Order {
            id: generate_id(),
            order_number: generate_order_number(now),
            table_id: input.table_id.clone(),
            order_type: input.order_type,
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            notes: input.notes,
            status: OrderStatus::Pending,
            total_amount_cents: totals.total_amount.cents(),
            tax_amount_cents: totals.tax_amount.cents(),
            service_charge_cents: totals.service_charge.cents(),
            discount_amount_cents: totals.discount_amount.cents(),
            final_amount_cents: totals.final_amount.cents(),
            created_by: actor.id.clone(),
            kot_printed: false,
            kot_printed_at: None,
            created_at: now,
            updated_at: now,
        };

        OrderRepository::insert(&mut tx, &order).await?;
        OrderRepository::insert_items(&mut tx, &order_items(&order.id, lines, now)).await?;

        if let Some(table_id) = &order.table_id {
            TableRepository::set_status(&mut tx, table_id, TableStatus::Occupied).await?;
        }

        let detail = load_detail(&mut tx, &order.id).await?;
        tx.commit().await.map_err(bistro_db::DbError::from)?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            items = detail.items.len(),
            final_cents = order.final_amount_cents,
            created_by = %actor.email,
            "Order created"
        );

        Ok(detail)
    }

    // =========================================================================
    // Add items
    // =========================================================================

    /// Appends lines and recomputes the totals from the complete item set.
    ///
    /// ## Errors
    /// * `NotFound` - order, menu item or variant does not exist
    /// * `InvalidState` - the order is CANCELLED
    /// * `Unavailable` - a menu item is switched off
    pub async fn add_items(&self, order_id: &str, items: &[LineRequest]) -> ApiResult<OrderDetail> {
        let mut tx = self.db.begin().await?;

        let order = OrderRepository::find(&mut tx, order_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Order", order_id))?;
        if order.status == OrderStatus::Cancelled {
            return Err(CoreError::InvalidState {
                action: "add items to".to_string(),
                status: order.status,
            }
            .into());
        }

        let lines = resolve_lines(&mut tx, items).await?;
        let added = lines.len();
        OrderRepository::insert_items(&mut tx, &order_items(&order.id, lines, Utc::now())).await?;

        let all_items = OrderRepository::items(&mut tx, &order.id).await?;
        let totals: OrderTotals = calculate_totals(&all_items, &self.pricing);
        OrderRepository::update_totals(&mut tx, &order.id, &totals).await?;

        let detail = load_detail(&mut tx, &order.id).await?;
        tx.commit().await.map_err(bistro_db::DbError::from)?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            added,
            total_cents = totals.total_amount.cents(),
            final_cents = totals.final_amount.cents(),
            "Items added to order"
        );

        Ok(detail)
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Moves the order to `target`, cascades the status to its lines and
    /// releases the table when an open order becomes SERVED or CANCELLED.
    ///
    /// ## Errors
    /// * `NotFound` - order does not exist
    /// * `InvalidTransition` - `target` is not reachable from the current status
    pub async fn update_status(&self, order_id: &str, target: OrderStatus) -> ApiResult<OrderDetail> {
        let mut tx = self.db.begin().await?;

        let order = OrderRepository::find(&mut tx, order_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Order", order_id))?;
        let from = order.status;
        let status = from.transition_to(target)?;

        OrderRepository::update_status(&mut tx, &order.id, status).await?;
        OrderRepository::cascade_item_status(&mut tx, &order.id, status).await?;

        // A SERVED order already gave its table back; it may be seated again.
        if from.is_open() && status.releases_table() {
            if let Some(table_id) = &order.table_id {
                TableRepository::set_status(&mut tx, table_id, TableStatus::Available).await?;
            }
        }

        let detail = load_detail(&mut tx, &order.id).await?;
        tx.commit().await.map_err(bistro_db::DbError::from)?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            from = %from,
            to = %status,
            "Order status changed"
        );

        Ok(detail)
    }

    // =========================================================================
    // Kitchen ticket
    // =========================================================================

    /// Builds the kitchen ticket and flags the order as printed.
    ///
    /// Only PENDING lines are printed unless `print_all` is set.
    ///
    /// ## Errors
    /// * `NotFound` - order does not exist
    /// * `NoItemsToPrint` - nothing selected for the ticket
    pub async fn prepare_ticket(
        &self,
        order_id: &str,
        print_all: bool,
        actor: &Actor,
    ) -> ApiResult<KitchenTicket> {
        let mut tx = self.db.begin().await?;

        let detail = load_detail(&mut tx, order_id).await?;
        let printed_at: DateTime<Utc> = Utc::now();
        let ticket = build_ticket(&detail, print_all, printed_at, &actor.email)?;

        OrderRepository::mark_ticket_printed(&mut tx, order_id, printed_at).await?;
        tx.commit().await.map_err(bistro_db::DbError::from)?;

        info!(
            order_id = %order_id,
            order_number = %ticket.order_number,
            lines = ticket.items.len(),
            print_all,
            "Kitchen ticket prepared"
        );

        Ok(ticket)
    }
}

// =============================================================================
// Transaction helpers
// =============================================================================

/// Resolves every requested line against the menu as seen by `conn`.
async fn resolve_lines(
    conn: &mut SqliteConnection,
    requests: &[LineRequest],
) -> ApiResult<Vec<ResolvedLine>> {
    let mut lines = Vec::with_capacity(requests.len());
    for request in requests {
        let item = MenuRepository::find_item(conn, &request.menu_item_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Menu item", &request.menu_item_id))?;
        let variants = MenuRepository::variants_for(conn, &item.id).await?;
        lines.push(resolve_line(&item, &variants, request)?);
    }
    Ok(lines)
}

/// Freezes resolved lines into PENDING order items.
fn order_items(order_id: &str, lines: Vec<ResolvedLine>, now: DateTime<Utc>) -> Vec<OrderItem> {
    lines
        .into_iter()
        .map(|line| OrderItem {
            id: generate_id(),
            order_id: order_id.to_string(),
            menu_item_id: line.menu_item_id,
            variant_id: line.variant_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price.cents(),
            total_price_cents: line.total_price.cents(),
            notes: line.notes,
            status: OrderStatus::Pending,
            created_at: now,
        })
        .collect()
}

async fn load_detail(conn: &mut SqliteConnection, order_id: &str) -> ApiResult<OrderDetail> {
    OrderRepository::load_detail(conn, order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))
}
