//! # Kitchen Order Ticket (KOT)
//!
//! Flattens an order into the ticket handed to the kitchen. There is no
//! printer integration; the ticket is returned as data and the client
//! renders it.
//!
//! ## Which Lines Go On The Ticket
//! ```text
//! print_all = false ──► only PENDING lines (not yet sent to the kitchen)
//! print_all = true  ──► every line (reprint)
//!
//! no lines selected ──► NoItemsToPrint
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{OrderDetail, OrderItemDetail, OrderStatus};

/// Placeholder for a missing table number or customer name.
pub const NOT_APPLICABLE: &str = "N/A";

/// Variant label for lines ordered without a variant.
pub const STANDARD_VARIANT: &str = "Standard";

/// One line of a kitchen ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicketItem {
    pub name: String,
    pub variant: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub notes: Option<String>,
}

/// The ticket as handed to the kitchen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order_number: String,
    pub table_number: String,
    pub customer_name: String,
    pub items: Vec<KitchenTicketItem>,
    pub total_amount_cents: i64,
    #[ts(as = "String")]
    pub printed_at: DateTime<Utc>,
    pub printed_by: String,
}

/// Selects the lines that belong on the ticket.
pub fn ticket_lines(items: &[OrderItemDetail], print_all: bool) -> Vec<&OrderItemDetail> {
    items
        .iter()
        .filter(|line| print_all || line.item.status == OrderStatus::Pending)
        .collect()
}

/// Builds the kitchen ticket for an order.
///
/// ## Arguments
/// * `order` - the expanded order (items, table)
/// * `print_all` - include lines that are no longer PENDING
/// * `printed_at` - timestamp recorded on the order
/// * `printed_by` - identifying name of the staff member printing
///
/// ## Errors
/// `NoItemsToPrint` when no line is selected.
pub fn build_ticket(
    order: &OrderDetail,
    print_all: bool,
    printed_at: DateTime<Utc>,
    printed_by: &str,
) -> CoreResult<KitchenTicket> {
    let lines = ticket_lines(&order.items, print_all);
    if lines.is_empty() {
        return Err(CoreError::NoItemsToPrint);
    }

    let items = lines
        .into_iter()
        .map(|line| KitchenTicketItem {
            name: line.menu_item_name.clone(),
            variant: line
                .variant_name
                .clone()
                .unwrap_or_else(|| STANDARD_VARIANT.to_string()),
            quantity: line.item.quantity,
            unit_price_cents: line.item.unit_price_cents,
            total_price_cents: line.item.total_price_cents,
            notes: line.item.notes.clone(),
        })
        .collect();

    Ok(KitchenTicket {
        order_number: order.order.order_number.clone(),
        table_number: order
            .table
            .as_ref()
            .map(|t| t.table_number.to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        customer_name: order
            .order
            .customer_name
            .clone()
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        items,
        total_amount_cents: order.order.total_amount_cents,
        printed_at,
        printed_by: printed_by.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
