//! # Menu Line Resolution
//!
//! Prices one requested order line against the current menu.
//!
//! ```text
//! LineRequest { menuItemId, variantId?, quantity, notes? }
//!      │
//!      ▼
//! item orderable? ──no──► Unavailable
//!      │ yes
//!      ▼
//! variant in item's set? ──no──► NotFound
//!      │ yes (or none requested)
//!      ▼
//! unit  = base price + variant surcharge
//! total = unit × quantity
//! ```
//!
//! Fetching the item and its variants is the caller's job (the storage
//! layer); a missing item is reported by the caller as `NotFound` before
//! this module is reached. Quantity is validated at the HTTP boundary and
//! is not re-checked here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MenuItem, MenuVariant};

/// One line as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub menu_item_id: String,
    pub variant_id: Option<String>,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// A priced line, ready to be written as an order item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub variant_id: Option<String>,
    pub variant_name: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
    pub notes: Option<String>,
}

/// Resolves a requested line against a fetched menu item.
///
/// ## Arguments
/// * `item` - the menu item named by `request.menu_item_id`
/// * `variants` - the item's variant set
/// * `request` - the submitted line
///
/// ## Errors
/// * `Unavailable` if the item is unavailable or inactive
/// * `NotFound` if a variant id is given that is not in `variants`
pub fn resolve_line(
    item: &MenuItem,
    variants: &[MenuVariant],
    request: &LineRequest,
) -> CoreResult<ResolvedLine> {
    if !item.is_orderable() {
        return Err(CoreError::Unavailable {
            name: item.name.clone(),
        });
    }

    let variant = match &request.variant_id {
        Some(variant_id) => Some(
            variants
                .iter()
                .find(|v| &v.id == variant_id && v.menu_item_id == item.id)
                .ok_or_else(|| CoreError::not_found("Menu variant", variant_id))?,
        ),
        None => None,
    };

    let unit_price = item.base_price() + variant.map(MenuVariant::price_add).unwrap_or_default();

    Ok(ResolvedLine {
        menu_item_id: item.id.clone(),
        menu_item_name: item.name.clone(),
        variant_id: variant.map(|v| v.id.clone()),
        variant_name: variant.map(|v| v.name.clone()),
        quantity: request.quantity,
        unit_price,
        total_price: unit_price.multiply_quantity(request.quantity),
        notes: request.notes.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
