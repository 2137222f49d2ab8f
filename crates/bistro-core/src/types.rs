//! # Domain Types
//!
//! Entities of the restaurant floor, the menu and the order book.
//!
//! ## Entity Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Category ◄── MenuItem ◄── MenuVariant        InventoryItem ──► MenuItem│
//! │                  ▲              ▲                                       │
//! │                  │              │                                       │
//! │               OrderItem ────────┘   (unit price frozen at order time)  │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  DiningTable ◄── Order ──► User (creator)                              │
//! │  AVAILABLE       PENDING → IN_PREPARATION → READY → SERVED             │
//! │  OCCUPIED          └──────────┴──────────────┴────────┴──► CANCELLED   │
//! │  RESERVED                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Structs serialize in camelCase and enums in SCREAMING_SNAKE_CASE, the
//! shape the front-of-house client already speaks. Money fields carry a
//! `Cents` suffix and are integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Staff
// =============================================================================

/// Staff role. New accounts default to `Waiter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Cashier,
    #[default]
    Waiter,
}

/// A staff account, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// The slice of a user embedded in orders (the creator).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

// =============================================================================
// Catalog
// =============================================================================

/// A menu section ("Starters", "Drinks").
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A dish or drink that can be ordered.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents before any variant surcharge.
    pub base_price_cents: i64,
    pub category_id: String,
    pub image_url: Option<String>,
    /// Kitchen-side switch ("86'd" for the night).
    pub is_available: bool,
    /// Catalog-side switch (dish retired from the menu).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Both switches must be on for the item to be ordered.
    #[inline]
    pub fn is_orderable(&self) -> bool {
        self.is_available && self.is_active
    }
}

/// A priced option of a menu item (size, extra topping).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuVariant {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Surcharge in cents added to the base price (never negative).
    pub price_add_cents: i64,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuVariant {
    /// Returns the surcharge as Money.
    #[inline]
    pub fn price_add(&self) -> Money {
        Money::from_cents(self.price_add_cents)
    }
}

/// A menu item together with all of its variants.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWithVariants {
    #[serde(flatten)]
    pub item: MenuItem,
    pub variants: Vec<MenuVariant>,
}

// =============================================================================
// Floor
// =============================================================================

/// Occupancy state of a dining table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    /// Wire/database name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::Occupied => "OCCUPIED",
            TableStatus::Reserved => "RESERVED",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical table on the restaurant floor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    /// Number painted on the table; unique across the floor.
    pub table_number: i64,
    pub capacity: i64,
    pub location: Option<String>,
    pub status: TableStatus,
    pub created_by: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Stock
// =============================================================================

/// Stock level of a menu item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub menu_item_id: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: Option<i64>,
    /// Free-form unit ("kg", "portions", "bottles").
    pub unit: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// At or below the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

// =============================================================================
// Orders
// =============================================================================

/// How the order leaves the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

/// Lifecycle status of an order and of each of its items.
///
/// Transition rules live in [`crate::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InPreparation,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::InPreparation,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    /// Wire/database name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::Ready => "READY",
            OrderStatus::Served => "SERVED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order header with its cached totals.
///
/// ## Totals Invariant
/// `total_amount_cents` always equals the sum of the items'
/// `total_price_cents`; the other four totals are derived from it by
/// [`crate::pricing::calculate_totals`] whenever the item set changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Human-readable number, `ORD-<epoch-millis>-<3 digits>`.
    pub order_number: String,
    pub table_id: Option<String>,
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub total_amount_cents: i64,
    pub tax_amount_cents: i64,
    pub service_charge_cents: i64,
    pub discount_amount_cents: i64,
    pub final_amount_cents: i64,
    pub created_by: String,
    pub kot_printed: bool,
    #[ts(as = "Option<String>")]
    pub kot_printed_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A line of an order.
///
/// Uses the snapshot pattern: `unit_price_cents` is frozen when the line is
/// created, so later menu price changes never touch existing orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub variant_id: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// unit price × quantity.
    pub total_price_cents: i64,
    pub notes: Option<String>,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// An order line joined with the names of what was ordered.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub item: OrderItem,
    pub menu_item_name: String,
    pub variant_name: Option<String>,
}

/// An order expanded with its items, table and creator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub table: Option<DiningTable>,
    pub creator: Option<UserSummary>,
}

// =============================================================================
// Unit Tests
// =============================================================================
