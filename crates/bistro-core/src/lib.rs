//! # bistro-core: Pure Business Logic for Bistro POS
//!
//! The order rules of the restaurant, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-of-house client (web)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP /api/v1                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bistro-server (axum + order service)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │ pricing │ │  menu   │ │ status  │ │ kitchen │ │validation│ │   │
//! │  │   │ totals  │ │ resolve │ │  FSM    │ │  KOT    │ │ + input │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, DiningTable, Order, ...)
//! - [`money`] - Integer-cent Money and basis-point Rate
//! - [`pricing`] - Order totals
//! - [`menu`] - Menu line resolution (unit and line price)
//! - [`status`] - Order status transition table
//! - [`kitchen`] - Kitchen order ticket projection
//! - [`order_number`] - Human-readable order numbers
//! - [`input`] / [`validation`] - Request payloads and their rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::money::Money;
//! use bistro_core::pricing::{calculate_totals, PricedLine, PricingConfig};
//!
//! struct Line(Money);
//! impl PricedLine for Line {
//!     fn total_price(&self) -> Money { self.0 }
//! }
//!
//! let lines = [Line(Money::from_cents(1000)), Line(Money::from_cents(500))];
//! let totals = calculate_totals(&lines, &PricingConfig::default());
//!
//! assert_eq!(totals.total_amount.cents(), 1500);
//! assert_eq!(totals.tax_amount.cents(), 150);
//! assert_eq!(totals.service_charge.cents(), 75);
//! assert_eq!(totals.final_amount.cents(), 1725);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod input;
pub mod kitchen;
pub mod menu;
pub mod money;
pub mod order_number;
pub mod pricing;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use pricing::{OrderTotals, PricingConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single order line.
///
/// ## Business Reason
/// Catches fat-finger entries (100 instead of 10) before they reach the
/// kitchen.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Upper bound for a menu price or variant surcharge, in cents ($10,000,000).
///
/// Keeps `(base + surcharge) × MAX_ITEM_QUANTITY` and the order totals
/// built from it well inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;
