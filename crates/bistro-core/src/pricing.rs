//! # Pricing Calculator
//!
//! Turns a list of order lines into the five order totals.
//!
//! ```text
//! lines ──► Σ total price ──► total_amount
//!                                 │
//!                ┌────────────────┼────────────────┐
//!                ▼                ▼                ▼
//!           tax (10%)     service (5%)      discount (0)
//!                └────────────────┼────────────────┘
//!                                 ▼
//!          final = total + tax + service − discount
//! ```
//!
//! The calculator is pure. Callers recompute from the full item set every
//! time the set changes instead of adjusting the cached totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::menu::ResolvedLine;
use crate::money::{Money, Rate};
use crate::types::{OrderItem, OrderItemDetail};

/// Default tax rate: 10%.
pub const DEFAULT_TAX_RATE: Rate = Rate::from_bps(1000);

/// Default service charge rate: 5%.
pub const DEFAULT_SERVICE_RATE: Rate = Rate::from_bps(500);

// =============================================================================
// Configuration
// =============================================================================

/// Rates applied on top of the item subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub tax_rate: Rate,
    pub service_rate: Rate,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: DEFAULT_TAX_RATE,
            service_rate: DEFAULT_SERVICE_RATE,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Anything that contributes a line total to an order.
pub trait PricedLine {
    fn total_price(&self) -> Money;
}

impl PricedLine for ResolvedLine {
    fn total_price(&self) -> Money {
        self.total_price
    }
}

impl PricedLine for OrderItem {
    fn total_price(&self) -> Money {
        OrderItem::total_price(self)
    }
}

impl PricedLine for OrderItemDetail {
    fn total_price(&self) -> Money {
        self.item.total_price()
    }
}

/// The five monetary totals cached on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total_amount: Money,
    pub tax_amount: Money,
    pub service_charge: Money,
    pub discount_amount: Money,
    pub final_amount: Money,
}

/// Computes order totals from its lines.
///
/// ## Arguments
/// * `lines` - every line of the order, not just the newly added ones
/// * `config` - tax and service rates
///
/// ## Returns
/// Totals where each rate-derived component is rounded half-up to the cent.
/// Discount is always zero.
///
/// ## Example
/// ```rust
/// use bistro_core::money::Money;
/// use bistro_core::pricing::{calculate_totals, PricedLine, PricingConfig};
///
/// struct Line(i64);
/// impl PricedLine for Line {
///     fn total_price(&self) -> Money { Money::from_cents(self.0) }
/// }
///
/// let totals = calculate_totals(&[Line(2000)], &PricingConfig::default());
/// assert_eq!(totals.final_amount.cents(), 2300);
/// ```
pub fn calculate_totals<L: PricedLine>(lines: &[L], config: &PricingConfig) -> OrderTotals {
    let total_amount: Money = lines.iter().map(PricedLine::total_price).sum();
    let tax_amount = total_amount.apply_rate(config.tax_rate);
    let service_charge = total_amount.apply_rate(config.service_rate);
    let discount_amount = Money::zero();

    OrderTotals {
        total_amount,
        tax_amount,
        service_charge,
        discount_amount,
        final_amount: total_amount + tax_amount + service_charge - discount_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
