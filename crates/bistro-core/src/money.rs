//! # Money Module
//!
//! `Money` and `Rate` types for handling menu prices and order charges.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  An order with 30 lines summed as floats drifts by fractions of a      │
//! │  cent, and the printed bill no longer matches the stored total.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis-Point Rates                        │
//! │    price:  1099 cents                                                   │
//! │    tax:    1000 bps (10%)                                               │
//! │    charge: (1099 × 1000 + 5000) / 10000 = 110 cents                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::{Money, Rate};
//!
//! let burger = Money::from_cents(1000);
//! let line = burger.multiply_quantity(2);
//! assert_eq!(line.cents(), 2000);
//!
//! let tax = line.apply_rate(Rate::from_bps(1000));
//! assert_eq!(tax.cents(), 200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// MenuItem.base_price ──┐
///                       ├──► unit price ──► line total ──► order totals
/// MenuVariant.price_add ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by an ordered quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(450);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 1350);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a rate (tax, service charge) and rounds half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the
    /// half-cent that turns truncation into rounding.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::{Money, Rate};
    ///
    /// // $10.05 at 5% = $0.5025 → 50 cents
    /// let charge = Money::from_cents(1005).apply_rate(Rate::from_bps(500));
    /// assert_eq!(charge.cents(), 50);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 so that large orders cannot overflow the intermediate product
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10% (default tax), 500 bps = 5% (default service charge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a fraction (`0.10` → 1000 bps).
    ///
    /// Used when reading rates from configuration, where operators write
    /// fractions. Negative input clamps to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        Rate((fraction * 10_000.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
