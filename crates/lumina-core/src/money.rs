//! # Money Module
//!
//! Provides the `Price` type for whole-unit currency amounts.
//!
//! ## Why Integer Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Storefront prices are whole đồng (no minor unit), so an i64 holds      │
//! │  them exactly and every total is exact integer arithmetic:             │
//! │    250000 × 3 + 99000 = 849000                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Sums and products saturate at `i64::MAX` (about 9.2 × 10¹⁸ đồng) instead
//! of wrapping or panicking. A valid line tops out at
//! `MAX_UNIT_PRICE × 99`, so only carts of roughly 93,000 such lines reach it.
//!
//! ## Display
//! Prices render in the storefront's fixed convention: thousands grouped with
//! `.`, a space, then the `₫` suffix.
//!
//! ```rust
//! use lumina_core::money::Price;
//!
//! assert_eq!(Price::new(250_000).to_string(), "250.000 ₫");
//! assert_eq!(Price::new(0).to_string(), "0 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// Thousands separator used by the display format.
const GROUP_SEPARATOR: char = '.';

/// Currency suffix used by the display format.
const CURRENCY_SUFFIX: &str = "₫";

// =============================================================================
// Price Type
// =============================================================================

/// A currency amount in whole units.
///
/// Serializes as a bare integer, so the persisted slot stays
/// `{"price":250000}`.
///
/// ## Where Price is Used
/// ```text
/// Product.price ──► LineItem.price ──► LineItem::line_total()
///                                           │
///                                           ▼
///                                Cart::total_price() ──► "849.000 ₫"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price(#[ts(type = "number")] i64);

impl Price {
    /// Creates a price from whole currency units.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Price(amount)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use lumina_core::money::Price;
    ///
    /// let unit = Price::new(250_000);
    /// assert_eq!(unit.multiply_quantity(3).amount(), 750_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Price(self.0.saturating_mul(qty))
    }

    /// Formats the amount with grouped thousands and the currency suffix.
    ///
    /// Pure function of the integer, so it is safe for golden-output tests.
    pub fn format(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{grouped} {CURRENCY_SUFFIX}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::zero()
    }
}

impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Price {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Price {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Price(self.0.saturating_mul(qty))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), Add::add)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Price(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
