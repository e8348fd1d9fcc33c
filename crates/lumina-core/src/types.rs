//! # Domain Types
//!
//! Core domain types used throughout the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │  CartSnapshot   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id (unique)    │──►│  items          │       │
//! │  │  name           │   │  name, image    │   │  itemCount      │       │
//! │  │  price          │   │  price          │   │  totalPrice     │       │
//! │  │  image          │   │  quantity 1..99 │   │  totalDisplay   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CartChange    │   │   CartOutcome   │   │   CartCommand   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  ItemAdded      │   │  ok             │   │  Add            │       │
//! │  │  QuantityChanged│   │  reason?        │   │  Remove         │       │
//! │  │  ItemRemoved    │   │  direction?     │   │  SetQuantity    │       │
//! │  │  Cleared        │   └─────────────────┘   │  Increase/...   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Price;

// =============================================================================
// Product
// =============================================================================

/// A product as offered on the listing page (the `addItem` payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Product identifier, unique per line item.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in whole currency units.
    pub price: Price,

    /// Image URL.
    pub image: String,
}

impl Product {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// Field order is the persisted order:
/// `{"id":..,"name":..,"price":..,"image":..,"quantity":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: Price,
    pub image: String,
    #[ts(type = "number")]
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item at quantity 1.
    pub fn from_product(product: Product) -> Self {
        LineItem {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: crate::MIN_ITEM_QUANTITY,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Price {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Direction / Error Kind
// =============================================================================

/// Which way a quantity moved. Used purely for notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Direction {
    Increased,
    Decreased,
}

impl Direction {
    /// Direction from `old` to `new`, `None` when unchanged.
    pub fn between(old: i64, new: i64) -> Option<Self> {
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => Some(Direction::Increased),
            std::cmp::Ordering::Less => Some(Direction::Decreased),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Machine-readable failure reason carried by [`CartOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    NotFound,
    OutOfRange,
    EmptyCart,
    PersistenceError,
    NotConfirmed,
    InvalidProduct,
}

// =============================================================================
// Cart Change
// =============================================================================

/// A committed change to the cart.
///
/// The core signals these; consumers decide whether to show a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CartChange {
    /// A new line item was appended at quantity 1.
    ItemAdded { id: String },

    /// An existing line item's quantity was set.
    ///
    /// `direction` is `None` when the new quantity equals the old one.
    QuantityChanged {
        id: String,
        #[ts(type = "number")]
        from: i64,
        #[ts(type = "number")]
        to: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        #[ts(optional)]
        direction: Option<Direction>,
    },

    /// A line item was removed.
    ItemRemoved { id: String },

    /// All line items were removed.
    Cleared { removed: usize },

    /// `clear` on a cart that was already empty. Nothing was written.
    AlreadyEmpty,
}

impl CartChange {
    /// Whether the cart content changed (and must be persisted).
    pub fn is_mutation(&self) -> bool {
        match self {
            CartChange::AlreadyEmpty => false,
            CartChange::QuantityChanged { from, to, .. } => from != to,
            _ => true,
        }
    }

    /// Direction hint for quantity changes.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            CartChange::QuantityChanged { direction, .. } => *direction,
            _ => None,
        }
    }
}

// =============================================================================
// Cart Outcome
// =============================================================================

/// The consumer-facing result object: `{ ok, reason?, direction? }`.
///
/// ## Example
/// ```rust
/// use lumina_core::{CartError, CartOutcome, ErrorKind};
///
/// let outcome = CartOutcome::from(&Err::<lumina_core::CartChange, _>(CartError::EmptyCart));
/// assert!(!outcome.ok);
/// assert_eq!(outcome.reason, Some(ErrorKind::EmptyCart));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartOutcome {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub reason: Option<ErrorKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub direction: Option<Direction>,
}

impl CartOutcome {
    /// A successful outcome without a direction hint.
    pub fn success() -> Self {
        CartOutcome {
            ok: true,
            reason: None,
            direction: None,
        }
    }

    /// A failed outcome with the given reason.
    pub fn failure(reason: ErrorKind) -> Self {
        CartOutcome {
            ok: false,
            reason: Some(reason),
            direction: None,
        }
    }
}

impl From<&CartResult<CartChange>> for CartOutcome {
    fn from(result: &CartResult<CartChange>) -> Self {
        match result {
            Ok(change) => CartOutcome {
                ok: true,
                reason: None,
                direction: change.direction(),
            },
            Err(err) => CartOutcome::failure(err.kind()),
        }
    }
}

impl From<&CartResult<CheckoutStatus>> for CartOutcome {
    fn from(result: &CartResult<CheckoutStatus>) -> Self {
        match result {
            Ok(_) => CartOutcome::success(),
            Err(err) => CartOutcome::failure(err.kind()),
        }
    }
}

impl From<&CartError> for CartOutcome {
    fn from(err: &CartError) -> Self {
        CartOutcome::failure(err.kind())
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Result of a checkout request. Payment is not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CheckoutStatus {
    /// The cart is non-empty but checkout is not available yet.
    ComingSoon,
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Read model for render consumers (cart page, header badge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    #[ts(type = "number")]
    pub item_count: i64,
    pub total_price: Price,
    pub total_display: String,
}

// =============================================================================
// Cart Command
// =============================================================================

/// A mutating cart operation in data form.
///
/// Lets an adapter forward a decoded UI message with a single `apply` call:
/// ```json
/// {"op":"setQuantity","id":"p1","quantity":3}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "camelCase")]
#[ts(export)]
pub enum CartCommand {
    Add { product: Product },
    Remove { id: String, confirmed: bool },
    SetQuantity {
        id: String,
        #[ts(type = "number")]
        quantity: i64,
    },
    Increase { id: String },
    Decrease { id: String },
    Clear { confirmed: bool },
}

// =============================================================================
// Unit Tests
// =============================================================================
