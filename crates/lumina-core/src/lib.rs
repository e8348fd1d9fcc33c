//! # lumina-core: Pure Cart Logic for the Lumina Storefront
//!
//! This crate is the **heart** of the storefront cart. It owns the cart state
//! machine, its invariants and its projections, as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lumina Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Consumers (render, notify, CLI adapter)            │   │
//! │  │    Product list ──► Cart page ──► Header badge ──► Toasts       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ operations / projections              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            CartStore (lumina-store) / DbCartStore (lumina-db)   │   │
//! │  │            persist every mutation, roll back on failure         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lumina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  notice   │  │   │
//! │  │   │ LineItem  │  │   Price   │  │   Cart    │  │  Notice   │  │   │
//! │  │   │ Product   │  │  "₫" fmt  │  │ CartChange│  │  wording  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO DOM • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, CartOutcome, ...)
//! - [`money`] - Price type with integer arithmetic and display formatting
//! - [`cart`] - The cart state machine and its persisted encoding
//! - [`error`] - Cart and validation errors
//! - [`validation`] - Quantity, price and product rules
//! - [`notice`] - Human-readable notification wording
//!
//! ## Example Usage
//!
//! ```rust
//! use lumina_core::{Cart, Product, Price};
//!
//! let mut cart = Cart::new();
//! cart.add_item(Product::new("a", "A", Price::new(100_000), "x")).unwrap();
//! cart.add_item(Product::new("a", "A", Price::new(100_000), "x")).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total_price().to_string(), "200.000 ₫");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod notice;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, DecodeReport, SlotState};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Price;
pub use notice::{Notice, NoticeLevel};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key of the persisted cart slot.
pub const CART_STORAGE_KEY: &str = "cart";

/// Minimum quantity of a line item.
///
/// A line item never sits at zero: it is either at least one or removed.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single line item.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Largest accepted unit price.
///
/// Keeps `price * quantity` sums exact in `i64` for any realistic cart.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;
