//! # Cart State Machine
//!
//! The ordered, id-unique collection of line items and the only legal ways
//! to change it.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation              Guard                     Change                │
//! │  ─────────              ─────                     ──────                │
//! │  add_item(product)      valid product, qty < 99   push / qty + 1        │
//! │  set_quantity(id, q)    id present, q in [1,99]   items[i].qty = q      │
//! │  increase/decrease(id)  same as set_quantity      qty ± 1               │
//! │  remove_item(id, ok)    id present, ok == true    items.remove(i)       │
//! │  clear(ok)              ok == true                items.clear()         │
//! │                                                                         │
//! │  States: {empty, non-empty}. No terminal state.                        │
//! │  Every guard runs BEFORE anything is touched, so an Err always         │
//! │  leaves the cart exactly as it was.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `quantity` is always in `[1, 99]`
//! - no two items share an `id`
//! - insertion order is display order

use serde::Serialize;

use crate::error::{CartError, CartResult};
use crate::money::Price;
use crate::types::{
    CartChange, CartCommand, CartSnapshot, CheckoutStatus, Direction, LineItem, Product,
};
use crate::validation::{is_valid_line_item, validate_product, validate_quantity};

// =============================================================================
// Cart
// =============================================================================

/// The cart state for one browsing session.
///
/// Serializes as a bare JSON array of line items, the persisted slot layout.
/// No `Deserialize`: [`Cart::decode`] is the only way in and re-checks
/// every invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product or increments its quantity when already present.
    ///
    /// ## Behavior
    /// - Not in cart: appended at quantity 1 (arrival order preserved)
    /// - In cart: quantity + 1, rejected with `OutOfRange` at 99
    pub fn add_item(&mut self, product: Product) -> CartResult<CartChange> {
        validate_product(&product)?;

        if self.contains(&product.id) {
            return self.increase_quantity(&product.id);
        }

        let id = product.id.clone();
        self.items.push(LineItem::from_product(product));
        Ok(CartChange::ItemAdded { id })
    }

    /// Replaces the quantity of an existing item.
    ///
    /// Zero is rejected with `OutOfRange`, not treated as removal.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> CartResult<CartChange> {
        let index = self.position(id)?;
        validate_quantity(quantity)?;

        let item = &mut self.items[index];
        let from = item.quantity;
        item.quantity = quantity;

        Ok(CartChange::QuantityChanged {
            id: id.to_string(),
            from,
            to: quantity,
            direction: Direction::between(from, quantity),
        })
    }

    /// `set_quantity(id, qty + 1)`.
    pub fn increase_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        let current = self.quantity_of(id)?;
        self.set_quantity(id, current + 1)
    }

    /// `set_quantity(id, qty - 1)`. Rejected at 1: use `remove_item` instead.
    pub fn decrease_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        let current = self.quantity_of(id)?;
        self.set_quantity(id, current - 1)
    }

    /// Removes one item once the caller has confirmed.
    pub fn remove_item(&mut self, id: &str, confirmed: bool) -> CartResult<CartChange> {
        let index = self.position(id)?;

        if !confirmed {
            return Err(CartError::NotConfirmed);
        }

        self.items.remove(index);
        Ok(CartChange::ItemRemoved { id: id.to_string() })
    }

    /// Empties the cart once the caller has confirmed.
    pub fn clear(&mut self, confirmed: bool) -> CartResult<CartChange> {
        if !confirmed {
            return Err(CartError::NotConfirmed);
        }

        if self.items.is_empty() {
            return Ok(CartChange::AlreadyEmpty);
        }

        let removed = self.items.len();
        self.items.clear();
        Ok(CartChange::Cleared { removed })
    }

    /// Dispatches a [`CartCommand`] to the matching operation.
    pub fn apply(&mut self, command: CartCommand) -> CartResult<CartChange> {
        match command {
            CartCommand::Add { product } => self.add_item(product),
            CartCommand::Remove { id, confirmed } => self.remove_item(&id, confirmed),
            CartCommand::SetQuantity { id, quantity } => self.set_quantity(&id, quantity),
            CartCommand::Increase { id } => self.increase_quantity(&id),
            CartCommand::Decrease { id } => self.decrease_quantity(&id),
            CartCommand::Clear { confirmed } => self.clear(confirmed),
        }
    }

    /// Checkout stub: refuses an empty cart, otherwise reports "coming soon".
    pub fn checkout(&self) -> CartResult<CheckoutStatus> {
        if self.items.is_empty() {
            Err(CartError::EmptyCart)
        } else {
            Ok(CheckoutStatus::ComingSoon)
        }
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Ordered, read-only view of the line items.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up one line item.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Existence check ("already in cart").
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of quantities over all items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `price * quantity` over all items.
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Read model for render consumers.
    pub fn snapshot(&self) -> CartSnapshot {
        let total_price = self.total_price();
        CartSnapshot {
            items: self.items.clone(),
            item_count: self.item_count(),
            total_price,
            total_display: total_price.format(),
        }
    }

    fn position(&self, id: &str) -> CartResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CartError::not_found(id))
    }

    fn quantity_of(&self, id: &str) -> CartResult<i64> {
        self.get(id)
            .map(|i| i.quantity)
            .ok_or_else(|| CartError::not_found(id))
    }

    // =========================================================================
    // Persisted Encoding
    // =========================================================================

    /// Encodes the cart as the persisted JSON array.
    pub fn encode(&self) -> String {
        // Vec<LineItem> of plain strings and integers cannot fail to encode.
        serde_json::to_string(&self.items).unwrap_or_else(|_| String::from("[]"))
    }

    /// Decodes a persisted slot, never failing.
    ///
    /// ## Decoding Rules
    /// ```text
    /// slot absent             → empty cart, SlotState::Absent
    /// not a JSON array        → empty cart, SlotState::Corrupt
    /// JSON array              → SlotState::Restored, with entries that are
    ///                           not line items (missing or mistyped field)
    ///                           or break an invariant (bad quantity, bad
    ///                           price, empty id, duplicate id) discarded
    /// ```
    pub fn decode(raw: Option<&str>) -> (Cart, DecodeReport) {
        let Some(raw) = raw else {
            return (Cart::new(), DecodeReport::new(SlotState::Absent));
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(_) => return (Cart::new(), DecodeReport::new(SlotState::Corrupt)),
        };

        let mut cart = Cart::new();
        let mut discarded = 0;
        for entry in entries {
            match serde_json::from_value::<LineItem>(entry) {
                Ok(item) if is_valid_line_item(&item) && !cart.contains(&item.id) => {
                    cart.items.push(item);
                }
                _ => discarded += 1,
            }
        }

        let report = DecodeReport {
            state: SlotState::Restored,
            restored: cart.len(),
            discarded,
        };
        (cart, report)
    }
}

// =============================================================================
// Decode Report
// =============================================================================

/// What was found in the persisted slot at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No value stored under the key.
    Absent,
    /// A JSON array was decoded.
    Restored,
    /// The stored value was not a JSON array.
    Corrupt,
}

/// Summary of [`Cart::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub state: SlotState,
    pub restored: usize,
    pub discarded: usize,
}

impl DecodeReport {
    fn new(state: SlotState) -> Self {
        DecodeReport {
            state,
            restored: 0,
            discarded: 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
