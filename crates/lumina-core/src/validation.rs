//! # Validation Module
//!
//! Input validation for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront markup (data-id, data-price attributes)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product shape (id, name, price)  → ValidationError                │
//! │  └── Quantity bounds [1, 99]          → CartError::OutOfRange          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Slot decoding (cart::Cart::decode)                           │
//! │  └── Persisted entries violating the same rules are discarded          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CartError, CartResult, ValidationError};
use crate::types::{LineItem, Product};
use crate::{MAX_ITEM_QUANTITY, MAX_UNIT_PRICE, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id.
const MAX_ID_LEN: usize = 128;

// =============================================================================
// Quantity
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be at least 1 (zero is not an alias for removal)
/// - Must not exceed 99
///
/// ## Example
/// ```rust
/// use lumina_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(99).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(100).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> CartResult<()> {
    if (MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY).contains(&qty) {
        Ok(())
    } else {
        Err(CartError::quantity_out_of_range(qty))
    }
}

// =============================================================================
// Product
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_UNIT_PRICE`
pub fn validate_price(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if amount > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a product id.
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product before it enters the cart.
///
/// ## Rules
/// - `id` present and at most 128 bytes
/// - `name` present
/// - `price` in `1..=MAX_UNIT_PRICE`
///
/// The image URL is display-only and is not checked.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id(&product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_price(product.price.amount())
}

/// Checks a persisted line item against the cart invariants.
pub fn is_valid_line_item(item: &LineItem) -> bool {
    validate_id(&item.id).is_ok()
        && validate_price(item.price.amount()).is_ok()
        && validate_quantity(item.quantity).is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Price;

    #[test]
    fn test_validate_quantity_bounds() {
        for qty in 1..=99 {
            assert!(validate_quantity(qty).is_ok(), "qty {qty} should be valid");
        }
        assert_eq!(
            validate_quantity(0),
            Err(CartError::quantity_out_of_range(0))
        );
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(1).is_ok());
        assert!(validate_price(250_000).is_ok());
        assert!(validate_price(0).is_err());
        assert!(validate_price(-100).is_err());
        assert!(validate_price(MAX_UNIT_PRICE + 1).is_err());
    }

    #[test]
    fn test_validate_product() {
        let ok = Product::new("p1", "Serum X", Price::new(250_000), "/img/p1.jpg");
        assert!(validate_product(&ok).is_ok());

        let no_id = Product::new("  ", "Serum X", Price::new(250_000), "");
        assert_eq!(
            validate_product(&no_id),
            Err(ValidationError::Required {
                field: "id".to_string()
            })
        );

        let no_name = Product::new("p1", "", Price::new(250_000), "");
        assert!(validate_product(&no_name).is_err());

        let free = Product::new("p1", "Sample", Price::new(0), "");
        assert!(validate_product(&free).is_err());

        let long_id = Product::new("x".repeat(200), "Serum", Price::new(1), "");
        assert!(validate_product(&long_id).is_err());
    }
}
