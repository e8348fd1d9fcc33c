//! # Error Types
//!
//! Domain-specific error types for lumina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lumina-core errors (this file)                                        │
//! │  ├── CartError        - Result of a refused cart operation             │
//! │  └── ValidationError  - Malformed product input                        │
//! │                                                                         │
//! │  lumina-store / lumina-db errors (separate crates)                     │
//! │  └── StorageError / DbError - folded into CartError::Persistence       │
//! │                                                                         │
//! │  Consumers see ErrorKind (serialized) and a Notice (wording)           │
//! │                                                                         │
//! │  Flow: StorageError → CartError → ErrorKind → UI message               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected business conditions (missing id, quantity out of range, empty
//! cart checkout) are plain `Err` values, never panics.

use thiserror::Error;

use crate::types::ErrorKind;

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation was refused.
///
/// Every variant leaves the cart exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The operation referenced an id that is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(String),

    /// The requested quantity is outside `[min, max]`.
    ///
    /// ## When This Occurs
    /// - `set_quantity` with 0 or 100
    /// - `decrease_quantity` on an item at 1 (requested = 0)
    /// - `add_item`/`increase_quantity` on an item at 99 (requested = 100)
    #[error("Quantity {requested} is outside the allowed range {min}..={max}")]
    OutOfRange { requested: i64, min: i64, max: i64 },

    /// Checkout attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A destructive operation was called without confirmation.
    #[error("Operation was not confirmed")]
    NotConfirmed,

    /// The durable write failed; the in-memory change was rolled back.
    #[error("Failed to persist cart: {0}")]
    Persistence(String),

    /// The product passed to `add_item` is malformed.
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),
}

impl CartError {
    /// Machine-readable kind for the consumer-facing result object.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::OutOfRange { .. } => ErrorKind::OutOfRange,
            CartError::EmptyCart => ErrorKind::EmptyCart,
            CartError::NotConfirmed => ErrorKind::NotConfirmed,
            CartError::Persistence(_) => ErrorKind::PersistenceError,
            CartError::Validation(_) => ErrorKind::InvalidProduct,
        }
    }

    /// Creates a NotFound error for the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        CartError::NotFound(id.into())
    }

    /// Creates an OutOfRange error against the line item quantity bounds.
    pub fn quantity_out_of_range(requested: i64) -> Self {
        CartError::OutOfRange {
            requested,
            min: crate::MIN_ITEM_QUANTITY,
            max: crate::MAX_ITEM_QUANTITY,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::quantity_out_of_range(100);
        assert_eq!(
            err.to_string(),
            "Quantity 100 is outside the allowed range 1..=99"
        );
        assert_eq!(CartError::not_found("p1").to_string(), "Product not in cart: p1");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CartError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(CartError::quantity_out_of_range(0).kind(), ErrorKind::OutOfRange);
        assert_eq!(CartError::EmptyCart.kind(), ErrorKind::EmptyCart);
        assert_eq!(CartError::NotConfirmed.kind(), ErrorKind::NotConfirmed);
        assert_eq!(
            CartError::Persistence("disk full".into()).kind(),
            ErrorKind::PersistenceError
        );
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
        assert_eq!(cart_err.kind(), ErrorKind::InvalidProduct);
    }
}
