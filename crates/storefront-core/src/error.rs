//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart/catalog business failures                 │
//! │  └── ValidationError  - Catalog input validation failures              │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │       └── bridged into CoreError::Store via StoreError                 │
//! │                                                                         │
//! │  api-server errors (in app)                                            │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, counts)
//! 3. Errors are enum variants, never String
//! 4. No error is retried internally; a failure aborts the operation and
//!    leaves already-applied writes in place

use thiserror::Error;

use crate::store::StoreError;

// =============================================================================
// Core Error
// =============================================================================

/// Cart-mutation and catalog business failures.
///
/// Every operation failure the API surface can report originates here (or in
/// the store layer, bridged through [`CoreError::Store`]).
#[derive(Debug, Error)]
pub enum CoreError {
    /// AddItem/RemoveItem was called with a non-positive quantity.
    #[error("Quantity must be a positive integer, got {qty}")]
    InvalidQuantity { qty: i64 },

    /// Cart id does not resolve to a cart.
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// Product id does not resolve to a product.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// RemoveItem targeted a (cart, product) pair with no live line item.
    #[error("Product {product_id} is not in cart {cart_id}")]
    ItemNotInCart {
        cart_id: String,
        product_id: String,
    },

    /// The cart has already been completed; completion is terminal and not
    /// idempotent, and a completed cart admits no further mutation.
    #[error("Cart {0} is already completed")]
    CartAlreadyCompleted(String),

    /// A line item's quantity exceeds its product's available inventory.
    ///
    /// ## When This Occurs
    /// Only at completion: adding to a cart never checks stock, so carts may
    /// be over-subscribed until completion is attempted.
    #[error("Insufficient inventory for {title}: available {available}, requested {requested}")]
    InsufficientInventory {
        title: String,
        available: i64,
        requested: i64,
    },

    /// A line item references a product that no longer exists.
    #[error("Cart item {item_id} references missing product {product_id}")]
    DanglingCartItem {
        item_id: String,
        product_id: String,
    },

    /// Underlying persistence failure.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// Catalog input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog creation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CoreError::InsufficientInventory {
            title: "Widget".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient inventory for Widget: available 3, requested 5"
        );

        let err = CoreError::InvalidQuantity { qty: -2 };
        assert_eq!(err.to_string(), "Quantity must be a positive integer, got -2");
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn store_error_converts_to_core_error() {
        let store_err = StoreError::new("connection reset");
        let core_err: CoreError = store_err.into();
        assert_eq!(core_err.to_string(), "Store failure: connection reset");
    }
}
