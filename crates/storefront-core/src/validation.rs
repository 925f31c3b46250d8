//! # Validation Module
//!
//! Input validation for catalog creation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API surface (serde)                                          │
//! │  └── Type validation (deserialization of named arguments)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation before anything is persisted             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK / foreign key constraints                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutation quantities are NOT validated here: the engine owns the
//! `InvalidQuantity` rule directly, since it is part of the operation
//! contract rather than catalog input hygiene.

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product title, returning the trimmed value.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(title.to_string())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial inventory count.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (out-of-stock product)
pub fn validate_inventory_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "inventory_count".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
