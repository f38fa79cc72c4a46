//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Stock, cart and checkout rule violations       │
//! │  └── ValidationError  - Malformed input and catalog data               │
//! │                                                                         │
//! │  till-cli errors (app crate)                                           │
//! │  └── AppError         - Terminal I/O and configuration failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → printed, operator re-prompted     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is recoverable: the menu loop prints it and asks again.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the inventory ledger and the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No product in the catalog matches the (normalized) name.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Quantity is zero, negative or not a whole number.
    #[error("Invalid quantity '{input}': enter a whole number greater than zero")]
    InvalidQuantity { input: String },

    /// Requested more than is currently on the shelf.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (Sugar, qty: 9)
    ///      │
    ///      ▼
    /// reserve: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Sugar", available: 5, requested: 9 }
    ///      │
    ///      ▼
    /// Stock untouched, operator re-prompted
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Tried to remove a product that has no line in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(String),

    /// Checkout attempted with no lines.
    #[error("Cart is empty. Add items before checkout.")]
    EmptyCart,

    /// Adding the product would take the cart subtotal past `max`. The
    /// reservation is released and the cart left as it was.
    #[error("Cannot add {product}: cart subtotal would exceed {max}")]
    SubtotalLimit { product: String, max: Money },

    /// Amount received is below the total due. The cart is left untouched so
    /// the operator can retry with a larger amount.
    ///
    /// `due` may carry sub-cent digits; the message shows the smallest
    /// whole-cent payment that covers it.
    #[error("Insufficient payment: received {paid}, due {}", .due.round_up_to_cent())]
    InsufficientPayment { due: Money, paid: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two catalog entries with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Sugar".to_string(),
            available: 5,
            requested: 9,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Sugar: available 5, requested 9"
        );

        let err = CoreError::InsufficientPayment {
            due: Money::from_units(1650),
            paid: Money::from_units(1000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: received $1000.00, due $1650.00"
        );
    }

    #[test]
    fn test_insufficient_payment_shows_the_next_cent() {
        // 5225.01045 displays as $5225.01 but needs $5225.02
        let err = CoreError::InsufficientPayment {
            due: Money::from_micros(5_225_010_450),
            paid: Money::from_cents(522_501),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: received $5225.01, due $5225.02"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "product".to_string(),
            value: "Milk".to_string(),
        };
        assert_eq!(err.to_string(), "product 'Milk' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
