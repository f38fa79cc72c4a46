//! # Validation Module
//!
//! Input validation and parsing for operator-entered text.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal prompt (till-cli)                                   │
//! │  └── Reads one raw line                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → number (quantity, amount)                                  │
//! │  └── Catalog data rules (name, price, stock)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory / Cart                                             │
//! │  └── Stock and payment rules                                           │
//! │                                                                         │
//! │  Malformed input is an error value, never a panic                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_quantity, parse_payment};
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("three").is_err());
//! assert!(parse_payment("2000").is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::{Money, MAX_SUBTOTAL, MICROS_PER_UNIT};
use crate::types::Rate;

/// Longest product name accepted in a catalog.
pub const MAX_PRODUCT_NAME_LEN: usize = 40;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name for the catalog.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 40 characters (keeps the fixed-width tables aligned)
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity to reserve or release.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Operator enters quantity: 5                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → InvalidQuantity                                  │
/// │       │                                                                 │
/// │       └── OK → Inventory::reserve                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity {
            input: qty.to_string(),
        });
    }
    Ok(())
}

/// Parses a quantity typed by the operator.
///
/// Non-numeric text is reported exactly like a non-positive number.
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let trimmed = input.trim();
    let qty: i64 = trimmed.parse().map_err(|_| CoreError::InvalidQuantity {
        input: trimmed.to_string(),
    })?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates a catalog price.
///
/// Zero is allowed (free items); negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a seeded stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates that a product's whole shelf can sit in one cart.
///
/// price × stock must not exceed the cart subtotal limit, so a catalog loaded
/// from configuration can never drive cart arithmetic past `i64`.
pub fn validate_stock_value(price: Money, stock: i64) -> ValidationResult<()> {
    let fits = price
        .checked_mul_quantity(stock)
        .is_some_and(|value| value <= MAX_SUBTOTAL);
    if !fits {
        return Err(ValidationError::OutOfRange {
            field: "price × stock".to_string(),
            min: 0,
            max: MAX_SUBTOTAL.micros() / MICROS_PER_UNIT,
        });
    }
    Ok(())
}

/// Parses the amount received from the customer.
///
/// ## Rules
/// - Must be a decimal number (`2000`, `1650.50`, `$20`)
/// - Must not be negative
///
/// Whether it covers the total due is checked at checkout, not here.
pub fn parse_payment(input: &str) -> ValidationResult<Money> {
    let amount: Money = input.parse()?;
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "amount".to_string(),
        });
    }
    Ok(amount)
}

/// Validates a configured rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_rate(rate: Rate) -> ValidationResult<()> {
    if rate.bps() > Rate::BPS_PER_WHOLE {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: Rate::BPS_PER_WHOLE as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
