//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductKey    │   │    Product      │   │      Rate       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  "milk"         │   │  key            │   │  bps (u32)      │       │
//! │  │  (trimmed,      │   │  name "Milk"    │   │  1000 = 10%     │       │
//! │  │   lowercased)   │   │  price, stock   │   │   500 = 5%      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `key`: canonical lookup key, what the operator's input is matched against
//! - `name`: display name, what tables and receipts print

use std::fmt;

use crate::error::ValidationResult;
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_stock, validate_stock_value};

// =============================================================================
// Rate
// =============================================================================

/// Percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (sales tax), 500 bps = 5% (bulk discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rate(u32);

impl Rate {
    /// Basis points in 100%.
    pub const BPS_PER_WHOLE: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

/// Renders as a percentage without trailing zeros: `10%`, `8.25%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        let text = match frac {
            0 => format!("{}%", whole),
            tenths if tenths % 10 == 0 => format!("{}.{}%", whole, tenths / 10),
            hundredths => format!("{}.{:02}%", whole, hundredths),
        };
        f.pad(&text)
    }
}

// =============================================================================
// Product Key
// =============================================================================

/// Canonical product lookup key: trimmed and lowercased.
///
/// ```rust
/// use till_core::types::ProductKey;
///
/// assert_eq!(ProductKey::new("  MILK "), ProductKey::new("milk"));
/// assert_eq!(ProductKey::new("Milk").as_str(), "milk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey(String);

impl ProductKey {
    /// Normalizes operator input into a lookup key.
    pub fn new(name: &str) -> Self {
        ProductKey(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Stock is only changed by the inventory ledger; the fields are private so
/// nothing else can break the non-negative invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    key: ProductKey,
    name: String,
    price: Money,
    stock: i64,
    /// Stock at catalog load. Only used to flag restocks past the seed.
    seeded_stock: i64,
}

impl Product {
    /// Creates a product after validating its name, price and stock.
    ///
    /// The whole shelf (price × stock) must fit under the cart subtotal
    /// limit.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::Product;
    ///
    /// let milk = Product::new("Milk", Money::from_units(500), 10).unwrap();
    /// assert_eq!(milk.key().as_str(), "milk");
    ///
    /// assert!(Product::new("", Money::from_units(1), 1).is_err());
    /// assert!(Product::new("Milk", Money::from_units(1), -1).is_err());
    /// ```
    pub fn new(name: &str, price: Money, stock: i64) -> ValidationResult<Self> {
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;
        validate_stock_value(price, stock)?;

        let name = name.trim();
        Ok(Product {
            key: ProductKey::new(name),
            name: name.to_string(),
            price,
            stock,
            seeded_stock: stock,
        })
    }

    #[inline]
    pub fn key(&self) -> &ProductKey {
        &self.key
    }

    /// Display name shown in tables and on receipts.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Units currently available for reservation.
    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    #[inline]
    pub fn seeded_stock(&self) -> i64 {
        self.seeded_stock
    }

    /// Checks if `quantity` units can be reserved right now.
    pub fn can_reserve(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }

    pub(crate) fn take_stock(&mut self, quantity: i64) {
        debug_assert!(self.can_reserve(quantity));
        self.stock -= quantity;
    }

    /// Puts units back. `false` (stock unchanged) if the count would overflow.
    pub(crate) fn return_stock(&mut self, quantity: i64) -> bool {
        match self.stock.checked_add(quantity) {
            Some(stock) => {
                self.stock = stock;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert_eq!(Rate::zero(), Rate::from_bps(0));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_bps(1000).to_string(), "10%");
        assert_eq!(Rate::from_bps(500).to_string(), "5%");
        assert_eq!(Rate::from_bps(825).to_string(), "8.25%");
        assert_eq!(Rate::from_bps(750).to_string(), "7.5%");
        assert_eq!(Rate::from_bps(5).to_string(), "0.05%");
    }

    #[test]
    fn test_product_key_normalization() {
        assert_eq!(ProductKey::new(" Chicken\t").as_str(), "chicken");
        assert_eq!(ProductKey::new("JUICE"), ProductKey::new("juice"));
    }

    #[test]
    fn test_product_new_trims_name() {
        let p = Product::new("  Rice ", Money::from_units(1200), 15).unwrap();
        assert_eq!(p.name(), "Rice");
        assert_eq!(p.stock(), 15);
        assert_eq!(p.seeded_stock(), 15);
    }

    #[test]
    fn test_product_rejects_negative_price() {
        assert!(Product::new("Rice", Money::from_units(-1), 15).is_err());
    }

    #[test]
    fn test_product_rejects_shelf_value_past_limit() {
        let bar = Money::from_units(1_000_000_000_000);
        assert!(Product::new("Gold", bar, 2).is_ok());
        assert!(Product::new("Gold", bar, 10).is_err());
    }

    #[test]
    fn test_can_reserve() {
        let p = Product::new("Sugar", Money::from_units(700), 5).unwrap();
        assert!(p.can_reserve(5));
        assert!(!p.can_reserve(6));
        assert!(!p.can_reserve(0));
        assert!(!p.can_reserve(-1));
    }
}
