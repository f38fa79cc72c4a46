//! # Checkout
//!
//! Discount and tax sequencing, payment validation and cart finalization.
//!
//! ## Arithmetic Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal   = Σ unit_price × quantity                                   │
//! │  discount   = subtotal × 5%     only if subtotal > 5000.00 (strict)     │
//! │  tax        = (subtotal − discount) × 10%                               │
//! │  total_due  = (subtotal − discount) + tax                               │
//! │                                                                         │
//! │  paid < total_due  → InsufficientPayment, cart untouched                │
//! │  paid ≥ total_due  → change = paid − total_due, receipt, cart cleared   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is never touched here: every unit was reserved when it was added.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::Rate;
use crate::validation::validate_rate;

/// Default sales tax: 10%.
pub const DEFAULT_TAX_RATE: Rate = Rate::from_bps(1000);

/// Default bulk discount: 5%.
pub const DEFAULT_DISCOUNT_RATE: Rate = Rate::from_bps(500);

/// Subtotals strictly above this get the bulk discount.
pub const DEFAULT_DISCOUNT_THRESHOLD: Money = Money::from_units(5000);

// =============================================================================
// Pricing Policy
// =============================================================================

/// The store's discount and tax rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub discount_threshold: Money,
    pub discount_rate: Rate,
    pub tax_rate: Rate,
}

impl PricingPolicy {
    /// Builds a policy, rejecting rates above 100% and negative thresholds.
    pub fn new(discount_threshold: Money, discount_rate: Rate, tax_rate: Rate) -> ValidationResult<Self> {
        if discount_threshold.is_negative() {
            return Err(ValidationError::Negative {
                field: "discount_threshold".to_string(),
            });
        }
        validate_rate(discount_rate)?;
        validate_rate(tax_rate)?;

        Ok(PricingPolicy {
            discount_threshold,
            discount_rate,
            tax_rate,
        })
    }

    /// Steps 2 to 5 of checkout for a given subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::checkout::PricingPolicy;
    /// use till_core::money::Money;
    ///
    /// let quote = PricingPolicy::default().quote(Money::from_units(14_400));
    /// assert_eq!(quote.discount, Money::from_units(720));
    /// assert_eq!(quote.tax, Money::from_units(1368));
    /// assert_eq!(quote.total_due, Money::from_units(15_048));
    /// ```
    pub fn quote(&self, subtotal: Money) -> Quote {
        let discount = if subtotal > self.discount_threshold {
            subtotal.apply_rate(self.discount_rate)
        } else {
            Money::zero()
        };
        let taxable = subtotal - discount;
        let tax = taxable.apply_rate(self.tax_rate);

        Quote {
            subtotal,
            discount,
            tax,
            total_due: taxable + tax,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            discount_threshold: DEFAULT_DISCOUNT_THRESHOLD,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

// =============================================================================
// Quote / Summary / Receipt
// =============================================================================

/// Totals before payment. Shown to the operator as the checkout summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total_due: Money,
}

/// Totals after a sufficient payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total_due: Money,
    pub amount_paid: Money,
    pub change: Money,
}

/// Everything needed to print a receipt. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: Uuid,
    pub completed_at: DateTime<Utc>,
    /// Cart lines as they were at payment time.
    pub lines: Vec<CartLine>,
    pub summary: TransactionSummary,
}

// =============================================================================
// Cart Checkout
// =============================================================================

impl Cart {
    /// Computes the totals without taking payment.
    pub fn quote(&self, policy: &PricingPolicy) -> CoreResult<Quote> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(policy.quote(self.subtotal()))
    }

    /// Takes payment and finalizes the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout Summary: Total $1650.00
    ///      │
    ///      ▼
    /// Enter amount received: 1000
    ///      │
    ///      ▼
    /// InsufficientPayment ──► cart kept, operator asked again
    ///      │
    ///      ▼
    /// Enter amount received: 2000
    ///      │
    ///      ▼
    /// Receipt (change $350.00), cart cleared
    /// ```
    pub fn checkout(&mut self, policy: &PricingPolicy, amount_paid: Money) -> CoreResult<Receipt> {
        let quote = self.quote(policy)?;

        if amount_paid < quote.total_due {
            debug!(due = %quote.total_due, paid = %amount_paid, "payment refused");
            return Err(CoreError::InsufficientPayment {
                due: quote.total_due,
                paid: amount_paid,
            });
        }

        let receipt = Receipt {
            transaction_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            lines: self.lines().to_vec(),
            summary: TransactionSummary {
                subtotal: quote.subtotal,
                discount: quote.discount,
                tax: quote.tax,
                total_due: quote.total_due,
                amount_paid,
                change: amount_paid - quote.total_due,
            },
        };
        self.clear();

        info!(
            transaction_id = %receipt.transaction_id,
            lines = receipt.lines.len(),
            total = %receipt.summary.total_due,
            "checkout completed"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, StockLedger};
    use crate::types::Product;

    fn cart_with(inventory: &mut Inventory, name: &str, qty: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_to_cart(inventory, name, qty).unwrap();
        cart
    }

    #[test]
    fn test_discount_boundary_is_strict() {
        let policy = PricingPolicy::default();

        let at = policy.quote(Money::from_units(5000));
        assert_eq!(at.discount, Money::zero());
        assert_eq!(at.tax, Money::from_units(500));
        assert_eq!(at.total_due, Money::from_units(5500));

        let above = policy.quote(Money::from_cents(500_001));
        assert_eq!(above.discount, "250.0005".parse::<Money>().unwrap());
        assert_eq!(above.tax, "475.00095".parse::<Money>().unwrap());
        assert_eq!(above.total_due, "5225.01045".parse::<Money>().unwrap());
    }

    #[test]
    fn test_empty_cart_cannot_checkout() {
        let mut cart = Cart::new();
        let policy = PricingPolicy::default();
        assert_eq!(cart.quote(&policy), Err(CoreError::EmptyCart));
        assert_eq!(
            cart.checkout(&policy, Money::from_units(100)),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_milk_scenario() {
        let mut inventory = Inventory::seeded();
        let mut cart = cart_with(&mut inventory, "Milk", 3);
        assert_eq!(inventory.get("Milk").unwrap().stock(), 7);

        let policy = PricingPolicy::default();
        let quote = cart.quote(&policy).unwrap();
        assert_eq!(quote.subtotal, Money::from_units(1500));
        assert_eq!(quote.discount, Money::zero());
        assert_eq!(quote.tax, Money::from_units(150));
        assert_eq!(quote.total_due, Money::from_units(1650));

        let receipt = cart.checkout(&policy, Money::from_units(2000)).unwrap();
        assert_eq!(receipt.summary.change, Money::from_units(350));
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].quantity, 3);
        assert!(cart.is_empty());
        assert_eq!(inventory.get("Milk").unwrap().stock(), 7);
    }

    #[test]
    fn test_rice_scenario_gets_discount() {
        let mut inventory = Inventory::seeded();
        let cart = cart_with(&mut inventory, "Rice", 12);

        let quote = cart.quote(&PricingPolicy::default()).unwrap();
        assert_eq!(quote.subtotal, Money::from_units(14_400));
        assert_eq!(quote.discount, Money::from_units(720));
        assert_eq!(quote.tax, Money::from_units(1368));
        assert_eq!(quote.total_due, Money::from_units(15_048));
    }

    #[test]
    fn test_exact_payment_gives_zero_change() {
        let mut inventory = Inventory::seeded();
        let mut cart = cart_with(&mut inventory, "Bread", 2);

        let receipt = cart
            .checkout(&PricingPolicy::default(), Money::from_units(660))
            .unwrap();
        assert!(receipt.summary.change.is_zero());
        assert_eq!(receipt.summary.amount_paid, Money::from_units(660));
    }

    #[test]
    fn test_one_cent_short_keeps_cart() {
        let mut inventory = Inventory::seeded();
        let mut cart = cart_with(&mut inventory, "Bread", 2);
        let policy = PricingPolicy::default();

        let result = cart.checkout(&policy, Money::from_cents(65_999));
        assert_eq!(
            result,
            Err(CoreError::InsufficientPayment {
                due: Money::from_units(660),
                paid: Money::from_cents(65_999),
            })
        );
        assert_eq!(cart.line("Bread").unwrap().quantity, 2);
        assert_eq!(inventory.get("Bread").unwrap().stock(), 6);

        // retry with enough succeeds
        assert!(cart.checkout(&policy, Money::from_units(700)).is_ok());
    }

    #[test]
    fn test_sub_cent_total_needs_the_next_cent() {
        let mut inventory = Inventory::from_products([
            Product::new("Telly", Money::from_cents(500_001), 1).unwrap(),
        ])
        .unwrap();
        let mut cart = cart_with(&mut inventory, "Telly", 1);
        let policy = PricingPolicy::default();

        // total due is 5225.01045
        assert!(cart.checkout(&policy, Money::from_cents(522_501)).is_err());
        let receipt = cart.checkout(&policy, Money::from_cents(522_502)).unwrap();
        assert_eq!(receipt.summary.change, "0.00955".parse::<Money>().unwrap());
    }

    #[test]
    fn test_checkout_does_not_release_stock() {
        let mut inventory = Inventory::seeded();
        let mut cart = cart_with(&mut inventory, "Fish", 6);
        cart.checkout(&PricingPolicy::default(), Money::from_units(20_000))
            .unwrap();

        assert_eq!(inventory.get("Fish").unwrap().stock(), 0);
        // sold units are gone from the cart, so nothing can be released
        assert!(matches!(
            cart.remove_from_cart(&mut inventory, "Fish"),
            Err(CoreError::NotInCart(_))
        ));
        assert!(inventory.release("Fish", 1).is_ok());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy::new(Money::from_units(100), Rate::from_bps(1000), Rate::zero())
            .unwrap();
        let quote = policy.quote(Money::from_units(200));
        assert_eq!(quote.discount, Money::from_units(20));
        assert_eq!(quote.tax, Money::zero());
        assert_eq!(quote.total_due, Money::from_units(180));

        assert!(PricingPolicy::new(Money::from_units(-1), Rate::zero(), Rate::zero()).is_err());
        assert!(PricingPolicy::new(Money::zero(), Rate::from_bps(10_001), Rate::zero()).is_err());
    }
}
