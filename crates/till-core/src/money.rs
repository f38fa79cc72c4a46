//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Micro-Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix addition, but not percentages:                       │
//! │    5% of $5000.01 = $250.0005       → does not fit in cents            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer micro-units (1/1,000,000 of a unit)              │
//! │    $5000.01 = 5_000_010_000 micros                                      │
//! │    5% of it = 250_000_500 micros    → exact                            │
//! │    10% tax on the remainder         → still exact                      │
//! │                                                                         │
//! │  Display rounds to cents; comparisons use the exact value.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price.multiply_quantity(2); // $21.98
//! let total = price + Money::from_units(5); // $15.99
//!
//! assert_eq!(doubled.to_string(), "$21.98");
//! assert_eq!(total.to_string(), "$15.99");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Rate;

/// Number of micro-units in one currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Number of micro-units in one cent.
pub const MICROS_PER_CENT: i64 = 10_000;

/// Largest subtotal a cart may reach. Discount and tax are each capped at
/// 100%, so every checkout figure derived from it stays within `i64`.
pub const MAX_SUBTOTAL: Money = Money(i64::MAX / 4);

/// Fractional digits accepted when parsing an amount.
const MAX_FRACTION_DIGITS: usize = 6;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in micro-units (10⁻⁶ of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (e.g. change owed)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Micro precision**: A price with two decimals, multiplied by two
///   basis-point rates in sequence, never needs rounding
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                                   │
///                                                   ▼
///                 Subtotal ──► Discount ──► Tax ──► Total Due ──► Change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from raw micro-units.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.micros(), 10_990_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * MICROS_PER_CENT)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Catalog prices are whole units (Milk costs 500).
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MICROS_PER_UNIT)
    }

    /// Returns the exact value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded to cents (half to even).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(250_000_500).cents(), 25_000);
    /// assert_eq!(Money::from_micros(5_000).cents(), 0);   // 0.5 cent → 0
    /// assert_eq!(Money::from_micros(15_000).cents(), 2);  // 1.5 cents → 2
    /// ```
    #[inline]
    pub fn cents(&self) -> i64 {
        div_round_half_even(self.0 as i128, MICROS_PER_CENT as i128) as i64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a basis-point rate to this amount.
    ///
    /// Used for both the bulk discount and the sales tax. Exact for every
    /// amount with at most two decimals; anything finer is rounded half to
    /// even at micro precision.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4 (always up = +bias)         │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN number:               │
    /// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4 (alternates = no bias)      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::Rate;
    ///
    /// let subtotal = Money::from_cents(500_001); // $5000.01
    /// let discount = subtotal.apply_rate(Rate::from_bps(500)); // 5%
    /// assert_eq!(discount.micros(), 250_000_500); // $250.0005
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money(div_round_half_even(scaled, Rate::BPS_PER_WHOLE as i128) as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Cart lines never get near the bound: adds that would take the cart
    /// past [`MAX_SUBTOTAL`] are refused.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_units(500);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_units(1500));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(micros) => Some(Money(micros)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(micros) => Some(Money(micros)),
            None => None,
        }
    }

    /// Smallest whole-cent amount not below this one.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let due: Money = "5225.01045".parse().unwrap();
    /// assert_eq!(due.round_up_to_cent(), Money::from_cents(522_502));
    /// assert_eq!(Money::from_units(1650).round_up_to_cent(), Money::from_units(1650));
    /// ```
    pub fn round_up_to_cent(&self) -> Money {
        let remainder = self.0.rem_euclid(MICROS_PER_CENT);
        if remainder == 0 {
            *self
        } else {
            Money(self.0.saturating_add(MICROS_PER_CENT - remainder))
        }
    }
}

/// Integer division rounding half to even. `divisor` must be positive.
fn div_round_half_even(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    let remainder = (value % divisor).abs();
    let twice = remainder * 2;

    if twice > divisor || (twice == divisor && quotient % 2 != 0) {
        quotient + value.signum()
    } else {
        quotient
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `2000`, `1650.5` or `$19.99`.
///
/// At most six fractional digits are accepted; exponents, digit grouping and
/// signs other than a leading `-` are rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("must contain digits"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a number"));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(invalid("too many decimal places"));
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let fraction_micros: i64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = MAX_FRACTION_DIGITS);
            padded.parse().map_err(|_| invalid("must be a number"))?
        };

        let micros = whole_units
            .checked_mul(MICROS_PER_UNIT)
            .and_then(|m| m.checked_add(fraction_micros))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -micros } else { micros }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to two decimals, e.g. `$1650.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs());
        // pad() honours width/alignment so receipts can use `{:<10}`
        f.pad(&text)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_agree() {
        assert_eq!(Money::from_units(5), Money::from_cents(500));
        assert_eq!(Money::from_cents(1), Money::from_micros(10_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_units(500).to_string(), "$500.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        // sub-cent values round half to even
        assert_eq!(Money::from_micros(250_000_500).to_string(), "$250.00");
        assert_eq!(Money::from_micros(1_005_000).to_string(), "$1.00");
        assert_eq!(Money::from_micros(1_015_000).to_string(), "$1.02");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:<8}|", Money::from_units(5)), "$5.00   |");
        assert_eq!(format!("{:>8}|", Money::from_units(5)), "   $5.00|");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_cents(2000));
    }

    #[test]
    fn test_apply_rate_is_exact_for_cent_amounts() {
        let subtotal = Money::from_cents(500_001);
        let discount = subtotal.apply_rate(Rate::from_bps(500));
        assert_eq!(discount, Money::from_micros(250_000_500));

        let taxable = subtotal - discount;
        let tax = taxable.apply_rate(Rate::from_bps(1000));
        assert_eq!(tax, Money::from_micros(475_000_950));
    }

    #[test]
    fn test_apply_rate_rounds_half_to_even() {
        // 1 micro × 50% = 0.5 micro → 0
        assert_eq!(Money::from_micros(1).apply_rate(Rate::from_bps(5000)), Money::zero());
        // 3 micros × 50% = 1.5 micros → 2
        assert_eq!(
            Money::from_micros(3).apply_rate(Rate::from_bps(5000)),
            Money::from_micros(2)
        );
        // negative values round symmetrically
        assert_eq!(
            Money::from_micros(-3).apply_rate(Rate::from_bps(5000)),
            Money::from_micros(-2)
        );
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::from_units(1_000_000_000_000);
        assert_eq!(huge.checked_mul_quantity(10), None);
        assert_eq!(huge.multiply_quantity(10), Money::from_micros(i64::MAX));
        assert_eq!(
            huge.checked_mul_quantity(2),
            Some(Money::from_units(2_000_000_000_000))
        );
        assert_eq!(Money::from_micros(i64::MAX).checked_add(Money::from_micros(1)), None);
        assert_eq!(
            MAX_SUBTOTAL.checked_add(MAX_SUBTOTAL),
            Some(Money::from_micros(i64::MAX / 4 * 2))
        );
    }

    #[test]
    fn test_round_up_to_cent() {
        assert_eq!(Money::from_micros(1).round_up_to_cent(), Money::from_cents(1));
        assert_eq!(Money::from_cents(1999).round_up_to_cent(), Money::from_cents(1999));
        assert_eq!(Money::from_micros(-1).round_up_to_cent(), Money::zero());
        assert_eq!(
            Money::from_micros(-15_000).round_up_to_cent(),
            Money::from_cents(-1)
        );
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!("2000".parse::<Money>().unwrap(), Money::from_units(2000));
        assert_eq!("1650.5".parse::<Money>().unwrap(), Money::from_cents(165_050));
        assert_eq!(" $19.99 ".parse::<Money>().unwrap(), Money::from_cents(1999));
        assert_eq!(".25".parse::<Money>().unwrap(), Money::from_cents(25));
        assert_eq!("10.".parse::<Money>().unwrap(), Money::from_units(10));
        assert_eq!("-5".parse::<Money>().unwrap(), Money::from_units(-5));
        assert_eq!(
            "250.0005".parse::<Money>().unwrap(),
            Money::from_micros(250_000_500)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        for bad in ["abc", "12a", "1.2.3", ".", "1e5", "1,000", "0.0000001", "+5"] {
            assert!(
                matches!(bad.parse::<Money>(), Err(ValidationError::InvalidFormat { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
