//! # Cart
//!
//! The active shopping cart for the single register.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method             Ledger Call           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► reserve(name, qty)    │
//! │                                                                         │
//! │  Remove from Cart ───────► remove_from_cart() ──► release(name, qty)    │
//! │                                                                         │
//! │  View Cart ──────────────► view_cart() ─────────► (none, read only)     │
//! │                                                                         │
//! │  Checkout ───────────────► checkout() ──────────► (none, see checkout)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::inventory::{Reservation, StockLedger};
use crate::money::{Money, MAX_SUBTOTAL};
use crate::types::ProductKey;

/// One product in the cart.
///
/// ## Design Notes
/// - `unit_price`: frozen at the first add. Later adds of the same product
///   grow `quantity` but never re-read the catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub key: ProductKey,

    /// Display name at time of adding (frozen)
    pub name: String,

    /// Price at time of adding (frozen)
    pub unit_price: Money,

    /// Always > 0
    pub quantity: i64,
}

impl CartLine {
    fn from_reservation(reservation: Reservation) -> Self {
        CartLine {
            key: reservation.key,
            name: reservation.name,
            unit_price: reservation.unit_price,
            quantity: reservation.quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `key` (adding the same product increases quantity)
/// - Every line has quantity > 0
/// - Every unit in the cart has been reserved from the ledger
/// - Lines keep the order they were first added in
/// - The subtotal never exceeds [`MAX_SUBTOTAL`]
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Reserves stock and adds it to the cart.
    ///
    /// ## Behavior
    /// - Ledger failures are returned unchanged and the cart is untouched
    /// - If the product already has a line: quantity increases, price stays
    /// - Otherwise: a new line is appended with the reserved price
    /// - If the subtotal would pass [`MAX_SUBTOTAL`] the reservation is
    ///   released and `SubtotalLimit` returned
    ///
    /// Returns the line as it stands after the add.
    pub fn add_to_cart<L>(&mut self, ledger: &mut L, name: &str, quantity: i64) -> CoreResult<&CartLine>
    where
        L: StockLedger + ?Sized,
    {
        let reservation = ledger.reserve(name, quantity)?;

        if self.subtotal_after(&reservation).is_none() {
            warn!(product = %reservation.name, quantity, "add refused, subtotal limit");
            ledger.release(reservation.key.as_str(), reservation.quantity)?;
            return Err(CoreError::SubtotalLimit {
                product: reservation.name,
                max: MAX_SUBTOTAL,
            });
        }

        let index = match self.position(&reservation.key) {
            Some(i) => {
                self.lines[i].quantity += reservation.quantity;
                i
            }
            None => {
                self.lines.push(CartLine::from_reservation(reservation));
                self.lines.len() - 1
            }
        };

        let line = &self.lines[index];
        debug!(product = %line.name, quantity = line.quantity, "cart line updated");
        Ok(line)
    }

    /// Removes a product's line and returns its stock to the ledger.
    ///
    /// The line is only dropped once the ledger has accepted the release.
    pub fn remove_from_cart<L>(&mut self, ledger: &mut L, name: &str) -> CoreResult<CartLine>
    where
        L: StockLedger + ?Sized,
    {
        let key = ProductKey::new(name);
        let index = self
            .position(&key)
            .ok_or_else(|| CoreError::NotInCart(name.trim().to_string()))?;

        let line = &self.lines[index];
        ledger.release(line.key.as_str(), line.quantity)?;

        let removed = self.lines.remove(index);
        debug!(product = %removed.name, quantity = removed.quantity, "cart line removed");
        Ok(removed)
    }

    /// Read-only view of the lines and their subtotal.
    pub fn view_cart(&self) -> CartView<'_> {
        CartView {
            lines: &self.lines,
            subtotal: self.subtotal(),
        }
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Finds the line for an operator-entered name.
    pub fn line(&self, name: &str) -> Option<&CartLine> {
        let key = ProductKey::new(name);
        self.position(&key).map(|i| &self.lines[i])
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every line without touching stock. Only a completed checkout
    /// may do this, since the units have been sold.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, key: &ProductKey) -> Option<usize> {
        self.lines.iter().position(|l| &l.key == key)
    }

    /// Subtotal once `reservation` is merged in, `None` past the limit.
    fn subtotal_after(&self, reservation: &Reservation) -> Option<Money> {
        let unit_price = self
            .position(&reservation.key)
            .map_or(reservation.unit_price, |i| self.lines[i].unit_price);

        unit_price
            .checked_mul_quantity(reservation.quantity)
            .and_then(|added| self.subtotal().checked_add(added))
            .filter(|total| *total <= MAX_SUBTOTAL)
    }
}

/// What "View Cart" shows: the lines plus their subtotal.
#[derive(Debug, Clone, Copy)]
pub struct CartView<'a> {
    lines: &'a [CartLine],
    pub subtotal: Money,
}

impl<'a> CartView<'a> {
    /// Lazily yields one row per line.
    pub fn rows(&self) -> impl Iterator<Item = CartRow<'a>> + 'a {
        let lines: &'a [CartLine] = self.lines;
        lines.iter().map(|line| CartRow {
            name: &line.name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        })
    }

    /// An empty cart is a normal state; the caller reports it, not an error.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One rendered cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartRow<'a> {
    pub name: &'a str,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
