//! # Inventory Ledger
//!
//! Owns the product catalog and every stock level in it.
//!
//! ## Reservation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stock Moves Only Here                               │
//! │                                                                         │
//! │  add_to_cart ────► reserve(name, qty) ───► stock -= qty                 │
//! │                                                                         │
//! │  remove_from_cart ► release(name, qty) ──► stock += qty                 │
//! │                                                                         │
//! │  checkout ────────► (nothing)              stock already taken          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart talks to the ledger only through [`StockLedger`], so it never
//! sees a mutable `Product`.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Product, ProductKey};
use crate::validation::validate_quantity;

/// Default catalog loaded when no configuration overrides it:
/// `(name, price in whole units, stock)`.
pub const DEFAULT_CATALOG: &[(&str, i64, i64)] = &[
    ("Milk", 500, 10),
    ("Bread", 300, 8),
    ("Rice", 1200, 15),
    ("Sugar", 700, 5),
    ("Flour", 400, 12),
    ("Eggs", 150, 30),
    ("Chicken", 2500, 7),
    ("Beef", 3500, 5),
    ("Fish", 2000, 6),
    ("Juice", 800, 10),
];

// =============================================================================
// Stock Ledger Contract
// =============================================================================

/// A successful reservation: what the cart needs to build or grow a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub key: ProductKey,
    /// Display name from the catalog.
    pub name: String,
    /// Price at the moment of reservation. The cart locks this in.
    pub unit_price: Money,
    pub quantity: i64,
}

/// The reserve/release contract between the cart and the catalog.
pub trait StockLedger {
    /// Takes `quantity` units off the shelf.
    ///
    /// Fails with `ProductNotFound`, `InvalidQuantity` or `InsufficientStock`
    /// and leaves stock unchanged on any failure.
    fn reserve(&mut self, name: &str, quantity: i64) -> CoreResult<Reservation>;

    /// Puts `quantity` units back on the shelf.
    fn release(&mut self, name: &str, quantity: i64) -> CoreResult<()>;
}

// =============================================================================
// Inventory
// =============================================================================

/// In-memory catalog, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
    index: HashMap<ProductKey, usize>,
}

impl Inventory {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from products, rejecting duplicate names.
    pub fn from_products<I>(products: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut inventory = Inventory::new();
        for product in products {
            inventory.insert(product)?;
        }
        Ok(inventory)
    }

    /// The built-in ten-product catalog.
    pub fn seeded() -> Self {
        let mut inventory = Inventory::new();
        for &(name, price, stock) in DEFAULT_CATALOG {
            // DEFAULT_CATALOG is valid by construction; a bad row is skipped
            // rather than taking the terminal down
            match Product::new(name, Money::from_units(price), stock) {
                Ok(product) => {
                    if let Err(err) = inventory.insert(product) {
                        warn!(%err, "skipping default catalog entry");
                    }
                }
                Err(err) => warn!(%err, product = name, "skipping default catalog entry"),
            }
        }
        inventory
    }

    /// Adds a product to the end of the catalog.
    pub fn insert(&mut self, product: Product) -> ValidationResult<()> {
        if self.index.contains_key(product.key()) {
            return Err(ValidationError::Duplicate {
                field: "product".to_string(),
                value: product.name().to_string(),
            });
        }
        self.index.insert(product.key().clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Products in catalog order. Read-only.
    pub fn list_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter()
    }

    /// Looks a product up by operator-entered name.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.index
            .get(&ProductKey::new(name))
            .map(|&i| &self.products[i])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> CoreResult<&mut Product> {
        let key = ProductKey::new(name);
        match self.index.get(&key) {
            Some(&i) => Ok(&mut self.products[i]),
            None => Err(CoreError::ProductNotFound(name.trim().to_string())),
        }
    }
}

impl StockLedger for Inventory {
    fn reserve(&mut self, name: &str, quantity: i64) -> CoreResult<Reservation> {
        let product = self.get_mut(name)?;
        validate_quantity(quantity)?;

        if !product.can_reserve(quantity) {
            return Err(CoreError::InsufficientStock {
                product: product.name().to_string(),
                available: product.stock(),
                requested: quantity,
            });
        }

        product.take_stock(quantity);
        debug!(
            product = product.name(),
            quantity,
            remaining = product.stock(),
            "stock reserved"
        );

        Ok(Reservation {
            key: product.key().clone(),
            name: product.name().to_string(),
            unit_price: product.price(),
            quantity,
        })
    }

    fn release(&mut self, name: &str, quantity: i64) -> CoreResult<()> {
        let product = self.get_mut(name)?;
        validate_quantity(quantity)?;

        if !product.return_stock(quantity) {
            return Err(CoreError::InvalidQuantity {
                input: quantity.to_string(),
            });
        }
        debug!(
            product = product.name(),
            quantity,
            stock = product.stock(),
            "stock released"
        );

        // Restock is unbounded; flag it so an inflated shelf is visible in logs
        if product.stock() > product.seeded_stock() {
            warn!(
                product = product.name(),
                stock = product.stock(),
                seeded = product.seeded_stock(),
                "stock above catalog seed after release"
            );
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
