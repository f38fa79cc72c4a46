//! # till-core: Pure Business Logic for Till POS
//!
//! This crate holds every rule of the register with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (terminal)                          │   │
//! │  │   Menu ──► Products ──► Cart ──► Checkout ──► Receipt          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ method calls                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   cart    │  │ checkout  │  │   money   │  │   │
//! │  │   │  reserve  │◄─│  add/rm   │  │ discount  │  │   Money   │  │   │
//! │  │   │  release  │  │  view     │  │ tax, pay  │  │   Rate    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductKey, Rate)
//! - [`money`] - Fixed-point Money type (no floating point!)
//! - [`inventory`] - Catalog and stock reservations
//! - [`cart`] - Cart lines and subtotal
//! - [`checkout`] - Discount, tax, payment and receipts
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, Inventory, Money, PricingPolicy};
//!
//! let mut inventory = Inventory::seeded();
//! let mut cart = Cart::new();
//!
//! cart.add_to_cart(&mut inventory, "milk", 3).unwrap();
//! let receipt = cart
//!     .checkout(&PricingPolicy::default(), Money::from_units(2000))
//!     .unwrap();
//!
//! assert_eq!(receipt.summary.total_due, Money::from_units(1650));
//! assert_eq!(receipt.summary.change, Money::from_units(350));
//! assert_eq!(inventory.get("Milk").unwrap().stock(), 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartRow, CartView};
pub use checkout::{PricingPolicy, Quote, Receipt, TransactionSummary};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use inventory::{Inventory, Reservation, StockLedger};
pub use money::Money;
pub use types::*;
