//! # Menu Loop
//!
//! Owns the inventory and the cart for the lifetime of the process and maps
//! operator input onto `till-core` operations.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Operator Session                                │
//! │                                                                         │
//! │   menu ──► choice ──┬── 1 ──► products table                            │
//! │     ▲               ├── 2 ──► name, quantity ──► Cart::add_to_cart      │
//! │     │               ├── 3 ──► name ──► Cart::remove_from_cart           │
//! │     │               ├── 4 ──► cart table                                │
//! │     │               ├── 5 ──► summary ──► payment loop ──► receipt      │
//! │     │               ├── 6 / EOF ──► goodbye, return                     │
//! │     │               └── other ──► "Invalid choice"                      │
//! │     │                       │                                           │
//! │     └───────────────────────┘   CoreError printed, never fatal          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so tests drive the loop with in-memory
//! buffers.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info};

use till_core::validation::{parse_payment, parse_quantity};
use till_core::{Cart, CoreError, Inventory, PricingPolicy};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::render;

pub const GOODBYE: &str = "Exiting system. Have a great day!";

// =============================================================================
// Menu Choice
// =============================================================================

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewProducts,
    AddToCart,
    RemoveFromCart,
    ViewCart,
    Checkout,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::ViewProducts),
            "2" => Ok(MenuChoice::AddToCart),
            "3" => Ok(MenuChoice::RemoveFromCart),
            "4" => Ok(MenuChoice::ViewCart),
            "5" => Ok(MenuChoice::Checkout),
            "6" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

// =============================================================================
// App
// =============================================================================

/// The register: state plus the operator's terminal.
pub struct App<R, W> {
    inventory: Inventory,
    cart: Cart,
    policy: PricingPolicy,
    store_name: String,
    clear_screen: bool,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Builds the register from configuration.
    pub fn new(config: &AppConfig, input: R, out: W) -> AppResult<Self> {
        Ok(App {
            inventory: config.inventory()?,
            cart: Cart::new(),
            policy: config.pricing_policy()?,
            store_name: config.store_name.clone(),
            clear_screen: config.clear_screen,
            input,
            out,
        })
    }

    /// Runs the menu until Exit or end of input.
    pub fn run(&mut self) -> AppResult<()> {
        info!(store = %self.store_name, products = self.inventory.len(), "till session started");

        loop {
            render::menu(&mut self.out)?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("end of input at menu");
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::ViewProducts) => render::products(&mut self.out, &self.inventory)?,
                Ok(MenuChoice::AddToCart) => self.add_to_cart()?,
                Ok(MenuChoice::RemoveFromCart) => self.remove_from_cart()?,
                Ok(MenuChoice::ViewCart) => render::cart(&mut self.out, &self.cart.view_cart())?,
                Ok(MenuChoice::Checkout) => self.checkout()?,
                Ok(MenuChoice::Exit) => break,
                Err(()) => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.out, "{}", GOODBYE)?;
        self.out.flush()?;
        info!("till session ended");
        Ok(())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Everything written to the terminal so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    fn add_to_cart(&mut self) -> AppResult<()> {
        let Some(name) = self.prompt("Enter product name: ")? else {
            return Ok(());
        };

        // unknown names are reported before asking for a quantity
        if self.inventory.get(&name).is_none() {
            return self.report(CoreError::ProductNotFound(name));
        }

        let Some(qty_input) = self.prompt("Enter quantity: ")? else {
            return Ok(());
        };
        let quantity = match parse_quantity(&qty_input) {
            Ok(q) => q,
            Err(err) => return self.report(err),
        };

        let added = self
            .cart
            .add_to_cart(&mut self.inventory, &name, quantity)
            .map(|line| line.name.clone());
        match added {
            Ok(product) => writeln!(self.out, "{} {}(s) added to cart.", quantity, product)?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn remove_from_cart(&mut self) -> AppResult<()> {
        let Some(name) = self.prompt("Enter product name to remove: ")? else {
            return Ok(());
        };

        match self.cart.remove_from_cart(&mut self.inventory, &name) {
            Ok(line) => writeln!(self.out, "{} removed from cart.", line.name)?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn checkout(&mut self) -> AppResult<()> {
        let quote = match self.cart.quote(&self.policy) {
            Ok(q) => q,
            Err(err) => return self.report(err),
        };
        render::checkout_summary(&mut self.out, &quote, &self.policy)?;

        loop {
            let Some(input) = self.prompt("Enter amount received: ")? else {
                debug!("end of input at payment prompt, checkout abandoned");
                writeln!(self.out)?;
                writeln!(self.out, "Checkout cancelled. Cart kept.")?;
                return Ok(());
            };

            let paid = match parse_payment(&input) {
                Ok(amount) => amount,
                Err(err) => {
                    writeln!(self.out, "Invalid input: {}. Please enter a numeric amount.", err)?;
                    continue;
                }
            };

            match self.cart.checkout(&self.policy, paid) {
                Ok(receipt) => {
                    render::receipt(&mut self.out, &self.store_name, &receipt, self.clear_screen)?;
                    return Ok(());
                }
                Err(err @ CoreError::InsufficientPayment { .. }) => {
                    writeln!(self.out, "{}. Please enter a valid amount.", err)?;
                }
                Err(err) => return self.report(err),
            }
        }
    }

    // =========================================================================
    // Terminal helpers
    // =========================================================================

    /// Prints `text`, reads one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> AppResult<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: CoreError) -> AppResult<()> {
        debug!(%err, "operation refused");
        writeln!(self.out, "{}", err)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
