//! # Screen Rendering
//!
//! Fixed-width text for every screen the operator sees. Each function writes
//! to any `io::Write`, so the menu loop and the tests share one code path.
//!
//! ```text
//! Available Products:
//! Product        Price     Stock
//! -----------------------------------
//! Milk           $500.00   10
//! ```

use std::io::{self, Write};

use till_core::{CartView, Inventory, PricingPolicy, Quote, Receipt};

/// Width of the receipt rules and centered lines.
pub const RECEIPT_WIDTH: usize = 40;

/// ANSI: clear screen, cursor home.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

const PRODUCTS_RULE: usize = 35;
const CART_RULE: usize = 50;

/// Writes one table row without trailing padding.
fn row(out: &mut impl Write, line: String) -> io::Result<()> {
    writeln!(out, "{}", line.trim_end())
}

// =============================================================================
// Menu
// =============================================================================

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Point of Sale (POS) System ===")?;
    writeln!(out, "1. View Products")?;
    writeln!(out, "2. Add to Cart")?;
    writeln!(out, "3. Remove from Cart")?;
    writeln!(out, "4. View Cart")?;
    writeln!(out, "5. Checkout")?;
    writeln!(out, "6. Exit")
}

// =============================================================================
// Tables
// =============================================================================

/// Catalog with current stock, in seed order.
pub fn products(out: &mut impl Write, inventory: &Inventory) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Available Products:")?;
    row(out, format!("{:<15}{:<10}{:<10}", "Product", "Price", "Stock"))?;
    writeln!(out, "{}", "-".repeat(PRODUCTS_RULE))?;
    for product in inventory.list_products() {
        row(
            out,
            format!("{:<15}{:<10}{:<10}", product.name(), product.price(), product.stock()),
        )?;
    }
    writeln!(out, "{}", "-".repeat(PRODUCTS_RULE))
}

/// Cart lines and subtotal, or the empty-cart notice.
pub fn cart(out: &mut impl Write, view: &CartView<'_>) -> io::Result<()> {
    writeln!(out)?;
    if view.is_empty() {
        return writeln!(out, "Cart is empty.");
    }

    writeln!(out, "Shopping Cart:")?;
    row(
        out,
        format!("{:<15}{:<10}{:<12}{:<10}", "Product", "Quantity", "Unit Price", "Total"),
    )?;
    writeln!(out, "{}", "-".repeat(CART_RULE))?;
    for r in view.rows() {
        row(
            out,
            format!("{:<15}{:<10}{:<12}{:<10}", r.name, r.quantity, r.unit_price, r.line_total),
        )?;
    }
    writeln!(out, "{}", "-".repeat(CART_RULE))?;
    writeln!(out, "Subtotal: {}", view.subtotal)
}

// =============================================================================
// Checkout
// =============================================================================

/// Totals shown before asking for payment.
pub fn checkout_summary(out: &mut impl Write, quote: &Quote, policy: &PricingPolicy) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Checkout Summary:")?;
    writeln!(out, "Subtotal: {}", quote.subtotal)?;
    writeln!(
        out,
        "Discount ({} for bills over {}): -{}",
        policy.discount_rate, policy.discount_threshold, quote.discount
    )?;
    writeln!(out, "Sales Tax ({}): +{}", policy.tax_rate, quote.tax)?;
    writeln!(out, "Total Amount Due: {}", quote.total_due)
}

/// The printed receipt.
///
/// ```text
/// ========================================
///        XYZ Supermarket - Receipt
/// ========================================
/// Transaction: 6f1c...
/// Date: 2026-10-17 14:03:11 UTC
/// ----------------------------------------
/// Milk            x3 @ $500.00 = $1500.00
/// ----------------------------------------
/// Subtotal: $1500.00
/// ...
/// Change: $350.00
/// ========================================
///     Thank you for shopping with us!
/// ========================================
/// ```
pub fn receipt(out: &mut impl Write, store_name: &str, receipt: &Receipt, clear: bool) -> io::Result<()> {
    if clear {
        write!(out, "{}", CLEAR_SCREEN)?;
    }

    let heavy = "=".repeat(RECEIPT_WIDTH);
    let light = "-".repeat(RECEIPT_WIDTH);
    let title = format!("{} - Receipt", store_name);

    writeln!(out)?;
    writeln!(out, "{}", heavy)?;
    row(out, format!("{:^width$}", title, width = RECEIPT_WIDTH))?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "Transaction: {}", receipt.transaction_id)?;
    writeln!(out, "Date: {}", receipt.completed_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "{}", light)?;

    for line in &receipt.lines {
        writeln!(
            out,
            "{:<15} x{} @ {} = {}",
            line.name,
            line.quantity,
            line.unit_price,
            line.line_total()
        )?;
    }

    let s = &receipt.summary;
    writeln!(out, "{}", light)?;
    writeln!(out, "Subtotal: {}", s.subtotal)?;
    writeln!(out, "Discount: -{}", s.discount)?;
    writeln!(out, "Sales Tax: +{}", s.tax)?;
    writeln!(out, "Total Due: {}", s.total_due)?;
    writeln!(out, "Amount Paid: {}", s.amount_paid)?;
    writeln!(out, "Change: {}", s.change)?;
    writeln!(out, "{}", heavy)?;
    row(
        out,
        format!("{:^width$}", "Thank you for shopping with us!", width = RECEIPT_WIDTH),
    )?;
    writeln!(out, "{}", heavy)
}

// =============================================================================
// Unit Tests
// =============================================================================
