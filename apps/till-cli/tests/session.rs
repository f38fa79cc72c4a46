//! Black-box operator sessions: the real menu loop over scripted input.

use std::io::Cursor;
use std::path::PathBuf;

use till_cli::config::{Amount, ProductConfig};
use till_cli::{App, AppConfig, AppError};
use till_core::Money;

type TestApp = App<Cursor<Vec<u8>>, Vec<u8>>;

struct Session {
    app: TestApp,
    transcript: String,
}

impl Session {
    /// Runs the menu loop until the script (one line per entry) is exhausted.
    fn run(config: &AppConfig, script: &[&str]) -> Self {
        let mut input = script.join("\n");
        input.push('\n');

        let mut app = App::new(config, Cursor::new(input.into_bytes()), Vec::new())
            .expect("failed to build app");
        app.run().expect("session failed");

        let transcript = String::from_utf8(app.output().clone()).expect("non-utf8 output");
        Session { app, transcript }
    }

    fn stock(&self, name: &str) -> i64 {
        self.app.inventory().get(name).expect("unknown product").stock()
    }
}

fn quiet_config() -> AppConfig {
    AppConfig {
        clear_screen: false,
        ..AppConfig::default()
    }
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("till-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).expect("failed to write config");
    path
}

#[test]
fn milk_sale_end_to_end() {
    let session = Session::run(&quiet_config(), &["1", "2", "Milk", "3", "4", "5", "2000", "6"]);
    let t = &session.transcript;

    assert!(t.contains("Milk           $500.00   10\n"));
    assert!(t.contains("3 Milk(s) added to cart.\n"));
    assert!(t.contains("Milk           3         $500.00     $1500.00\n"));
    assert!(t.contains("Subtotal: $1500.00\n"));
    assert!(t.contains("Discount (5% for bills over $5000.00): -$0.00\n"));
    assert!(t.contains("Sales Tax (10%): +$150.00\n"));
    assert!(t.contains("Total Amount Due: $1650.00\n"));
    assert!(t.contains("XYZ Supermarket - Receipt"));
    assert!(t.contains("Milk            x3 @ $500.00 = $1500.00\n"));
    assert!(t.contains("Change: $350.00\n"));
    assert!(t.ends_with("Exiting system. Have a great day!\n"));

    assert!(session.app.cart().is_empty());
    assert_eq!(session.stock("Milk"), 7);
}

#[test]
fn products_table_reflects_reservations() {
    let session = Session::run(&quiet_config(), &["2", "fish", "6", "1", "6"]);

    assert!(session.transcript.contains("Fish           $2000.00  0\n"));
    assert_eq!(session.stock("Fish"), 0);
    assert_eq!(session.app.cart().total_quantity(), 6);
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let session = Session::run(&quiet_config(), &["2", "Eggs", "4", "2", "EGGS", "6", "4", "6"]);

    assert_eq!(session.app.cart().item_count(), 1);
    assert_eq!(session.app.cart().total_quantity(), 10);
    assert_eq!(session.stock("Eggs"), 20);
    assert!(session.transcript.contains("Eggs           10        $150.00     $1500.00\n"));
}

#[test]
fn bulk_discount_applies_above_threshold() {
    let session = Session::run(&quiet_config(), &["2", "Rice", "12", "5", "15048", "6"]);
    let t = &session.transcript;

    assert!(t.contains("Discount (5% for bills over $5000.00): -$720.00\n"));
    assert!(t.contains("Sales Tax (10%): +$1368.00\n"));
    assert!(t.contains("Total Amount Due: $15048.00\n"));
    assert!(t.contains("Change: $0.00\n"));
}

#[test]
fn operator_mistakes_are_never_fatal() {
    let session = Session::run(
        &quiet_config(),
        &[
            "0", "abc", // bad menu choices
            "2", "Caviar", // unknown product
            "2", "Beef", "-1", // non-positive quantity
            "2", "Beef", "six", // non-numeric quantity
            "2", "Beef", "6", // more than stocked
            "3", "Beef", // nothing to remove
            "5", // empty cart
            "6",
        ],
    );
    let t = &session.transcript;

    assert_eq!(t.matches("Invalid choice. Please try again.").count(), 2);
    assert!(t.contains("Product not found: Caviar\n"));
    assert!(t.contains("Invalid quantity '-1'"));
    assert!(t.contains("Invalid quantity 'six'"));
    assert!(t.contains("Insufficient stock for Beef: available 5, requested 6\n"));
    assert!(t.contains("Product not in cart: Beef\n"));
    assert!(t.contains("Cart is empty. Add items before checkout.\n"));
    assert_eq!(session.stock("Beef"), 5);
}

#[test]
fn end_of_input_mid_checkout_keeps_the_cart() {
    // no "6": input ends at the payment prompt, then at the menu
    let session = Session::run(&quiet_config(), &["2", "Chicken", "2", "5", "1.00"]);
    let t = &session.transcript;

    assert!(t.contains("Insufficient payment: received $1.00, due $5500.00"));
    assert!(!t.contains("Receipt"));
    assert!(t.ends_with("Exiting system. Have a great day!\n"));
    assert_eq!(session.app.cart().subtotal(), Money::from_units(5000));
    assert_eq!(session.stock("Chicken"), 5);
}

#[test]
fn sub_cent_total_asks_for_the_next_cent() {
    let config = AppConfig {
        products: vec![ProductConfig {
            name: "Telly".to_string(),
            price: Amount::Text("5000.01".to_string()),
            stock: 1,
        }],
        ..quiet_config()
    };
    let session = Session::run(&config, &["2", "Telly", "1", "5", "5225.01", "5225.02", "6"]);
    let t = &session.transcript;

    // total due is 5225.01045
    assert!(t.contains("Total Amount Due: $5225.01\n"));
    assert!(t.contains("Insufficient payment: received $5225.01, due $5225.02"));
    assert!(t.contains("Amount Paid: $5225.02\n"));
    assert!(session.app.cart().is_empty());
}

#[test]
fn config_file_drives_catalog_and_pricing() {
    let path = temp_config(
        "catalog",
        r#"
        store_name = "Corner Shop"
        clear_screen = true

        [pricing]
        tax_rate_bps = 825
        discount_threshold = 10

        [[products]]
        name = "Tea"
        price = "2.50"
        stock = 20
        "#,
    );
    let config = AppConfig::load(Some(&path)).expect("config should load");
    std::fs::remove_file(&path).ok();

    let session = Session::run(&config, &["2", "tea", "8", "5", "21", "6"]);
    let t = &session.transcript;

    // 8 × 2.50 = 20.00; 5% off = 19.00; 8.25% tax = 1.5675
    assert!(t.contains("Discount (5% for bills over $10.00): -$1.00\n"));
    assert!(t.contains("Sales Tax (8.25%): +$1.57\n"));
    assert!(t.contains("\x1B[2J\x1B[1;1H"));
    assert!(t.contains("Corner Shop - Receipt"));
    assert!(session.app.inventory().get("Milk").is_none());
    assert_eq!(session.stock("Tea"), 12);
}

#[test]
fn broken_config_file_is_reported() {
    let path = temp_config("broken", "store_name = [1, 2]\n");
    let result = AppConfig::load(Some(&path));
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(AppError::ConfigParse { .. })));
}
