//! # Configuration
//!
//! Store settings loaded once at startup. Read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --no-clear                                                         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_STORE_NAME="Corner Shop"                                      │
//! │     TILL_TAX_RATE_BPS=825                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/till-pos/till.toml (Linux)                               │
//! │     ~/Library/Application Support/com.till.pos/till.toml (macOS)       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     XYZ Supermarket, 10% tax, 5% off above 5000, ten products         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "XYZ Supermarket"
//! clear_screen = true
//!
//! [pricing]
//! tax_rate_bps = 1000        # 10%
//! discount_rate_bps = 500    # 5%
//! discount_threshold = 5000  # strict: 5000.00 itself gets no discount
//!
//! # Optional. When present it replaces the built-in catalog.
//! [[products]]
//! name = "Milk"
//! price = 500
//! stock = 10
//!
//! [[products]]
//! name = "Tea"
//! price = "249.99"
//! stock = 4
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use till_core::{Inventory, Money, PricingPolicy, Product, Rate};

use crate::error::{AppError, AppResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "till.toml";

/// Store name printed on receipts by default.
pub const DEFAULT_STORE_NAME: &str = "XYZ Supermarket";

// =============================================================================
// Amount
// =============================================================================

/// A money amount as written in TOML: `500`, `249.99` or `"249.99"`.
///
/// Strings are the exact form; floats are accepted for convenience and go
/// through their shortest decimal representation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Whole(i64),
    Decimal(f64),
    Text(String),
}

impl Amount {
    pub fn to_money(&self) -> AppResult<Money> {
        match self {
            Amount::Whole(units) => units
                .checked_mul(till_core::money::MICROS_PER_UNIT)
                .map(Money::from_micros)
                .ok_or_else(|| AppError::InvalidConfig(format!("amount {} is too large", units))),
            Amount::Decimal(value) => Ok(value.to_string().parse()?),
            Amount::Text(text) => Ok(text.parse()?),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[pricing]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Sales tax in basis points (1000 = 10%).
    pub tax_rate_bps: u32,

    /// Bulk discount in basis points (500 = 5%).
    pub discount_rate_bps: u32,

    /// Subtotals strictly above this are discounted.
    pub discount_threshold: Amount,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let policy = PricingPolicy::default();
        PricingConfig {
            tax_rate_bps: policy.tax_rate.bps(),
            discount_rate_bps: policy.discount_rate.bps(),
            discount_threshold: Amount::Whole(5000),
        }
    }
}

/// One `[[products]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductConfig {
    pub name: String,
    pub price: Amount,
    pub stock: i64,
}

// =============================================================================
// App Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Store name (receipt header)
    pub store_name: String,

    /// Clear the terminal before printing a receipt
    pub clear_screen: bool,

    pub pricing: PricingConfig,

    /// Catalog seed. Empty means the built-in ten products.
    pub products: Vec<ProductConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            clear_screen: true,
            pricing: PricingConfig::default(),
            products: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path must exist; the default path may not)
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::ConfigNotFound(path.to_path_buf()));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies `TILL_*` overrides from `lookup` (the process environment in
    /// production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TILL_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(value) = lookup("TILL_CLEAR_SCREEN") {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.clear_screen = true,
                "0" | "false" | "no" | "off" => self.clear_screen = false,
                _ => warn!(value = %value, "Unknown TILL_CLEAR_SCREEN value"),
            }
        }

        if let Some(value) = lookup("TILL_TAX_RATE_BPS") {
            match value.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = bps;
                }
                Err(_) => warn!(value = %value, "Ignoring non-numeric TILL_TAX_RATE_BPS"),
            }
        }

        if let Some(value) = lookup("TILL_DISCOUNT_RATE_BPS") {
            match value.trim().parse::<u32>() {
                Ok(bps) => self.pricing.discount_rate_bps = bps,
                Err(_) => warn!(value = %value, "Ignoring non-numeric TILL_DISCOUNT_RATE_BPS"),
            }
        }

        if let Some(value) = lookup("TILL_DISCOUNT_THRESHOLD") {
            self.pricing.discount_threshold = Amount::Text(value);
        }
    }

    /// Validates the configuration by building everything it describes.
    pub fn validate(&self) -> AppResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("store_name must not be empty".into()));
        }
        self.pricing_policy()?;
        self.inventory()?;
        Ok(())
    }

    /// Builds the pricing policy.
    pub fn pricing_policy(&self) -> AppResult<PricingPolicy> {
        let threshold = self.pricing.discount_threshold.to_money()?;
        Ok(PricingPolicy::new(
            threshold,
            Rate::from_bps(self.pricing.discount_rate_bps),
            Rate::from_bps(self.pricing.tax_rate_bps),
        )?)
    }

    /// Builds the starting catalog.
    pub fn inventory(&self) -> AppResult<Inventory> {
        if self.products.is_empty() {
            return Ok(Inventory::seeded());
        }

        let products = self
            .products
            .iter()
            .map(|p| -> AppResult<Product> { Ok(Product::new(&p.name, p.price.to_money()?, p.stock)?) })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Inventory::from_products(products)?)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
