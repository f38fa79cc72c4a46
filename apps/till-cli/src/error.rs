//! # App Error Type
//!
//! Failures of the terminal application itself.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till POS                               │
//! │                                                                         │
//! │  CoreError (stock, cart, payment)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  printed by the menu loop, operator re-prompted   ← never fatal         │
//! │                                                                         │
//! │  AppError (this file: stdout gone, bad till.toml, logging setup)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  returned from run(), main() prints it and exits non-zero              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use till_core::ValidationError;

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading the operator's input or writing the screen failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file is not valid TOML or has unknown fields.
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value parsed but is not acceptable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Catalog or pricing data in the config failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
