//! # Till POS Terminal Application
//!
//! Interactive front end for `till-core`.
//!
//! ## Startup Sequence
//! 1. Parse command line flags
//! 2. Initialize tracing (stderr, so the menu on stdout stays readable)
//! 3. Load configuration (defaults, till.toml, `TILL_*` env, flags)
//! 4. Build the inventory, cart and pricing policy
//! 5. Run the menu loop over stdin/stdout
//!
//! ## Module Structure
//! ```text
//! till_cli/
//! ├── lib.rs      ◄── You are here (startup)
//! ├── main.rs     ◄── Binary entry point
//! ├── app.rs      ◄── Menu loop and handlers
//! ├── cli.rs      ◄── clap flags
//! ├── config.rs   ◄── AppConfig (TOML + env)
//! ├── render.rs   ◄── Tables, checkout summary, receipt
//! └── error.rs    ◄── AppError
//! ```

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;

pub use app::{App, MenuChoice};
pub use cli::Cli;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Runs the application with the process arguments and terminal.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.no_clear {
        config.clear_screen = false;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(&config, stdin.lock(), stdout.lock())?;
    app.run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `--log-level debug` - Show debug messages (wins over RUST_LOG)
/// - `RUST_LOG=till_core=trace` - Show trace for the core crate only
/// - Default: WARN level
fn init_tracing(level: Option<&str>) -> AppResult<()> {
    let filter = match level {
        Some(directive) => {
            EnvFilter::try_new(directive).map_err(|e| AppError::Logging(e.to_string()))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
