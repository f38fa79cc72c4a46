//! Command line flags.

use std::path::PathBuf;

use clap::Parser;

/// Single-terminal point of sale.
#[derive(Parser, Debug, Default)]
#[command(name = "till", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a till.toml (default: platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not clear the screen before printing receipts
    #[arg(long)]
    pub no_clear: bool,

    /// Log filter, e.g. `debug` or `till_core=trace` (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
