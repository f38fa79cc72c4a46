//! # Till POS Entry Point
//!
//! The actual setup is in lib.rs so integration tests can drive it.

use std::process::ExitCode;

fn main() -> ExitCode {
    match till_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("till: {}", err);
            ExitCode::FAILURE
        }
    }
}
