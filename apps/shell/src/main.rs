//! # Storefront Shell Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Load configuration (defaults → TOML file → `STOREFRONT_*` env)
//! 3. Load and validate the product catalog
//! 4. Create state objects (CartState, CatalogState, ConfigState)
//! 5. Start the current-thread runtime and the terminal loop

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match storefront_shell_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("storefront-shell: {}", err);
            ExitCode::FAILURE
        }
    }
}
