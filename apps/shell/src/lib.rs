//! # Storefront Shell Library
//!
//! Terminal storefront: product list, product details and cart, driven by
//! one command per input line.
//!
//! ## Module Organization
//! ```text
//! storefront_shell_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Shared cart store
//! │   ├── catalog.rs  ◄─── Loaded product catalog
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── toast.rs    ◄─── Toast queue + timer tasks
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Product list commands
//! │   ├── product.rs  ◄─── Product detail commands
//! │   ├── cart.rs     ◄─── Cart screen commands
//! │   └── config.rs   ◄─── Config commands
//! ├── navigation.rs   ◄─── Tabs + collection screen stack
//! ├── terminal.rs     ◄─── Command parsing and rendering
//! └── error.rs        ◄─── Error type for commands
//! ```
//!
//! ## Runtime
//! Everything runs on one current-thread tokio runtime: the stdin loop and
//! every toast timer task. Shared state still sits behind `Arc<Mutex<_>>`
//! so the timer tasks can reach it.

pub mod commands;
pub mod error;
pub mod navigation;
pub mod state;
pub mod terminal;

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use state::{CartState, CatalogState, ConfigState};

/// How long shutdown waits for the blocking stdin reader.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Runs the storefront shell until `quit` or end of input.
///
/// ## Startup Sequence
/// 1. Initialize tracing
/// 2. Load configuration (falls back to defaults)
/// 3. Load the catalog named by the config, or the bundled one
/// 4. Run the terminal loop on a current-thread runtime
pub fn run() -> AppResult<()> {
    init_tracing();

    let config = ConfigState::load_or_default(None);
    info!(
        store = %config.store_name,
        currency = %config.currency_code,
        "Configuration loaded"
    );

    let catalog = CatalogState::load(&config)?;
    info!(products = catalog.catalog().len(), "Catalog loaded");

    let cart = CartState::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(terminal::run(config, catalog, cart));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    info!("Storefront shell exited");
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the rendered screens.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=storefront_core=trace` - Trace the core crate only
/// - Default: warnings, plus info from the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Fails only when a global subscriber is already set, e.g. when `run`
    // is called twice in one process or a host installed its own. Logging
    // keeps going through that subscriber.
    if let Err(err) = installed {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}
