//! # State Module
//!
//! The shell's explicitly owned state objects.
//!
//! Instead of one `AppState` holding everything, each concern gets its own
//! type and every command takes only the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<        │  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │   Catalog>   │  │   CartStore  │  │  currency_*      │              │
//! │  │              │  │  >>          │  │  [toast] timings │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  ToastDriver (one per product detail screen)                   │    │
//! │  │  Arc<Mutex<ToastQueue>> + one timer task per toast             │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • CatalogState: read-only after startup, cheap to clone               │
//! │  • CartState: single writer (cart commands), any number of readers     │
//! │  • ConfigState: read-only after startup                                │
//! │  • ToastDriver: owned by its screen, dropped with it                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod toast;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState, ToastConfig};
pub use toast::{ToastDriver, ToastTimer, ADDED_TO_CART};
