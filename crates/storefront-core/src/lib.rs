//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the two state
//! machines the screens are built on, plus the types they trade in, as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal Front End (apps/shell)                 │   │
//! │  │   Product List ──► Product Details ──► Cart ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   toast   │  │  variant  │  │   │
//! │  │   │  Product  │  │ CartStore │  │ToastQueue │  │ Selection │  │   │
//! │  │   │  Variant  │  │ LineItem  │  │ToastEntry │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • NO TASKS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog schema (Product, Variant, Image, MoneyV2)
//! - [`catalog`] - Read-only product catalog with lookups
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart store: add / remove / set-quantity, derived totals
//! - [`toast`] - Toast lifecycle state machine
//! - [`easing`] - Animation curves used by toasts
//! - [`variant`] - Variant selection rules for the detail screen
//! - [`validation`] - Input parsing and catalog validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{CartLineItem, CartStore};
//! use storefront_core::money::Money;
//!
//! let mut cart = CartStore::new();
//! cart.add(CartLineItem {
//!     product_id: "p1".to_string(),
//!     variant_id: "v1".to_string(),
//!     title: "Snowboard".to_string(),
//!     variant_title: "Blue".to_string(),
//!     unit_price: Money::from_cents(1000),
//!     image_url: String::new(),
//!     quantity: 2,
//! });
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total_price().to_string(), "$20.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod easing;
pub mod error;
pub mod money;
pub mod toast;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartChange, CartIntent, CartLineItem, CartStore, CartTotals};
pub use catalog::{Catalog, ProductCard};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use toast::{ToastEntry, ToastFrame, ToastId, ToastPhase, ToastQueue, ToastTimings};
pub use types::*;
pub use variant::{VariantRow, VariantSelection};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity used when a typed quantity cannot be parsed.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Display string for a product or variant with no available price.
pub const PRICE_UNAVAILABLE: &str = "N/A";
