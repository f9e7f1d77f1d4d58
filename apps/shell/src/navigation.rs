//! # Navigation
//!
//! Bottom tabs plus the collection tab's screen stack.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Navigation Shell                                │
//! │                                                                         │
//! │  Tab: Collection ("All Products")          Tab: Cart ("Cart")          │
//! │  ┌──────────────────────────────┐          ┌───────────────────────┐   │
//! │  │ ProductDetails { product_id }│ ◄─ push  │   CartScreen          │   │
//! │  ├──────────────────────────────┤          │                       │   │
//! │  │ ProductList (root)           │          │   badge = Σ quantity  │   │
//! │  └──────────────────────────────┘          │   (hidden when 0)     │   │
//! │                                            └───────────────────────┘   │
//! │                                                                         │
//! │  Switching tabs keeps the collection stack. Popping a detail screen    │
//! │  drops its variant selection and its ToastDriver (aborting timers).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use storefront_core::{Product, ToastTimings, VariantSelection};
use tracing::debug;

use crate::error::AppError;
use crate::state::ToastDriver;

// =============================================================================
// Tabs
// =============================================================================

/// Bottom tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Collection,
    Cart,
}

impl Tab {
    /// Header title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Collection => "All Products",
            Tab::Cart => "Cart",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "products" | "collection" | "all" => Ok(Tab::Collection),
            "cart" => Ok(Tab::Cart),
            other => Err(AppError::validation(format!(
                "Unknown tab: '{}'. Valid options: products, cart",
                other
            ))),
        }
    }
}

/// Cart tab badge text: the total unit count, hidden when zero.
pub fn cart_badge(total_quantity: i64) -> Option<String> {
    if total_quantity == 0 {
        None
    } else {
        Some(total_quantity.to_string())
    }
}

// =============================================================================
// Screens
// =============================================================================

/// Which screen of the collection stack is on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ProductList,
    ProductDetails { product_id: String },
}

/// A product detail screen and everything it owns.
#[derive(Debug)]
pub struct ProductDetailsScreen {
    product_id: String,
    pub selection: VariantSelection,
    pub toasts: ToastDriver,
}

impl ProductDetailsScreen {
    /// Fresh screen: default selection, empty toast queue.
    pub fn new(product: &Product, timings: ToastTimings) -> Self {
        ProductDetailsScreen {
            product_id: product.id.clone(),
            selection: VariantSelection::for_product(product),
            toasts: ToastDriver::new(timings),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Active tab and the collection stack above the product list.
#[derive(Debug, Default)]
pub struct Navigator {
    active: Tab,
    details: Vec<ProductDetailsScreen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Switches tab; the collection stack is left alone.
    pub fn switch_tab(&mut self, tab: Tab) {
        debug!(from = %self.active, to = %tab, "switch tab");
        self.active = tab;
    }

    /// Opens a product on the collection tab.
    pub fn push_details(&mut self, product: &Product, timings: ToastTimings) {
        debug!(product_id = %product.id, depth = self.details.len() + 1, "push product details");
        self.active = Tab::Collection;
        self.details.push(ProductDetailsScreen::new(product, timings));
    }

    /// Pops the top detail screen, dropping it. False at the root.
    pub fn pop(&mut self) -> bool {
        match self.details.pop() {
            Some(screen) => {
                debug!(product_id = %screen.product_id, "pop product details");
                true
            }
            None => false,
        }
    }

    /// Drops every detail screen, back to the product list.
    pub fn pop_to_root(&mut self) {
        if !self.details.is_empty() {
            debug!(depth = self.details.len(), "pop to product list");
            self.details.clear();
        }
    }

    /// Top of the collection stack.
    pub fn collection_route(&self) -> Route {
        match self.details.last() {
            Some(screen) => Route::ProductDetails {
                product_id: screen.product_id.clone(),
            },
            None => Route::ProductList,
        }
    }

    /// The detail screen on top, if any.
    pub fn current_details(&self) -> Option<&ProductDetailsScreen> {
        self.details.last()
    }

    pub fn current_details_mut(&mut self) -> Option<&mut ProductDetailsScreen> {
        self.details.last_mut()
    }

    /// Screens above the product list.
    pub fn depth(&self) -> usize {
        self.details.len()
    }
}
