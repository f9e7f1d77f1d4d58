//! # Product Detail Commands
//!
//! Commands for the screen on top of the collection stack.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open 1                                                                 │
//! │    └─► push ProductDetails { product_id } (default variant selected)   │
//! │                                                                         │
//! │  variants          ── Show Variants / Hide Variants                    │
//! │  select 2          ── rejected if sold out or unknown                  │
//! │                                                                         │
//! │  add                                                                    │
//! │    ├─► cart.add(line item, quantity 1)                                 │
//! │    └─► toasts.spawn()  ── "Added to cart!" (enter, dwell, exit)        │
//! │                                                                         │
//! │  back              ── pop; pending toast timers are aborted            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::variant::VariantRow;
use storefront_core::{CartChange, CartIntent, CartTotals, Product, ToastFrame, ToastId};
use tracing::debug;

use crate::commands::catalog::resolve_product;
use crate::error::{AppError, AppResult};
use crate::navigation::{Navigator, ProductDetailsScreen, Tab};
use crate::state::{CartState, CatalogState, ConfigState};

/// Everything the detail screen renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailsView {
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Two decimals, or "N/A"
    pub display_price: String,
    pub selected_variant_id: Option<String>,
    pub grid_label: &'static str,
    pub grid_expanded: bool,
    pub variants: Vec<VariantRow>,
    pub toasts: Vec<ToastFrame>,
}

impl ProductDetailsView {
    fn build(product: &Product, screen: &ProductDetailsScreen) -> Self {
        let selection = &screen.selection;
        ProductDetailsView {
            product_id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            image_url: selection.main_image_url(product),
            display_price: selection.display_price(product),
            selected_variant_id: selection.selected_id().map(str::to_string),
            grid_label: selection.grid_label(),
            grid_expanded: selection.is_expanded(),
            variants: selection.grid_rows(product),
            toasts: screen.toasts.frames(),
        }
    }
}

/// Result of a variant pick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectResponse {
    /// False when the variant was sold out or unknown
    pub accepted: bool,
    pub view: ProductDetailsView,
}

/// Result of pressing "Add to Cart".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    /// `None` when no variant was selected
    pub change: Option<CartChange>,
    pub toast: Option<ToastId>,
    pub totals: CartTotals,
}

fn current_screen(nav: &Navigator) -> AppResult<&ProductDetailsScreen> {
    if nav.active_tab() != Tab::Collection {
        return Err(AppError::navigation("Product commands need the products tab"));
    }
    nav.current_details()
        .ok_or_else(|| AppError::navigation("No product is open"))
}

fn current_screen_mut(nav: &mut Navigator) -> AppResult<&mut ProductDetailsScreen> {
    if nav.active_tab() != Tab::Collection {
        return Err(AppError::navigation("Product commands need the products tab"));
    }
    nav.current_details_mut()
        .ok_or_else(|| AppError::navigation("No product is open"))
}

/// Opens a product from the list.
///
/// ## Arguments
/// * `arg` - 1-based list position or product id
pub fn open_product(
    catalog: &CatalogState,
    config: &ConfigState,
    nav: &mut Navigator,
    arg: &str,
) -> AppResult<ProductDetailsView> {
    debug!(arg = %arg, "open_product command");

    let product = resolve_product(catalog, arg)?;
    nav.push_details(product, config.toast_timings());
    get_product_details(catalog, nav)
}

/// Renders the open product.
pub fn get_product_details(
    catalog: &CatalogState,
    nav: &Navigator,
) -> AppResult<ProductDetailsView> {
    let screen = current_screen(nav)?;
    let product = catalog.catalog().get(screen.product_id())?;
    Ok(ProductDetailsView::build(product, screen))
}

/// Opens or closes the variant grid.
pub fn toggle_variants(
    catalog: &CatalogState,
    nav: &mut Navigator,
) -> AppResult<ProductDetailsView> {
    let screen = current_screen_mut(nav)?;
    let expanded = screen.selection.toggle_grid();
    debug!(expanded, "toggle_variants command");

    let product = catalog.catalog().get(screen.product_id())?;
    Ok(ProductDetailsView::build(product, screen))
}

/// Picks a variant by 1-based grid position or variant id.
///
/// Sold-out and unknown variants leave the selection unchanged.
pub fn select_variant(
    catalog: &CatalogState,
    nav: &mut Navigator,
    arg: &str,
) -> AppResult<SelectResponse> {
    debug!(arg = %arg, "select_variant command");

    let screen = current_screen_mut(nav)?;
    let product = catalog.catalog().get(screen.product_id())?;

    let arg = arg.trim();
    let variant_id = match arg.parse::<usize>() {
        Ok(position) => position
            .checked_sub(1)
            .and_then(|index| product.variants.get(index))
            .map(|variant| variant.id.as_str())
            .unwrap_or_default(),
        Err(_) => arg,
    };

    let accepted = screen.selection.select(product, variant_id);
    if !accepted {
        debug!(variant_id = %variant_id, "variant selection rejected");
    }

    Ok(SelectResponse {
        accepted,
        view: ProductDetailsView::build(product, screen),
    })
}

/// Adds the selected variant to the cart and shows a toast.
///
/// ## Behavior
/// - Nothing selected (every variant sold out): no-op, no toast
/// - Variant already in cart: its quantity grows by one
/// - Otherwise: a new line with quantity 1
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    nav: &mut Navigator,
) -> AppResult<AddToCartResponse> {
    let screen = current_screen_mut(nav)?;
    let product = catalog.catalog().get(screen.product_id())?;
    debug!(
        product_id = %product.id,
        variant_id = ?screen.selection.selected_id(),
        "add_to_cart command"
    );

    let Some(item) = screen.selection.line_item(product)? else {
        return Ok(AddToCartResponse {
            change: None,
            toast: None,
            totals: cart.with_cart(|c| c.totals()),
        });
    };

    let change = cart.dispatch(CartIntent::Add(item));
    let toast = screen.toasts.spawn();

    Ok(AddToCartResponse {
        change: Some(change),
        toast: Some(toast),
        totals: cart.with_cart(|c| c.totals()),
    })
}

/// Leaves the detail screen, back to the product list.
pub fn go_back(nav: &mut Navigator) -> AppResult<()> {
    debug!("go_back command");
    if nav.active_tab() != Tab::Collection || !nav.pop() {
        return Err(AppError::navigation("Already at the product list"));
    }
    Ok(())
}
