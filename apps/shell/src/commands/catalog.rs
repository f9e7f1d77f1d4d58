//! # Catalog Commands
//!
//! The product list screen.

use storefront_core::{Product, ProductCard};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::CatalogState;

/// Product list rows in catalog order.
pub fn list_products(catalog: &CatalogState) -> Vec<ProductCard> {
    debug!("list_products command");
    catalog.catalog().cards()
}

/// Finds a product by 1-based list position or by id.
///
/// ## Arguments
/// * `arg` - `"2"` for the second row, or a full product id
pub fn resolve_product<'a>(catalog: &'a CatalogState, arg: &str) -> AppResult<&'a Product> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(AppError::validation("Product number or id is required"));
    }

    let products = catalog.catalog().products();
    if let Ok(position) = arg.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| products.get(index))
            .ok_or_else(|| AppError::not_found("Product", arg));
    }

    Ok(catalog.catalog().get(arg)?)
}
