//! # Variant Selection
//!
//! The product detail screen's local state: which variant is picked and
//! whether the variant grid is open.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Variant Selection Rules                             │
//! │                                                                         │
//! │  on load      ──► first variant with availableForSale, else none       │
//! │  select(id)   ──► accepted only for an available variant of this       │
//! │                   product; anything else leaves the selection as-is    │
//! │  add to cart  ──► line_item() builds the CartLineItem, quantity 1      │
//! │                                                                         │
//! │  The selection never writes to the cart by itself.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::cart::CartLineItem;
use crate::error::CoreResult;
use crate::types::{Product, Variant};
use crate::PRICE_UNAVAILABLE;

/// Grid toggle label while collapsed.
pub const SHOW_VARIANTS: &str = "Show Variants";

/// Grid toggle label while expanded.
pub const HIDE_VARIANTS: &str = "Hide Variants";

/// One row of the variant grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRow {
    pub variant_id: String,
    /// `"{title} - ${amount}"`, suffixed with `" (Sold Out)"` when unavailable.
    pub label: String,
    pub available: bool,
    pub selected: bool,
}

/// Selected variant and grid state for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSelection {
    product_id: String,
    selected: Option<String>,
    expanded: bool,
}

impl VariantSelection {
    /// Starts on the product's first available variant, grid collapsed.
    pub fn for_product(product: &Product) -> Self {
        VariantSelection {
            product_id: product.id.clone(),
            selected: product.first_available_variant().map(|v| v.id.clone()),
            expanded: false,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Picks a variant.
    ///
    /// Returns false, leaving the selection untouched, when the variant is
    /// unknown, unavailable, or belongs to another product.
    pub fn select(&mut self, product: &Product, variant_id: &str) -> bool {
        if product.id != self.product_id {
            return false;
        }
        match product.variant(variant_id) {
            Some(variant) if variant.available_for_sale => {
                self.selected = Some(variant.id.clone());
                true
            }
            _ => false,
        }
    }

    /// The selected variant record.
    pub fn selected<'a>(&self, product: &'a Product) -> Option<&'a Variant> {
        if product.id != self.product_id {
            return None;
        }
        self.selected
            .as_deref()
            .and_then(|variant_id| product.variant(variant_id))
    }

    /// Selected price with two decimals, or `"N/A"`.
    pub fn display_price(&self, product: &Product) -> String {
        self.selected(product)
            .and_then(|variant| variant.unit_price().ok())
            .map(|price| price.amount_string())
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string())
    }

    /// Variant image, else the product's first image, else empty.
    pub fn main_image_url(&self, product: &Product) -> String {
        self.selected(product)
            .and_then(Variant::image_url)
            .or_else(|| product.first_image_url())
            .unwrap_or_default()
            .to_string()
    }

    /// Builds the line the add-to-cart button dispatches.
    ///
    /// `Ok(None)` when nothing is selected. Errors only if the variant's
    /// price amount is malformed.
    pub fn line_item(&self, product: &Product) -> CoreResult<Option<CartLineItem>> {
        let Some(variant) = self.selected(product) else {
            return Ok(None);
        };

        Ok(Some(CartLineItem {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            title: product.title.clone(),
            variant_title: variant.title.clone(),
            unit_price: variant.unit_price()?,
            image_url: self.main_image_url(product),
            quantity: 1,
        }))
    }

    // =========================================================================
    // Variant Grid
    // =========================================================================

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Opens or closes the grid; returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn grid_label(&self) -> &'static str {
        if self.expanded {
            HIDE_VARIANTS
        } else {
            SHOW_VARIANTS
        }
    }

    /// Every variant of the product in fixture order.
    pub fn grid_rows(&self, product: &Product) -> Vec<VariantRow> {
        product
            .variants
            .iter()
            .map(|variant| {
                let mut label = format!("{} - ${}", variant.title, variant.price.amount);
                if !variant.available_for_sale {
                    label.push_str(" (Sold Out)");
                }
                VariantRow {
                    variant_id: variant.id.clone(),
                    label,
                    available: variant.available_for_sale,
                    selected: self.selected.as_deref() == Some(variant.id.as_str()),
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Image, MoneyV2};

    fn variant(id: &str, available: bool, amount: &str) -> Variant {
        Variant {
            id: id.to_string(),
            title: format!("Size {}", id),
            available_for_sale: available,
            price: MoneyV2 {
                amount: amount.to_string(),
                currency_code: "CAD".to_string(),
            },
            compare_at_price: None,
            image: None,
        }
    }

    fn snowboard() -> Product {
        Product {
            id: "p1".to_string(),
            title: "Snowboard".to_string(),
            description: String::new(),
            available_for_sale: true,
            product_type: String::new(),
            images: vec![Image {
                id: "i1".to_string(),
                url: "https://cdn.example/board.png".to_string(),
            }],
            variants: vec![
                variant("s", false, "25.00"),
                variant("m", true, "28.5"),
                variant("l", true, "30.00"),
            ],
        }
    }

    #[test]
    fn test_default_is_first_available() {
        let product = snowboard();
        let selection = VariantSelection::for_product(&product);
        assert_eq!(selection.selected_id(), Some("m"));
        assert!(!selection.is_expanded());
    }

    #[test]
    fn test_default_none_when_all_sold_out() {
        let mut product = snowboard();
        for v in &mut product.variants {
            v.available_for_sale = false;
        }
        let selection = VariantSelection::for_product(&product);
        assert_eq!(selection.selected_id(), None);
        assert_eq!(selection.display_price(&product), "N/A");
        assert_eq!(selection.line_item(&product).unwrap(), None);
    }

    #[test]
    fn test_select_rejects_unavailable_and_unknown() {
        let product = snowboard();
        let mut selection = VariantSelection::for_product(&product);

        assert!(!selection.select(&product, "s"));
        assert!(!selection.select(&product, "xl"));
        assert_eq!(selection.selected_id(), Some("m"));

        assert!(selection.select(&product, "l"));
        assert_eq!(selection.selected_id(), Some("l"));
    }

    #[test]
    fn test_select_rejects_other_product() {
        let product = snowboard();
        let mut other = snowboard();
        other.id = "p2".to_string();

        let mut selection = VariantSelection::for_product(&product);
        assert!(!selection.select(&other, "l"));
        assert!(selection.selected(&other).is_none());
    }

    #[test]
    fn test_display_price_two_decimals() {
        let product = snowboard();
        let selection = VariantSelection::for_product(&product);
        assert_eq!(selection.display_price(&product), "28.50");
    }

    #[test]
    fn test_main_image_falls_back() {
        let mut product = snowboard();
        let selection = VariantSelection::for_product(&product);
        assert_eq!(selection.main_image_url(&product), "https://cdn.example/board.png");

        product.variants[1].image = Some(Image {
            id: "vi".to_string(),
            url: "https://cdn.example/m.png".to_string(),
        });
        assert_eq!(selection.main_image_url(&product), "https://cdn.example/m.png");

        product.variants[1].image = None;
        product.images.clear();
        assert_eq!(selection.main_image_url(&product), "");
    }

    #[test]
    fn test_line_item() {
        let product = snowboard();
        let selection = VariantSelection::for_product(&product);
        let item = selection.line_item(&product).unwrap().unwrap();

        assert_eq!(item.product_id, "p1");
        assert_eq!(item.variant_id, "m");
        assert_eq!(item.title, "Snowboard");
        assert_eq!(item.variant_title, "Size m");
        assert_eq!(item.unit_price, Money::from_cents(2850));
        assert_eq!(item.image_url, "https://cdn.example/board.png");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_line_item_bad_price() {
        let mut product = snowboard();
        product.variants[1].price.amount = "cheap".to_string();
        let selection = VariantSelection::for_product(&product);
        assert!(selection.line_item(&product).is_err());
    }

    #[test]
    fn test_grid_rows_and_toggle() {
        let product = snowboard();
        let mut selection = VariantSelection::for_product(&product);

        assert_eq!(selection.grid_label(), "Show Variants");
        assert!(selection.toggle_grid());
        assert_eq!(selection.grid_label(), "Hide Variants");

        let rows = selection.grid_rows(&product);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "Size s - $25.00 (Sold Out)");
        assert_eq!(rows[1].label, "Size m - $28.5");
        assert!(rows[1].selected);
        assert!(!rows[2].selected);

        assert!(!selection.toggle_grid());
    }
}
