//! # Catalog
//!
//! The read-only product catalog, loaded once from JSON.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::validate_catalog;
use crate::PRICE_UNAVAILABLE;

/// A product-list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    /// First product image, or empty.
    pub image_url: String,
    /// First available variant's price with two decimals, or `"N/A"`.
    pub display_price: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let display_price = product
            .first_available_variant()
            .and_then(|variant| variant.unit_price().ok())
            .map(|price| price.amount_string())
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

        ProductCard {
            id: product.id.clone(),
            title: product.title.clone(),
            image_url: product.first_image_url().unwrap_or_default().to_string(),
            display_price,
        }
    }
}

/// Validated product sequence in fixture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Decodes a JSON array of products and validates it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Wraps already-decoded products after validating them.
    pub fn from_products(products: Vec<Product>) -> CoreResult<Self> {
        validate_catalog(&products).map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Ok(Catalog { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Like [`Catalog::find`], but missing ids are an error.
    pub fn get(&self, product_id: &str) -> CoreResult<&Product> {
        self.find(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Product-list rows in catalog order.
    pub fn cards(&self) -> Vec<ProductCard> {
        self.products.iter().map(ProductCard::from).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
