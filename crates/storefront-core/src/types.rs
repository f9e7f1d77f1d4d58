//! # Catalog Types
//!
//! The schema of the bundled product fixture. These are read-only records:
//! nothing in the storefront writes to them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │ 1    * │    Variant      │                        │
//! │  │  ─────────────  │───────►│  ─────────────  │                        │
//! │  │  id             │        │  id             │  ┌─────────────────┐   │
//! │  │  title          │        │  title          │  │    MoneyV2      │   │
//! │  │  description    │        │  availableFor.. │─►│  amount "28.52" │   │
//! │  │  availableFor.. │        │  price          │  │  currencyCode   │   │
//! │  │  images[]       │        │  compareAtPrice?│  └─────────────────┘   │
//! │  └────────┬────────┘        │  image?         │                        │
//! │           │ *               └────────┬────────┘                        │
//! │           ▼                          │ 0..1                            │
//! │  ┌─────────────────┐                 │                                 │
//! │  │     Image       │◄────────────────┘                                 │
//! │  │  id, url        │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the fixture's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Image
// =============================================================================

/// A product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub url: String,
}

// =============================================================================
// MoneyV2
// =============================================================================

/// A price as it appears in the fixture: a decimal string plus currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    /// Decimal amount, e.g. `"28.52"`.
    pub amount: String,

    /// ISO 4217 code, e.g. `"CAD"`.
    pub currency_code: String,
}

impl MoneyV2 {
    /// Parses the amount into integer cents.
    pub fn to_money(&self) -> Result<Money, ValidationError> {
        Money::parse_amount(&self.amount)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A purchasable configuration of a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: MoneyV2,

    /// Original price when the variant is discounted.
    #[serde(default)]
    pub compare_at_price: Option<MoneyV2>,

    /// Variant-specific image; falls back to the product's first image.
    #[serde(default)]
    pub image: Option<Image>,
}

impl Variant {
    /// Returns the unit price in cents.
    pub fn unit_price(&self) -> Result<Money, ValidationError> {
        self.price.to_money()
    }

    /// Returns the variant image url when present and non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// True when a compare-at price exists and is above the current price.
    pub fn is_discounted(&self) -> bool {
        let Some(compare_at) = &self.compare_at_price else {
            return false;
        };
        match (compare_at.to_money(), self.unit_price()) {
            (Ok(compare_at), Ok(price)) => compare_at > price,
            _ => false,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub available_for_sale: bool,

    #[serde(default)]
    pub product_type: String,

    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Url of the first product image, if any.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// First variant with `availableForSale = true`.
    pub fn first_available_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|v| v.available_for_sale)
    }

    /// Looks up a variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
