//! # Validation Module
//!
//! Input parsing and catalog validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (once, at startup)                              │
//! │  ├── validate_catalog: ids present and unique, prices parse            │
//! │  └── Failure here is fatal for the shell: bad fixture                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: User input (every keystroke batch)                           │
//! │  ├── parse_quantity_input: never fails, defaults to 1                  │
//! │  ├── validate_typed_quantity: two digits at most (1..=99)              │
//! │  └── Unknown ids / unavailable variants: silent no-ops downstream      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::parse_quantity_input;
//!
//! assert_eq!(parse_quantity_input("12"), 12);
//! assert_eq!(parse_quantity_input("abc"), 1);
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;
use crate::DEFAULT_QUANTITY;

/// Largest quantity the cart screen's two-character text field can hold.
pub const MAX_TYPED_QUANTITY: i64 = 99;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Input
// =============================================================================

/// Parses a typed quantity the way the cart screen's text field does.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - An optional `+` or `-` sign
/// - The longest run of ASCII digits that follows is the value;
///   trailing garbage is ignored (`"3 boxes"` is 3)
/// - No digits at all: [`DEFAULT_QUANTITY`]
/// - Values beyond `i64` saturate
///
/// The result is NOT clamped: `"0"` and `"-4"` come back as-is so the
/// caller can route them to a removal confirmation.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input(" 7"), 7);
/// assert_eq!(parse_quantity_input("3 boxes"), 3);
/// assert_eq!(parse_quantity_input("-2"), -2);
/// assert_eq!(parse_quantity_input(""), 1);
/// ```
pub fn parse_quantity_input(text: &str) -> i64 {
    let text = text.trim_start();

    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: Vec<i64> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|d| i64::from(d - b'0'))
        .collect();

    if digits.is_empty() {
        return DEFAULT_QUANTITY;
    }

    let magnitude = digits
        .iter()
        .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Checks a parsed typed quantity against the text field's limit.
///
/// Values below 1 pass through untouched; they mean "remove this line".
///
/// ## Example
/// ```rust
/// use storefront_core::validation::{parse_quantity_input, validate_typed_quantity};
///
/// assert_eq!(validate_typed_quantity(parse_quantity_input("12")), Ok(12));
/// assert_eq!(validate_typed_quantity(0), Ok(0));
/// assert!(validate_typed_quantity(parse_quantity_input("99999999999999999999")).is_err());
/// ```
pub fn validate_typed_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity > MAX_TYPED_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: DEFAULT_QUANTITY,
            max: MAX_TYPED_QUANTITY,
        });
    }
    Ok(quantity)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates that an identifier is present.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the catalog fixture as a whole.
///
/// ## Rules
/// - Every product id is non-empty and unique across the catalog
/// - Every variant id is non-empty and unique within its product
/// - Every variant price (and compare-at price) parses as [`crate::Money`]
///
/// A product with no variants is allowed: it renders as "N/A" and
/// cannot be added to the cart.
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut product_ids = HashSet::new();

    for product in products {
        validate_id("product.id", &product.id)?;
        if !product_ids.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product.id".to_string(),
                value: product.id.clone(),
            });
        }

        let mut variant_ids = HashSet::new();
        for variant in &product.variants {
            validate_id("variant.id", &variant.id)?;
            if !variant_ids.insert(variant.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "variant.id".to_string(),
                    value: variant.id.clone(),
                });
            }

            variant.unit_price()?;
            if let Some(compare_at) = &variant.compare_at_price {
                compare_at.to_money()?;
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MoneyV2, Variant};

    fn product(id: &str, variants: Vec<Variant>) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            available_for_sale: true,
            product_type: String::new(),
            images: Vec::new(),
            variants,
        }
    }

    fn variant(id: &str, amount: &str) -> Variant {
        Variant {
            id: id.to_string(),
            title: id.to_string(),
            available_for_sale: true,
            price: MoneyV2 {
                amount: amount.to_string(),
                currency_code: "CAD".to_string(),
            },
            compare_at_price: None,
            image: None,
        }
    }

    #[test]
    fn test_parse_quantity_numeric() {
        assert_eq!(parse_quantity_input("5"), 5);
        assert_eq!(parse_quantity_input("  42"), 42);
        assert_eq!(parse_quantity_input("+3"), 3);
        assert_eq!(parse_quantity_input("07"), 7);
    }

    #[test]
    fn test_typed_quantity_limit() {
        assert_eq!(validate_typed_quantity(1), Ok(1));
        assert_eq!(validate_typed_quantity(99), Ok(99));
        assert_eq!(validate_typed_quantity(-4), Ok(-4));

        let err = validate_typed_quantity(100).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be between 1 and 99");
        assert!(validate_typed_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_parse_quantity_prefix_only() {
        assert_eq!(parse_quantity_input("12abc"), 12);
        assert_eq!(parse_quantity_input("4.9"), 4);
    }

    #[test]
    fn test_parse_quantity_non_numeric_defaults_to_one() {
        assert_eq!(parse_quantity_input(""), 1);
        assert_eq!(parse_quantity_input("   "), 1);
        assert_eq!(parse_quantity_input("abc"), 1);
        assert_eq!(parse_quantity_input("-"), 1);
        assert_eq!(parse_quantity_input("x5"), 1);
    }

    #[test]
    fn test_parse_quantity_keeps_non_positive() {
        assert_eq!(parse_quantity_input("0"), 0);
        assert_eq!(parse_quantity_input("-4"), -4);
    }

    #[test]
    fn test_parse_quantity_saturates() {
        assert_eq!(parse_quantity_input("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_validate_catalog_ok() {
        let products = vec![
            product("p1", vec![variant("v1", "10.00"), variant("v2", "12.50")]),
            product("p2", vec![variant("v1", "3")]),
            product("p3", Vec::new()),
        ];
        assert!(validate_catalog(&products).is_ok());
    }

    #[test]
    fn test_validate_catalog_duplicate_product() {
        let products = vec![product("p1", Vec::new()), product("p1", Vec::new())];
        assert_eq!(
            validate_catalog(&products),
            Err(ValidationError::Duplicate {
                field: "product.id".to_string(),
                value: "p1".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_catalog_duplicate_variant() {
        let products = vec![product("p1", vec![variant("v1", "1"), variant("v1", "2")])];
        assert!(matches!(
            validate_catalog(&products),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_bad_price() {
        let products = vec![product("p1", vec![variant("v1", "free")])];
        assert!(matches!(
            validate_catalog(&products),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_missing_id() {
        let products = vec![product(" ", Vec::new())];
        assert!(matches!(
            validate_catalog(&products),
            Err(ValidationError::Required { .. })
        ));
    }
}
