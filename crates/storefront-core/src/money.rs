//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog amounts arrive as decimal strings: "28.52"                     │
//! │  Parsed as floats and multiplied:                                       │
//! │    28.52 * 3 = 85.55999999999999  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "28.52" → 2852 cents, × 3 = 8556 cents = $85.56                     │
//! │    The string is parsed digit by digit, never through f64              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::parse_amount("28.52").unwrap();
//! assert_eq!(price.cents(), 2852);
//!
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "$85.56");
//! assert_eq!(line_total.amount_string(), "85.56");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Maximum fractional digits accepted by [`Money::parse_amount`].
const MAX_FRACTION_DIGITS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a cart line can hold a non-positive quantity after a
///   raw `set_quantity`, so line totals may go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency field**: the catalog fixture is single-currency; the code
///   is carried on [`crate::types::MoneyV2`] for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a catalog amount string (`"28.52"`, `"10"`, `"7.5"`).
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Digits with an optional `.` and at most two fractional digits
    /// - Negative amounts are rejected (unit prices are non-negative)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_amount("7.5").unwrap().cents(), 750);
    /// assert_eq!(Money::parse_amount("10").unwrap().cents(), 1000);
    /// assert!(Money::parse_amount("ten").is_err());
    /// assert!(Money::parse_amount("1.999").is_err());
    /// ```
    pub fn parse_amount(amount: &str) -> Result<Self, ValidationError> {
        let field = "price.amount";
        let amount = amount.trim();

        if amount.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        if amount.starts_with('-') {
            return Err(ValidationError::MustBeNonNegative {
                field: field.to_string(),
            });
        }

        let (whole, fraction) = match amount.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (amount, ""),
        };

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number like 28.52"));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(invalid("at most two decimal places are supported"));
        }

        let too_large = || invalid("amount is too large");

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(too_large)?;
        }
        cents = cents.checked_mul(CENTS_PER_UNIT).ok_or_else(too_large)?;

        // "7.5" means 50 cents, "7.05" means 5 cents
        let mut scale = CENTS_PER_UNIT / 10;
        for digit in fraction.bytes() {
            cents = cents
                .checked_add(i64::from(digit - b'0') * scale)
                .ok_or_else(too_large)?;
            scale /= 10;
        }

        Ok(Money(cents))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Cart quantities have no upper bound, so this never overflows.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns the amount with two decimals and no symbol (`"28.52"`).
    ///
    /// This is the form the screens print next to a currency symbol.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with a dollar sign (`$28.52`, `-$5.50`).
///
/// The shell formats with its configured symbol instead; this is the
/// fallback used in logs and tests.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating addition; totals of huge lines clamp instead of wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
