//! # Cart Commands
//!
//! The cart screen. Quantities below 1 never reach the store from here:
//! they turn into a removal confirmation instead.
//!
//! ## Quantity Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Screen Quantity Policy                          │
//! │                                                                         │
//! │  "+"            ──► q + 1 ──────────────────────┐                       │
//! │  "-"            ──► q - 1 ──────────────────────┤                       │
//! │  typed "<text>" ──► parse_quantity_input(text) ─┤   ("abc" → 1,         │
//! │                     validate_typed_quantity     │    > 99 rejected)     │
//! │                                                 ▼                       │
//! │                                   ┌───────────────────────┐            │
//! │                                   │     new q >= 1 ?      │            │
//! │                                   └──────┬─────────┬──────┘            │
//! │                                     yes  │         │  no               │
//! │                                          ▼         ▼                    │
//! │                          set_quantity(id, q)   "Remove Item" prompt    │
//! │                                                    │                    │
//! │                                          confirm ──┴──► remove(id)     │
//! │                                          cancel  ─────► (unchanged)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::validation::{parse_quantity_input, validate_typed_quantity};
use storefront_core::{CartIntent, CartLineItem, CartStore, CartTotals};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::navigation::cart_badge;
use crate::state::{CartState, ConfigState};

pub const EMPTY_CART_TITLE: &str = "Your cart is empty!";
pub const EMPTY_CART_SUBTITLE: &str = "Start shopping now!";

pub const REMOVE_ITEM_TITLE: &str = "Remove Item";
pub const REMOVE_ITEM_MESSAGE: &str = "Are you sure you want to remove this item?";

pub const CHECKOUT_TITLE: &str = "Thank you!";
pub const CHECKOUT_MESSAGE: &str = "Your time checking out this app is appreciated!";

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    /// Tab badge text, absent when the cart holds no units
    pub badge: Option<String>,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
            badge: cart_badge(cart.total_quantity()),
        }
    }
}

/// A pending removal waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPrompt {
    pub variant_id: String,
    pub item_title: String,
    pub title: &'static str,
    pub message: &'static str,
}

impl RemovalPrompt {
    fn for_item(item: &CartLineItem) -> Self {
        RemovalPrompt {
            variant_id: item.variant_id.clone(),
            item_title: format!("{} - {}", item.title, item.variant_title),
            title: REMOVE_ITEM_TITLE,
            message: REMOVE_ITEM_MESSAGE,
        }
    }
}

/// What a quantity edit led to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum QuantityOutcome {
    /// The store was updated.
    Updated(CartResponse),
    /// The new quantity was below 1; nothing was dispatched.
    ConfirmRemoval(RemovalPrompt),
}

/// Placeholder checkout acknowledgement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutAck {
    pub title: &'static str,
    pub message: &'static str,
    pub totals: CartTotals,
    pub acknowledged_at: DateTime<Utc>,
}

/// Line item at a 1-based cart position.
fn line_at(cart: &CartState, line: usize) -> AppResult<CartLineItem> {
    cart.with_cart(|c| {
        line.checked_sub(1)
            .and_then(|index| c.items().get(index))
            .cloned()
    })
    .ok_or_else(|| AppError::not_found("Cart line", &line.to_string()))
}

fn apply_quantity(cart: &CartState, item: &CartLineItem, quantity: i64) -> QuantityOutcome {
    if quantity < 1 {
        debug!(variant_id = %item.variant_id, quantity, "quantity below 1, asking to remove");
        return QuantityOutcome::ConfirmRemoval(RemovalPrompt::for_item(item));
    }

    cart.dispatch(CartIntent::SetQuantity {
        variant_id: item.variant_id.clone(),
        quantity,
    });
    QuantityOutcome::Updated(get_cart(cart))
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// The "+" stepper button.
pub fn increment(cart: &CartState, line: usize) -> AppResult<QuantityOutcome> {
    debug!(line, "increment command");
    let item = line_at(cart, line)?;
    Ok(apply_quantity(cart, &item, item.quantity.saturating_add(1)))
}

/// The "-" stepper button.
pub fn decrement(cart: &CartState, line: usize) -> AppResult<QuantityOutcome> {
    debug!(line, "decrement command");
    let item = line_at(cart, line)?;
    Ok(apply_quantity(cart, &item, item.quantity.saturating_sub(1)))
}

/// A quantity typed into the line's text field.
///
/// The field holds two characters, so anything above 99 is rejected
/// before the store sees it.
pub fn set_quantity_text(cart: &CartState, line: usize, text: &str) -> AppResult<QuantityOutcome> {
    debug!(line, text = %text, "set_quantity_text command");
    let item = line_at(cart, line)?;
    let quantity = validate_typed_quantity(parse_quantity_input(text))
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(apply_quantity(cart, &item, quantity))
}

/// The remove button: always asks first.
pub fn request_removal(cart: &CartState, line: usize) -> AppResult<RemovalPrompt> {
    debug!(line, "request_removal command");
    let item = line_at(cart, line)?;
    Ok(RemovalPrompt::for_item(&item))
}

/// The user confirmed a removal prompt.
pub fn confirm_removal(cart: &CartState, prompt: &RemovalPrompt) -> CartResponse {
    debug!(variant_id = %prompt.variant_id, "confirm_removal command");
    cart.dispatch(CartIntent::Remove {
        variant_id: prompt.variant_id.clone(),
    });
    get_cart(cart)
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// The checkout button. Disabled for an empty cart; never modifies it.
pub fn checkout(cart: &CartState) -> AppResult<CheckoutAck> {
    debug!("checkout command");
    let totals = cart.with_cart(CartStore::totals);
    if totals.item_count == 0 {
        return Err(AppError::new(
            ErrorCode::CheckoutDisabled,
            "Checkout is disabled while the cart is empty",
        ));
    }

    info!(
        lines = totals.item_count,
        units = totals.total_quantity,
        total = %totals.total_price,
        "checkout acknowledged"
    );
    Ok(CheckoutAck {
        title: CHECKOUT_TITLE,
        message: CHECKOUT_MESSAGE,
        totals,
        acknowledged_at: Utc::now(),
    })
}

/// `"$line_total  ($unit x qty)"` in the configured currency.
pub fn format_line(config: &ConfigState, item: &CartLineItem) -> String {
    format!(
        "{}  ({} x {})",
        config.format_currency(item.line_total()),
        config.format_currency(item.unit_price),
        item.quantity
    )
}
