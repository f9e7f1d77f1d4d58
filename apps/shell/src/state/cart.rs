//! # Cart State
//!
//! Shares the one [`CartStore`] between the detail screens (which add) and
//! the cart screen (which edits).
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  User Action              Command                 Cart Store Intent     │
//! │  ───────────              ───────                 ─────────────────     │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► add(item)            │
//! │                                                                         │
//! │  + / - / typed qty ──────► increment() etc. ────► set_quantity(id, q)  │
//! │                                                                         │
//! │  Remove (confirmed) ─────► confirm_removal() ───► remove(id)           │
//! │                                                                         │
//! │  Clear ──────────────────► clear_cart() ────────► clear()              │
//! │                                                                         │
//! │  View Cart / badge ──────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{CartChange, CartIntent, CartStore};
use tracing::debug;

/// Shared handle to the cart.
///
/// Cloning shares the same cart. A poisoned lock is recovered: every
/// intent leaves the store valid, so the data behind it is still good.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Applies one intent and logs what it did.
    pub fn dispatch(&self, intent: CartIntent) -> CartChange {
        let change = self.with_cart_mut(|cart| cart.apply(intent));
        debug!(?change, "cart intent applied");
        change
    }

    /// Total unit count, as shown on the tab badge.
    pub fn total_quantity(&self) -> i64 {
        self.with_cart(CartStore::total_quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartLineItem, Money};

    fn item(variant_id: &str, quantity: i64) -> CartLineItem {
        CartLineItem {
            product_id: "p1".to_string(),
            variant_id: variant_id.to_string(),
            title: "Snowboard".to_string(),
            variant_title: variant_id.to_string(),
            unit_price: Money::from_cents(1000),
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_clones_share_cart() {
        let state = CartState::new();
        let other = state.clone();

        assert_eq!(state.dispatch(CartIntent::Add(item("v1", 2))), CartChange::Appended);
        assert_eq!(other.total_quantity(), 2);

        other.dispatch(CartIntent::Remove {
            variant_id: "v1".to_string(),
        });
        assert!(state.with_cart(CartStore::is_empty));
    }

    #[test]
    fn test_recovers_from_poison() {
        let state = CartState::new();
        state.dispatch(CartIntent::Add(item("v1", 1)));

        let poisoner = state.clone();
        let result = std::thread::spawn(move || {
            poisoner.with_cart_mut(|_| panic!("panic while holding the cart"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(state.total_quantity(), 1);
        state.dispatch(CartIntent::SetQuantity {
            variant_id: "v1".to_string(),
            quantity: 4,
        });
        assert_eq!(state.total_quantity(), 4);
    }
}
