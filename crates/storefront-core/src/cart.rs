//! # Cart Store
//!
//! The single source of truth for what the shopper is buying.
//!
//! ## Intents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Intents                                   │
//! │                                                                         │
//! │  Screen Action            Intent                  State Change          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  Tap "+" on detail ─────► Add(item) ────────┬───► push(item)           │
//! │                                             └───► items[i].qty += n    │
//! │                                                   (same variant id)     │
//! │                                                                         │
//! │  Stepper / typed qty ───► SetQuantity(v, n) ────► items[i].qty = n     │
//! │                                                   (verbatim, no clamp)  │
//! │                                                                         │
//! │  Confirm remove ────────► Remove(v) ────────────► items.remove(i)      │
//! │                                                                         │
//! │  Unknown variant id on Remove / SetQuantity: no-op, never an error.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per `variant_id`
//! - Insertion order is preserved; quantity edits never move a line
//! - Totals are computed on every read, never stored
//!
//! ## Caller Responsibility
//! `set_quantity` writes the value it is given, including zero and negative
//! numbers. The cart screen is expected to ask for removal instead of
//! dispatching a quantity below 1.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// A purchasable unit already resolved to a specific variant.
///
/// Title, price and image are a snapshot taken when the line was first
/// added; merging a later add of the same variant keeps the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,

    /// Unique key within the cart.
    pub variant_id: String,

    /// Product title.
    pub title: String,

    pub variant_title: String,

    /// Non-negative unit price.
    pub unit_price: Money,

    /// May be empty.
    pub image_url: String,

    pub quantity: i64,
}

impl CartLineItem {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A named mutation request for the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    Add(CartLineItem),
    Remove { variant_id: String },
    SetQuantity { variant_id: String, quantity: i64 },
}

/// What applying an intent did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartChange {
    /// A new line was pushed at the end.
    Appended,
    /// An existing line's quantity grew.
    Merged,
    /// A line was deleted.
    Removed,
    /// A line's quantity was overwritten.
    QuantitySet,
    /// The intent referenced a variant that is not in the cart.
    Unchanged,
}

// =============================================================================
// Cart Store
// =============================================================================

/// Ordered collection of line items keyed by variant id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    items: Vec<CartLineItem>,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one intent and reports what changed.
    pub fn apply(&mut self, intent: CartIntent) -> CartChange {
        match intent {
            CartIntent::Add(item) => self.add(item),
            CartIntent::Remove { variant_id } => self.remove(&variant_id),
            CartIntent::SetQuantity {
                variant_id,
                quantity,
            } => self.set_quantity(&variant_id, quantity),
        }
    }

    /// Adds an item, merging into an existing line with the same variant.
    ///
    /// ## Behavior
    /// - Variant already in cart: its quantity grows by `item.quantity`;
    ///   the rest of `item` is discarded
    /// - Otherwise: `item` is appended as the last line
    pub fn add(&mut self, item: CartLineItem) -> CartChange {
        if let Some(existing) = self.find_mut(&item.variant_id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return CartChange::Merged;
        }

        self.items.push(item);
        CartChange::Appended
    }

    /// Removes the line for `variant_id`, if present.
    pub fn remove(&mut self, variant_id: &str) -> CartChange {
        let initial_len = self.items.len();
        self.items.retain(|i| i.variant_id != variant_id);

        if self.items.len() == initial_len {
            CartChange::Unchanged
        } else {
            CartChange::Removed
        }
    }

    /// Overwrites the quantity of the line for `variant_id`, if present.
    ///
    /// The value is stored verbatim; see the module docs for who is
    /// responsible for quantities below 1.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: i64) -> CartChange {
        match self.find_mut(variant_id) {
            Some(item) => {
                item.quantity = quantity;
                CartChange::QuantitySet
            }
            None => CartChange::Unchanged,
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn find_mut(&mut self, variant_id: &str) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.variant_id == variant_id)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line for a variant.
    pub fn get(&self, variant_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.variant_id == variant_id)
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items (the tab badge number).
    ///
    /// Saturates, like [`Money`] sums, since quantities are unbounded.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of unit price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of every derived total.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_price: Money,
}

impl From<&CartStore> for CartTotals {
    fn from(cart: &CartStore) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(variant_id: &str, price_cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            product_id: "1".to_string(),
            variant_id: variant_id.to_string(),
            title: "Product 1".to_string(),
            variant_title: format!("Variant {}", variant_id),
            unit_price: Money::from_cents(price_cents),
            image_url: "https://example.com/image".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_add_new_variant_appends() {
        let mut cart = CartStore::new();

        assert_eq!(cart.add(line("1", 1000, 2)), CartChange::Appended);
        assert_eq!(cart.add(line("2", 500, 1)), CartChange::Appended);

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.items()[1].variant_id, "2");
    }

    #[test]
    fn test_add_same_variant_merges_and_keeps_snapshot() {
        let mut cart = CartStore::new();
        cart.add(line("1", 1000, 1));

        let mut again = line("1", 9999, 2);
        again.title = "Renamed".to_string();
        assert_eq!(cart.add(again), CartChange::Merged);

        let item = cart.get("1").unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.title, "Product 1");
        assert_eq!(item.unit_price, Money::from_cents(1000));
    }

    #[test]
    fn test_insertion_order_survives_edits() {
        let mut cart = CartStore::new();
        cart.add(line("a", 100, 1));
        cart.add(line("b", 100, 1));
        cart.add(line("c", 100, 1));

        cart.set_quantity("a", 9);
        cart.add(line("b", 100, 4));

        let order: Vec<&str> = cart.items().iter().map(|i| i.variant_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove() {
        let mut cart = CartStore::new();
        cart.add(line("1", 1000, 2));
        cart.add(line("2", 300, 1));

        assert_eq!(cart.remove("1"), CartChange::Removed);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_price(), Money::from_cents(300));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartStore::new();
        cart.add(line("1", 1000, 2));
        let before = cart.clone();

        assert_eq!(cart.remove("nope"), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = CartStore::new();
        cart.add(line("1", 1000, 7));

        assert_eq!(cart.set_quantity("1", 2), CartChange::QuantitySet);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_does_not_clamp() {
        let mut cart = CartStore::new();
        cart.add(line("1", 1000, 1));

        cart.set_quantity("1", 0);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 0);

        cart.set_quantity("1", -3);
        assert_eq!(cart.get("1").unwrap().quantity, -3);
        assert_eq!(cart.total_price(), Money::from_cents(-3000));
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = CartStore::new();
        assert_eq!(cart.set_quantity("1", 5), CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_apply_dispatches_intents() {
        let mut cart = CartStore::new();
        assert_eq!(cart.apply(CartIntent::Add(line("1", 1000, 1))), CartChange::Appended);
        assert_eq!(
            cart.apply(CartIntent::SetQuantity {
                variant_id: "1".to_string(),
                quantity: 4,
            }),
            CartChange::QuantitySet
        );
        assert_eq!(
            cart.apply(CartIntent::Remove {
                variant_id: "1".to_string(),
            }),
            CartChange::Removed
        );
        assert!(cart.is_empty());
    }

    /// add → add same → set quantity → remove, checking every total.
    #[test]
    fn test_scenario_walkthrough() {
        let mut cart = CartStore::new();

        cart.add(line("1", 1000, 1));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_price().to_string(), "$10.00");

        cart.add(line("1", 1000, 2));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_price().to_string(), "$30.00");

        cart.set_quantity("1", 5);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_price().to_string(), "$50.00");

        cart.remove("1");
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_price().to_string(), "$0.00");
    }

    #[test]
    fn test_totals_snapshot() {
        let mut cart = CartStore::new();
        cart.add(line("1", 250, 2));
        cart.add(line("2", 1000, 1));

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total_price, Money::from_cents(1500));
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add(line("1", 999, 2));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = CartStore::new();
        cart.add(line("1", 74995, i64::MAX));
        cart.add(line("1", 74995, 5));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, i64::MAX);

        cart.add(line("2", 100, 3));
        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(cart.total_price().cents(), i64::MAX);

        cart.set_quantity("1", i64::MIN);
        assert_eq!(cart.get("1").unwrap().line_total().cents(), i64::MIN);
        assert_eq!(cart.totals().item_count, 2);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    fn arb_intent() -> impl Strategy<Value = CartIntent> {
        let variant = prop::sample::select(vec!["a", "b", "c", "d"]);
        prop_oneof![
            (variant.clone(), 0_i64..10_000, 1_i64..20).prop_map(|(v, price, qty)| {
                CartIntent::Add(line(v, price, qty))
            }),
            variant.clone().prop_map(|v| CartIntent::Remove {
                variant_id: v.to_string(),
            }),
            (variant, -5_i64..50).prop_map(|(v, quantity)| CartIntent::SetQuantity {
                variant_id: v.to_string(),
                quantity,
            }),
        ]
    }

    proptest! {
        /// Derived totals always agree with a fresh fold over the lines.
        #[test]
        fn prop_totals_recomputable(intents in prop::collection::vec(arb_intent(), 0..60)) {
            let mut cart = CartStore::new();
            for intent in intents {
                cart.apply(intent);

                let expected_qty: i64 = cart.items().iter().map(|i| i.quantity).sum();
                let expected_cents: i64 = cart
                    .items()
                    .iter()
                    .map(|i| i.unit_price.cents() * i.quantity)
                    .sum();

                prop_assert_eq!(cart.item_count(), cart.items().len());
                prop_assert_eq!(cart.total_quantity(), expected_qty);
                prop_assert_eq!(cart.total_price().cents(), expected_cents);
            }
        }

        /// No two lines ever share a variant id.
        #[test]
        fn prop_variant_ids_unique(intents in prop::collection::vec(arb_intent(), 0..60)) {
            let mut cart = CartStore::new();
            for intent in intents {
                cart.apply(intent);
                let mut ids: Vec<&str> = cart.items().iter().map(|i| i.variant_id.as_str()).collect();
                let len = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), len);
            }
        }

        /// Any quantity, however large, yields totals clamped to `i64`.
        #[test]
        fn prop_totals_saturate(
            quantities in prop::collection::vec(any::<i64>(), 1..8),
            price in 0_i64..1_000_000,
        ) {
            let mut cart = CartStore::new();
            for (index, quantity) in quantities.iter().enumerate() {
                cart.add(line(&index.to_string(), price, 1));
                cart.set_quantity(&index.to_string(), *quantity);
            }

            let clamp = |v: i128| v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
            let expected_qty = quantities
                .iter()
                .fold(0_i64, |acc, q| clamp(i128::from(acc) + i128::from(*q)));
            let expected_cents = quantities.iter().fold(0_i64, |acc, q| {
                let line_total = clamp(i128::from(price) * i128::from(*q));
                clamp(i128::from(acc) + i128::from(line_total))
            });

            prop_assert_eq!(cart.total_quantity(), expected_qty);
            prop_assert_eq!(cart.total_price().cents(), expected_cents);
        }

        /// Add changes the length only when the variant is new, and always
        /// grows the unit count by exactly the added quantity.
        #[test]
        fn prop_add_length_and_units(
            intents in prop::collection::vec(arb_intent(), 0..30),
            price in 0_i64..10_000,
            qty in 1_i64..20,
            variant in prop::sample::select(vec!["a", "b", "e"]),
        ) {
            let mut cart = CartStore::new();
            for intent in intents {
                cart.apply(intent);
            }

            let was_present = cart.get(variant).is_some();
            let len_before = cart.item_count();
            let units_before = cart.total_quantity();

            let change = cart.add(line(variant, price, qty));

            if was_present {
                prop_assert_eq!(change, CartChange::Merged);
                prop_assert_eq!(cart.item_count(), len_before);
            } else {
                prop_assert_eq!(change, CartChange::Appended);
                prop_assert_eq!(cart.item_count(), len_before + 1);
                prop_assert_eq!(cart.items().last().map(|i| i.variant_id.as_str()), Some(variant));
            }
            prop_assert_eq!(cart.total_quantity(), units_before + qty);
        }
    }
}
