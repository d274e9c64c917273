//! # Cart
//!
//! The shopping cart: line items keyed by product and variation selection.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (product_id, selection)  ──►  one CartLineItem                         │
//! │                                                                         │
//! │  add("1", 2, {Size: 30ml})  → new line           qty 2                 │
//! │  add("1", 1, {Size: 30ml})  → same identity      qty 3  (merged)       │
//! │  add("1", 1, {Size: 60ml})  → different identity qty 1  (new line)     │
//! │                                                                         │
//! │  Selections are BTreeMaps: key order never matters, hashing is         │
//! │  canonical, so identity lookup is a single hash probe.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are kept in an `IndexMap` so the cart page shows them in the order
//! they were first added.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Variation Selection
// =============================================================================

/// Chosen option per variation axis, e.g. `{Size: 60ml, Shade: Chili}`.
///
/// The map is sorted by axis, so its derived `Hash`/`Eq` are already the
/// canonical identity: no textual key is built. Serializes as a plain
/// JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariationSelection(BTreeMap<String, String>);

impl VariationSelection {
    /// The empty selection (products without variations).
    pub fn new() -> Self {
        VariationSelection(BTreeMap::new())
    }

    /// Builder-style insert.
    ///
    /// ```rust
    /// use glow_core::VariationSelection;
    ///
    /// let a = VariationSelection::new().with("Size", "60ml").with("Shade", "Chili");
    /// let b = VariationSelection::new().with("Shade", "Chili").with("Size", "60ml");
    /// assert_eq!(a, b);
    /// ```
    pub fn with(mut self, axis: impl Into<String>, option: impl Into<String>) -> Self {
        self.0.insert(axis.into(), option.into());
        self
    }

    /// Sets the option for an axis, returning the previous one.
    pub fn insert(&mut self, axis: impl Into<String>, option: impl Into<String>) -> Option<String> {
        self.0.insert(axis.into(), option.into())
    }

    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0.get(axis).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Axis/option pairs sorted by axis name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariationSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        VariationSelection(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One row in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    /// Always ≥ 1.
    pub quantity: u32,
    pub selection: VariationSelection,
}

impl CartLineItem {
    pub fn new(product_id: impl Into<String>, quantity: u32, selection: VariationSelection) -> Self {
        CartLineItem {
            product_id: product_id.into(),
            quantity,
            selection,
        }
    }

    fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            selection: self.selection.clone(),
        }
    }
}

/// Hash key for a line: product id plus full selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LineKey {
    product_id: String,
    selection: VariationSelection,
}

impl LineKey {
    fn new(product_id: &str, selection: &VariationSelection) -> Self {
        LineKey {
            product_id: product_id.to_string(),
            selection: selection.clone(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per (product_id, selection)
/// - Every quantity is ≥ 1; decrements stop at 1, removal is explicit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: IndexMap<LineKey, CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds units of a product, merging into an existing line when the
    /// identity matches.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(MustBePositive)` if `quantity` is zero; the cart is unchanged
    pub fn add_item(
        &mut self,
        product_id: &str,
        quantity: u32,
        selection: VariationSelection,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        let key = LineKey {
            product_id: product_id.to_string(),
            selection,
        };

        match self.lines.get_mut(&key) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => {
                let line = CartLineItem {
                    product_id: key.product_id.clone(),
                    quantity,
                    selection: key.selection.clone(),
                };
                self.lines.insert(key, line);
            }
        }

        Ok(())
    }

    /// Deletes the line with this identity. Returns `false` if absent.
    pub fn remove_item(&mut self, product_id: &str, selection: &VariationSelection) -> bool {
        self.lines
            .shift_remove(&LineKey::new(product_id, selection))
            .is_some()
    }

    /// Adjusts a line's quantity by `delta`, never going below 1.
    ///
    /// Returns `false` if no line has this identity.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        selection: &VariationSelection,
        delta: i64,
    ) -> bool {
        match self.lines.get_mut(&LineKey::new(product_id, selection)) {
            Some(line) => {
                let next = i64::from(line.quantity).saturating_add(delta).max(1);
                line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Looks up a line by identity.
    pub fn get(&self, product_id: &str, selection: &VariationSelection) -> Option<&CartLineItem> {
        self.lines.get(&LineKey::new(product_id, selection))
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.values()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines (the badge count).
    pub fn total_item_count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Rebuilds a cart from persisted lines, merging duplicate identities.
impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        let mut lines: IndexMap<LineKey, CartLineItem> = IndexMap::with_capacity(items.len());
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match lines.get_mut(&item.key()) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => {
                    lines.insert(item.key(), item);
                }
            }
        }
        Cart { lines }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn size(option: &str) -> VariationSelection {
        VariationSelection::new().with("Size", option)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item("1", 2, size("30ml")).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_cart_add_same_identity_merges() {
        let mut cart = Cart::new();
        cart.add_item("1", 2, size("30ml")).unwrap();
        cart.add_item("1", 3, size("30ml")).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 5);
    }

    #[test]
    fn test_cart_selection_key_order_is_irrelevant() {
        let mut cart = Cart::new();
        let a: VariationSelection = [("Size", "60ml"), ("Shade", "Chili")].into_iter().collect();
        let b: VariationSelection = [("Shade", "Chili"), ("Size", "60ml")].into_iter().collect();

        cart.add_item("3", 1, a).unwrap();
        cart.add_item("3", 1, b).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_cart_different_selection_is_new_line() {
        let mut cart = Cart::new();
        cart.add_item("1", 1, size("30ml")).unwrap();
        cart.add_item("1", 1, size("60ml")).unwrap();
        cart.add_item("1", 1, VariationSelection::new()).unwrap();
        cart.add_item("2", 1, size("30ml")).unwrap();

        assert_eq!(cart.line_count(), 4);
    }

    #[test]
    fn test_cart_merge_invariant_over_sequence() {
        let mut cart = Cart::new();
        let adds = [
            ("1", 2, "30ml"),
            ("2", 1, "236ml"),
            ("1", 1, "60ml"),
            ("1", 4, "30ml"),
            ("2", 5, "236ml"),
            ("1", 1, "30ml"),
        ];
        for (id, qty, opt) in adds {
            cart.add_item(id, qty, size(opt)).unwrap();
        }

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 7);
        assert_eq!(cart.get("2", &size("236ml")).unwrap().quantity, 6);
        assert_eq!(cart.get("1", &size("60ml")).unwrap().quantity, 1);
        assert_eq!(cart.total_item_count(), 14);
    }

    #[test]
    fn test_cart_rejects_zero_quantity() {
        let mut cart = Cart::new();
        let err = cart.add_item("1", 0, size("30ml")).unwrap_err();

        assert!(matches!(err, ValidationError::MustBePositive { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item("1", 1, size("30ml")).unwrap();

        assert!(cart.update_quantity("1", &size("30ml"), -5));
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 1);

        assert!(cart.update_quantity("1", &size("30ml"), 4));
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 5);

        assert!(cart.update_quantity("1", &size("30ml"), -2));
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_quantity_extreme_deltas_saturate() {
        let mut cart = Cart::new();
        cart.add_item("1", 1, size("30ml")).unwrap();

        assert!(cart.update_quantity("1", &size("30ml"), i64::MAX));
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, u32::MAX);

        assert!(cart.update_quantity("1", &size("30ml"), i64::MIN));
        assert_eq!(cart.get("1", &size("30ml")).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("1", 2, size("30ml")).unwrap();

        assert!(!cart.update_quantity("1", &size("60ml"), 1));
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item("1", 2, size("30ml")).unwrap();
        cart.add_item("2", 1, size("236ml")).unwrap();

        assert!(cart.remove_item("1", &size("30ml")));
        assert!(!cart.remove_item("1", &size("30ml")));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_lines_keep_insertion_order_after_removal() {
        let mut cart = Cart::new();
        cart.add_item("a", 1, VariationSelection::new()).unwrap();
        cart.add_item("b", 1, VariationSelection::new()).unwrap();
        cart.add_item("c", 1, VariationSelection::new()).unwrap();
        cart.remove_item("b", &VariationSelection::new());

        let ids: Vec<&str> = cart.lines().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item("1", 2, size("30ml")).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_from_persisted_lines_merges_duplicates() {
        let cart = Cart::from(vec![
            CartLineItem::new("1", 2, size("30ml")),
            CartLineItem::new("1", 3, size("30ml")),
            CartLineItem::new("2", 0, size("236ml")),
        ]);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_selection_with_separator_characters_stays_distinct() {
        let mut cart = Cart::new();
        cart.add_item("1", 1, VariationSelection::new().with("a", "b;c=d")).unwrap();
        cart.add_item("1", 1, VariationSelection::new().with("a", "b").with("c", "d")).unwrap();

        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_selection_serializes_as_object() {
        let json = serde_json::to_string(&size("60ml")).unwrap();
        assert_eq!(json, r#"{"Size":"60ml"}"#);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    use proptest::prelude::*;

    fn arb_add() -> impl Strategy<Value = (String, u32, String)> {
        (
            prop::sample::select(vec!["1", "2", "3"]),
            1u32..50,
            prop::sample::select(vec!["30ml", "60ml", "236ml"]),
        )
            .prop_map(|(id, qty, opt)| (id.to_string(), qty, opt.to_string()))
    }

    proptest! {
        /// One line per identity, holding the sum of every add for it.
        #[test]
        fn prop_adds_merge_by_identity(adds in prop::collection::vec(arb_add(), 0..40)) {
            let mut cart = Cart::new();
            let mut expected: BTreeMap<(String, String), u32> = BTreeMap::new();
            for (id, qty, opt) in &adds {
                cart.add_item(id, *qty, size(opt)).unwrap();
                *expected.entry((id.clone(), opt.clone())).or_default() += qty;
            }

            prop_assert_eq!(cart.line_count(), expected.len());
            for ((id, opt), qty) in &expected {
                prop_assert_eq!(cart.get(id, &size(opt)).unwrap().quantity, *qty);
            }
            prop_assert_eq!(cart.total_item_count(), expected.values().map(|q| u64::from(*q)).sum::<u64>());
        }

        /// Quantity after any delta is max(1, previous + delta).
        #[test]
        fn prop_update_quantity_floors_at_one(start in 1u32..1000, delta in -2000i64..2000) {
            let mut cart = Cart::new();
            cart.add_item("1", start, size("30ml")).unwrap();
            cart.update_quantity("1", &size("30ml"), delta);

            let expected = (i64::from(start) + delta).max(1);
            prop_assert_eq!(i64::from(cart.get("1", &size("30ml")).unwrap().quantity), expected);
        }
    }
}
