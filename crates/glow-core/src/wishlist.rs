//! # Wishlist
//!
//! Saved product ids, at most once each, in the order they were saved.
//!
//! Ids are not checked against the catalog; the wishlist page skips ids that
//! no longer resolve.

use indexmap::IndexSet;

/// The shopper's saved products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    ids: IndexSet<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Adds the id if absent, removes it if present.
    ///
    /// Returns `true` if the id is saved after the call.
    ///
    /// ```rust
    /// use glow_core::Wishlist;
    ///
    /// let mut wishlist = Wishlist::new();
    /// assert!(wishlist.toggle("3"));
    /// assert!(!wishlist.toggle("3"));
    /// assert!(wishlist.is_empty());
    /// ```
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.ids.shift_remove(product_id) {
            false
        } else {
            self.ids.insert(product_id.to_string());
            true
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.contains(product_id)
    }

    /// Saved ids, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Owned copy of the ids, in the persisted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Rebuilds a wishlist from persisted ids; repeats keep the first position.
impl From<Vec<String>> for Wishlist {
    fn from(ids: Vec<String>) -> Self {
        Wishlist {
            ids: ids.into_iter().collect(),
        }
    }
}
