//! # Catalog
//!
//! The mutable product catalog behind the shop grid and the admin panel.
//!
//! ## Key Operations
//! - Admin CRUD: `create` (newest first), `update`, `delete`
//! - Lookup by id
//! - Shop browsing: category/brand/max-price filters and price sorting
//!
//! Update and delete on an unknown id change nothing and return `false`;
//! the admin table only ever edits rows it is showing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::pricing::effective_unit_price;
use crate::types::Product;

// =============================================================================
// Browse Query
// =============================================================================

/// Sort order on the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    /// Catalog order (newest additions first).
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
}

/// Filters chosen in the shop sidebar. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[ts(optional)]
    pub category: Option<String>,
    #[ts(optional)]
    pub brand: Option<String>,
    /// Upper bound on the effective price, inclusive.
    #[ts(optional)]
    pub max_price: Option<Money>,
    #[serde(default)]
    pub sort: CatalogSort,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if &product.brand != brand {
                return false;
            }
        }
        match self.max_price {
            Some(max) => effective_unit_price(product) <= max,
            None => true,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Products in display order, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// All products, newest first.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Adds a product at the front of the list and returns its id.
    ///
    /// A caller-supplied id is kept as is; an empty one is replaced with a
    /// fresh UUID. Nothing else is validated here.
    pub fn create(&mut self, mut product: Product) -> String {
        if product.id.is_empty() {
            product.id = Uuid::new_v4().to_string();
        }
        let id = product.id.clone();
        self.products.insert(0, product);
        id
    }

    /// Replaces the product with the same id. Returns `false` if none.
    pub fn update(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Removes the product with this id. Returns `false` if none.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_featured)
    }

    /// Runs a shop-page query.
    ///
    /// Price sorts are stable, so equally priced products keep catalog order.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut hits: Vec<&Product> = self.products.iter().filter(|p| query.matches(p)).collect();

        match query.sort {
            CatalogSort::Newest => {}
            CatalogSort::PriceLowToHigh => {
                hits.sort_by_key(|p| effective_unit_price(p));
            }
            CatalogSort::PriceHighToLow => {
                hits.sort_by_key(|p| std::cmp::Reverse(effective_unit_price(p)));
            }
        }

        hits
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Catalog { products }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
