//! Immutable catalog snapshot
//!
//! A `Catalog` is the full product collection at a point in time, in file
//! order, with a derived by-id map. It is pure data: search and
//! recommendation operate on a snapshot and never mutate it.

use pawsy_core::{Product, ProductId};
use rustc_hash::FxHashMap;

/// The full collection of product records at a point in time
///
/// Products keep their source order; scoring ties resolve to this order via
/// stable sorts, so it is part of the deterministic output contract.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a snapshot from an ordered product collection
    ///
    /// If an id appears more than once, the first occurrence wins for by-id
    /// lookup, matching the legacy first-match scan.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_id = FxHashMap::default();
        for (pos, product) in products.iter().enumerate() {
            by_id.entry(product.id.clone()).or_insert(pos);
        }
        Catalog { products, by_id }
    }

    /// Look up a product by id
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&pos| &self.products[pos])
    }

    /// All products in source order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate products in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
