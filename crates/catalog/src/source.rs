//! Catalog source trait and the in-memory implementation
//!
//! `CatalogSource` is the single seam the search and recommendation entry
//! points read through. Implementations are injected explicitly — there is
//! no process-wide catalog cache.

use crate::snapshot::Catalog;
use pawsy_core::{Product, Result};
use std::sync::Arc;

/// Supplies catalog snapshots to consumers
///
/// Each entry point takes a fresh snapshot per call and must not assume the
/// source caches. A snapshot is an opaque read-only view; holding it keeps
/// that view alive even if the source reloads underneath.
pub trait CatalogSource: Send + Sync {
    /// Take a point-in-time snapshot of the catalog
    fn snapshot(&self) -> Result<Arc<Catalog>>;
}

/// Fixed in-memory catalog source
///
/// Used by tests and by callers that already hold the product collection
/// (e.g. an import pipeline handing off to search).
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Arc<Catalog>,
}

impl StaticCatalog {
    /// Wrap an ordered product collection
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog {
            catalog: Arc::new(Catalog::new(products)),
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::clone(&self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_catalog_snapshot() {
        let product: Product =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Ball"})).unwrap();
        let source = StaticCatalog::new(vec![product]);

        let snap = source.snapshot().unwrap();
        assert_eq!(snap.len(), 1);

        // Snapshots are shared, not copied
        let again = source.snapshot().unwrap();
        assert!(Arc::ptr_eq(&snap, &again));
    }

    #[test]
    fn test_static_catalog_is_object_safe() {
        let source: Arc<dyn CatalogSource> = Arc::new(StaticCatalog::new(vec![]));
        assert!(source.snapshot().unwrap().is_empty());
    }
}
