//! GetPawsy — catalog search and recommendations for the storefront
//!
//! The catalog core behind the storefront's search box, autocomplete, and
//! recommendation slots. State lives in a pluggable [`CatalogSource`]; every
//! entry point takes a fresh snapshot per call, so callers never observe a
//! half-updated catalog and must not assume caching.
//!
//! # Quick Start
//!
//! ```ignore
//! use getpawsy::{JsonCatalogStore, SearchRequest, Storefront};
//! use std::sync::Arc;
//!
//! let store = JsonCatalogStore::open("data/products.json")?;
//! let storefront = Storefront::new(Arc::new(store));
//!
//! let page = storefront.search(&SearchRequest::new("dog toy"))?;
//! let related = storefront.recommend(&RecommendContext::Product("42".into()), 3)?;
//! ```
//!
//! # Architecture
//!
//! Leaf crates do the work; this crate only orchestrates:
//! - `pawsy-core`: types, errors, request/response contracts
//! - `pawsy-catalog`: the storage abstraction and JSON-file store
//! - `pawsy-search`: normalization, relevance, filters, the term index
//! - `pawsy-recommend`: similarity scoring and the popularity fallback

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;
use tracing::debug;

// Re-export the public API surface
pub use pawsy_catalog::{Catalog, CatalogSource, JsonCatalogStore, StaticCatalog};
pub use pawsy_core::{
    CartLine, Error, Filters, Product, ProductId, RecommendContext, Result, SearchPage,
    SearchRequest, SortKey, Suggestion,
};
pub use pawsy_recommend::DEFAULT_LIMIT as DEFAULT_RECOMMEND_LIMIT;
pub use pawsy_search::SearchIndex;

/// The storefront's catalog entry points
///
/// Stateless orchestrator over an injected [`CatalogSource`]. Holds only the
/// `Arc`; all search and recommendation state is ephemeral per call.
#[derive(Clone)]
pub struct Storefront {
    catalog: Arc<dyn CatalogSource>,
}

impl Storefront {
    /// Create a storefront over a catalog source
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Storefront { catalog }
    }

    /// Search the catalog
    ///
    /// Validates filters fail-fast, snapshots the catalog, then runs the
    /// score → threshold → filter → sort → truncate pipeline. An empty
    /// catalog or an empty query yields an empty page.
    ///
    /// # Errors
    ///
    /// Malformed filters ([`Error::InvalidFilter`]) or an unavailable
    /// catalog; never an error for "no matches".
    pub fn search(&self, req: &SearchRequest) -> Result<SearchPage> {
        let catalog = self.catalog.snapshot()?;
        pawsy_search::execute(&catalog, req)
    }

    /// Autocomplete suggestions for a partial query
    ///
    /// Builds the term index from a fresh snapshot and returns indexed terms
    /// starting with the normalized prefix, most frequent first.
    pub fn suggest(&self, partial: &str, limit: usize) -> Result<Vec<Suggestion>> {
        let catalog = self.catalog.snapshot()?;
        let index = SearchIndex::build(&catalog);
        Ok(index.suggest(partial, limit))
    }

    /// Build the derived term index from the current catalog
    ///
    /// For callers that persist the index as a cache (see
    /// [`SearchIndex::save_to`]); the index is rebuildable at any time and
    /// safe to discard.
    pub fn build_index(&self) -> Result<SearchIndex> {
        let catalog = self.catalog.snapshot()?;
        Ok(SearchIndex::build(&catalog))
    }

    /// Rank recommendations for a storefront slot
    ///
    /// Total over the snapshot: a missing seed or an all-zero candidate set
    /// degrades to the popularity ranking. Only the snapshot itself can
    /// fail.
    pub fn recommend(&self, context: &RecommendContext, limit: usize) -> Result<Vec<Product>> {
        let catalog = self.catalog.snapshot()?;
        let results = pawsy_recommend::recommend(&catalog, context, limit);
        debug!(
            context = context.name(),
            returned = results.len(),
            "recommendations ranked"
        );
        Ok(results)
    }
}
