//! Derived term index for autocomplete and classification lookup
//!
//! Pure derived data, rebuilt wholesale from a catalog snapshot — there is
//! no incremental merge, and the previous index is discarded on every
//! rebuild. Persisting the index to a file is a caching optimization, not a
//! contract: callers must tolerate its absence and rebuild.
//!
//! Postings are `BTreeMap`s so that serialization is deterministic and two
//! rebuilds of the same catalog produce byte-identical files.

use crate::normalize::normalize;
use pawsy_catalog::Catalog;
use pawsy_core::{Error, Product, ProductId, Result, Suggestion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Minimum word length (in characters) for an indexed term
pub const MIN_TERM_LEN: usize = 3;

/// Classification fallbacks applied at index time only; filters never
/// apply these defaults
const DEFAULT_CATEGORY: &str = "other";
const DEFAULT_ANIMAL: &str = "dog";

// ============================================================================
// IndexCard
// ============================================================================

/// Product summary stored in the index for suggestion rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexCard {
    /// Display title
    pub title: String,
    /// Price, if set
    pub price: Option<f64>,
    /// First image reference, if any
    pub image: Option<String>,
}

impl IndexCard {
    fn for_product(product: &Product) -> Self {
        IndexCard {
            title: product.title.clone(),
            price: product.price,
            image: product.first_image().map(str::to_string),
        }
    }
}

// ============================================================================
// SearchIndex
// ============================================================================

/// Term-postings index over a catalog snapshot
///
/// - `terms`: normalized word → product ids containing it (deduplicated,
///   catalog order)
/// - `categories` / `animals`: classification value → product ids
/// - `products`: per-product summary card for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Per-product summary cards
    pub products: BTreeMap<ProductId, IndexCard>,
    /// Normalized term postings
    pub terms: BTreeMap<String, Vec<ProductId>>,
    /// Category postings (slug, defaulted to "other")
    pub categories: BTreeMap<String, Vec<ProductId>>,
    /// Animal postings (defaulted to "dog")
    pub animals: BTreeMap<String, Vec<ProductId>>,
}

fn push_unique(postings: &mut Vec<ProductId>, id: &ProductId) {
    if !postings.contains(id) {
        postings.push(id.clone());
    }
}

impl SearchIndex {
    /// Build a fresh index from a catalog snapshot
    ///
    /// Total and idempotent: the same catalog always yields the same index.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = SearchIndex::default();

        for product in catalog {
            index
                .products
                .insert(product.id.clone(), IndexCard::for_product(product));

            for word in normalize(&product.title).split_whitespace() {
                if word.chars().count() >= MIN_TERM_LEN {
                    push_unique(index.terms.entry(word.to_string()).or_default(), &product.id);
                }
            }

            for tag in &product.tags {
                for word in normalize(tag).split_whitespace() {
                    if word.chars().count() >= MIN_TERM_LEN {
                        push_unique(
                            index.terms.entry(word.to_string()).or_default(),
                            &product.id,
                        );
                    }
                }
            }

            let category = product
                .category_slug
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
            push_unique(index.categories.entry(category).or_default(), &product.id);

            let animal = product
                .animal
                .clone()
                .unwrap_or_else(|| DEFAULT_ANIMAL.to_string());
            push_unique(index.animals.entry(animal).or_default(), &product.id);
        }

        info!(
            products = index.products.len(),
            terms = index.terms.len(),
            "search index built"
        );

        index
    }

    /// Number of distinct indexed terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Autocomplete: indexed terms starting with the normalized prefix
    ///
    /// Ranked by postings-list length descending; ties stay alphabetical
    /// (the BTreeMap iteration order under a stable sort). Truncated to
    /// `limit`.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<Suggestion> {
        let prefix = normalize(partial);

        let mut suggestions: Vec<Suggestion> = self
            .terms
            .range(prefix.clone()..)
            .take_while(|(term, _)| term.starts_with(&prefix))
            .map(|(term, ids)| Suggestion {
                term: term.clone(),
                count: ids.len(),
            })
            .collect();

        suggestions.sort_by(|a, b| b.count.cmp(&a.count));
        suggestions.truncate(limit);
        suggestions
    }

    /// Product ids filed under a category slug (exact key, no default)
    pub fn products_in_category(&self, category: &str) -> &[ProductId] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Product ids filed under an animal type (exact key, no default)
    pub fn products_for_animal(&self, animal: &str) -> &[ProductId] {
        self.animals.get(animal).map(Vec::as_slice).unwrap_or(&[])
    }

    // ========================================================================
    // Persistence (optional cache)
    // ========================================================================

    /// Write the index as JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Read an index previously written by [`SearchIndex::save_to`]
    ///
    /// # Errors
    ///
    /// [`Error::IndexUnavailable`] if the file does not exist;
    /// [`Error::SerializationError`] if it does not parse.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::IndexUnavailable(format!(
                "index file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load a cached index, rebuilding from the catalog when the cache is
    /// missing or unreadable
    ///
    /// The index is pure derived data, so a bad cache is discarded rather
    /// than surfaced.
    pub fn load_or_build(path: impl AsRef<Path>, catalog: &Catalog) -> Self {
        match Self::load_from(path.as_ref()) {
            Ok(index) => index,
            Err(Error::IndexUnavailable(_)) => Self::build(catalog),
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "discarding unreadable index cache"
                );
                Self::build(catalog)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
