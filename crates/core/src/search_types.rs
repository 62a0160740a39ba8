//! Search request/response contracts
//!
//! This module defines the interface types for the search entry point:
//! - SearchRequest: query, filters, sort, and result limit
//! - Filters: exact/range predicates narrowing a matched set
//! - SortKey: result ordering, parsed fail-fast at the boundary
//! - SearchPage: the response envelope consumers render
//! - Suggestion: an autocomplete term with its postings count
//!
//! Malformed filters and unknown sort keys are rejected here, before any
//! scoring runs; silent misinterpretation of a filter is worse than refusing.

use crate::error::{Error, Result};
use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Filters
// ============================================================================

/// Predicates narrowing a matched set
///
/// All fields are optional; an empty `Filters` passes every product through.
///
/// # Missing-price asymmetry
///
/// A product without a price is treated as price 0 by `price_min` and as
/// price 999 999 by `price_max`. The asymmetry is preserved from the legacy
/// storefront for compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Lowercase substring match against `category_slug` or `product_type`
    #[serde(default)]
    pub category: Option<String>,

    /// Case-insensitive exact match against `animal`
    #[serde(default)]
    pub animal: Option<String>,

    /// Inclusive lower price bound
    #[serde(default)]
    pub price_min: Option<f64>,

    /// Inclusive upper price bound
    #[serde(default)]
    pub price_max: Option<f64>,

    /// Require at least one image
    #[serde(default)]
    pub has_images: bool,
}

impl Filters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Filters::default()
    }

    /// Builder: set category predicate
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set animal predicate
    pub fn with_animal(mut self, animal: impl Into<String>) -> Self {
        self.animal = Some(animal.into());
        self
    }

    /// Builder: set inclusive price range bounds
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Builder: require images
    pub fn with_images_only(mut self) -> Self {
        self.has_images = true;
        self
    }

    /// Validate bounds at the boundary (fail fast)
    ///
    /// Price bounds must be finite and non-negative. A `price_min` above
    /// `price_max` is allowed and simply matches nothing, matching the
    /// legacy behavior.
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if let Some(v) = bound {
                if !v.is_finite() {
                    return Err(Error::InvalidFilter(format!("{name} must be finite")));
                }
                if v < 0.0 {
                    return Err(Error::InvalidFilter(format!("{name} must be non-negative")));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SortKey
// ============================================================================

/// Result ordering for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Descending relevance score (default)
    #[default]
    Relevance,
    /// Ascending price; missing price sorts as 0
    PriceLow,
    /// Descending price; missing price sorts as 999 999
    PriceHigh,
    /// Title alphabetical, case-insensitive
    Name,
}

impl SortKey {
    /// Wire name of this sort key
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceLow => "price_low",
            SortKey::PriceHigh => "price_high",
            SortKey::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "relevance" => Ok(SortKey::Relevance),
            "price_low" => Ok(SortKey::PriceLow),
            "price_high" => Ok(SortKey::PriceHigh),
            "name" => Ok(SortKey::Name),
            other => Err(Error::InvalidSort(other.to_string())),
        }
    }
}

// ============================================================================
// SearchRequest
// ============================================================================

/// Request for a catalog search
///
/// # Examples
///
/// ```
/// use pawsy_core::{Filters, SearchRequest, SortKey};
///
/// let req = SearchRequest::new("dog toy")
///     .with_filters(Filters::new().with_animal("dog"))
///     .with_sort(SortKey::PriceLow)
///     .with_limit(10);
///
/// assert_eq!(req.query, "dog toy");
/// assert_eq!(req.limit, 10);
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Raw query string (normalized by the scorer)
    pub query: String,

    /// Narrowing predicates
    pub filters: Filters,

    /// Result ordering
    pub sort: SortKey,

    /// Maximum results to return
    pub limit: usize,
}

impl SearchRequest {
    /// Create a request with defaults (no filters, relevance sort, limit 50)
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            filters: Filters::default(),
            sort: SortKey::default(),
            limit: 50,
        }
    }

    /// Builder: set filters
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Builder: set sort key
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Builder: set result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

// ============================================================================
// SearchPage
// ============================================================================

/// Response envelope for a search
///
/// `total` counts the full filtered match set, before truncation to the
/// request limit, so consumers can paginate.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    /// Matched products in sort order, truncated to the request limit
    pub results: Vec<Product>,

    /// Size of the filtered match set before truncation
    pub total: usize,

    /// The query as received
    pub query: String,

    /// The filters as applied
    pub filters: Filters,

    /// The sort as applied
    pub sort: SortKey,
}

impl SearchPage {
    /// An empty page for the given request (empty catalog, empty query)
    pub fn empty(query: impl Into<String>, filters: Filters, sort: SortKey) -> Self {
        SearchPage {
            results: vec![],
            total: 0,
            query: query.into(),
            filters,
            sort,
        }
    }
}

// ============================================================================
// Suggestion
// ============================================================================

/// An autocomplete suggestion: an indexed term and how many products carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Normalized indexed term
    pub term: String,
    /// Number of products in the term's postings list
    pub count: usize,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_default_is_empty() {
        let f = Filters::new();
        assert!(f.category.is_none());
        assert!(f.animal.is_none());
        assert!(f.price_min.is_none());
        assert!(f.price_max.is_none());
        assert!(!f.has_images);
    }

    #[test]
    fn test_filters_builder() {
        let f = Filters::new()
            .with_category("toys")
            .with_animal("cat")
            .with_price_range(Some(5.0), Some(25.0))
            .with_images_only();

        assert_eq!(f.category.as_deref(), Some("toys"));
        assert_eq!(f.animal.as_deref(), Some("cat"));
        assert_eq!(f.price_min, Some(5.0));
        assert_eq!(f.price_max, Some(25.0));
        assert!(f.has_images);
    }

    #[test]
    fn test_filters_validate_ok() {
        assert!(Filters::new().validate().is_ok());
        assert!(Filters::new()
            .with_price_range(Some(0.0), Some(10.0))
            .validate()
            .is_ok());
        // Inverted range is legal (matches nothing), not malformed
        assert!(Filters::new()
            .with_price_range(Some(10.0), Some(1.0))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_filters_validate_rejects_negative() {
        let err = Filters::new()
            .with_price_range(Some(-1.0), None)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
        assert!(err.to_string().contains("price_min"));
    }

    #[test]
    fn test_filters_validate_rejects_non_finite() {
        let err = Filters::new()
            .with_price_range(None, Some(f64::NAN))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
        assert!(err.to_string().contains("price_max"));

        let err = Filters::new()
            .with_price_range(Some(f64::INFINITY), None)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("price_min"));
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [
            SortKey::Relevance,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Name,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_sort_key_rejects_unknown() {
        let err = "cheapest".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, Error::InvalidSort(_)));
        assert!(err.to_string().contains("cheapest"));
    }

    #[test]
    fn test_sort_key_default_is_relevance() {
        assert_eq!(SortKey::default(), SortKey::Relevance);
    }

    #[test]
    fn test_search_request_defaults() {
        let req = SearchRequest::new("dog toy");
        assert_eq!(req.query, "dog toy");
        assert_eq!(req.sort, SortKey::Relevance);
        assert_eq!(req.limit, 50);
        assert_eq!(req.filters, Filters::default());
    }

    #[test]
    fn test_search_page_empty() {
        let page = SearchPage::empty("anything", Filters::default(), SortKey::Relevance);
        assert!(page.results.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.query, "anything");
    }
}
