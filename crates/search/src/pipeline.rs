//! The search pipeline: score, threshold, filter, sort, truncate
//!
//! # Flow
//!
//! 1. Validate filters at the boundary (fail fast)
//! 2. Score every product against the query
//! 3. Keep products at or above [`MIN_SCORE`](crate::MIN_SCORE)
//! 4. Apply filter predicates
//! 5. Sort (stable; ties keep catalog order)
//! 6. Truncate to the request limit; `total` counts the pre-truncation set
//!
//! An empty catalog or an empty query yields an empty page, never an error.

use crate::filter::{matches_filters, sort_matches};
use crate::relevance::{RelevanceScorer, MIN_SCORE};
use pawsy_catalog::Catalog;
use pawsy_core::{Product, Result, SearchPage, SearchRequest};
use tracing::debug;

/// Run a search over a catalog snapshot
pub fn execute(catalog: &Catalog, req: &SearchRequest) -> Result<SearchPage> {
    req.filters.validate()?;

    if catalog.is_empty() {
        return Ok(SearchPage::empty(
            req.query.clone(),
            req.filters.clone(),
            req.sort,
        ));
    }

    let scorer = RelevanceScorer::new(&req.query);

    let matched: Vec<(&Product, f64)> = catalog
        .iter()
        .map(|p| (p, scorer.score(p)))
        .filter(|(_, score)| *score >= MIN_SCORE)
        .collect();

    let mut filtered: Vec<(&Product, f64)> = matched
        .into_iter()
        .filter(|(p, _)| matches_filters(p, &req.filters))
        .collect();

    sort_matches(&mut filtered, req.sort);

    let total = filtered.len();
    let results: Vec<Product> = filtered
        .into_iter()
        .take(req.limit)
        .map(|(p, _)| p.clone())
        .collect();

    debug!(
        query = %scorer.query(),
        total,
        returned = results.len(),
        "search executed"
    );

    Ok(SearchPage {
        results,
        total,
        query: req.query.clone(),
        filters: req.filters.clone(),
        sort: req.sort,
    })
}
