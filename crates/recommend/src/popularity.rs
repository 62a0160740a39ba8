//! Popularity ranking — the terminal fallback
//!
//! Used directly for the `Popular` context and as the fallback whenever a
//! seed cannot be found or no candidate scores above zero. It never fails:
//! worst case it returns an empty list.

use pawsy_catalog::Catalog;
use pawsy_core::{Product, ProductId};
use std::collections::HashSet;

/// Rating multiplier in the popularity score
const RATING_WEIGHT: f64 = 20.0;
/// Review-count divisor in the popularity score
const REVIEWS_DIVISOR: f64 = 10.0;
/// Flat bonus for a Bestseller badge
const BESTSELLER_BONUS: f64 = 50.0;

/// Popularity score: `rating × 20 + reviews_count / 10`, +50 for a
/// Bestseller badge
pub(crate) fn popularity_score(product: &Product) -> f64 {
    let mut score = product.rating.unwrap_or(0.0) * RATING_WEIGHT
        + product.reviews_count as f64 / REVIEWS_DIVISOR;
    if product.has_badge_of(&["Bestseller"]) {
        score += BESTSELLER_BONUS;
    }
    score
}

/// Most popular recommendable products, best first
///
/// Applies the uniform candidate rules (published, in stock), sorts by
/// popularity score descending (stable; ties keep catalog order), and
/// truncates to `limit`.
pub fn popular_products(catalog: &Catalog, limit: usize) -> Vec<Product> {
    popular_excluding(catalog, &HashSet::new(), limit)
}

/// Popularity ranking with an exclusion set
///
/// The fallback path keeps the caller's exclusions: a seed or cart member
/// must not reappear just because the ranking degraded to popularity.
pub(crate) fn popular_excluding(
    catalog: &Catalog,
    excluded: &HashSet<&ProductId>,
    limit: usize,
) -> Vec<Product> {
    let mut scored: Vec<(&Product, f64)> = catalog
        .iter()
        .filter(|p| !excluded.contains(&p.id) && p.published && p.in_stock())
        .map(|p| (p, popularity_score(p)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(limit)
        .map(|(p, _)| p.clone())
        .collect()
}
