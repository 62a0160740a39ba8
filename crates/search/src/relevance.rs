//! Relevance scoring for catalog search
//!
//! A weighted sum of fuzzy field matches. Weights were tuned against the
//! storefront's live catalog and are part of the compatibility surface:
//! title dominates, tags and copy fields contribute, classification and
//! image presence add flat bonuses.

use crate::fuzzy::fuzzy_match;
use crate::normalize::{normalize, normalize_opt};
use pawsy_core::Product;

/// Minimum total score for a product to count as matched
pub const MIN_SCORE: f64 = 10.0;

/// Per-field weights and flat bonuses
mod weight {
    /// Title fuzzy score multiplier
    pub const TITLE: f64 = 100.0;
    /// Flat bonus when the query is a literal substring of the title
    pub const TITLE_SUBSTRING: f64 = 50.0;
    /// Per-tag fuzzy score multiplier (summed over tags)
    pub const TAG: f64 = 20.0;
    /// SEO description fuzzy score multiplier
    pub const DESCRIPTION: f64 = 15.0;
    /// Per-bullet fuzzy score multiplier (summed over bullets)
    pub const BULLET: f64 = 10.0;
    /// Flat bonus when the query appears in the category name
    pub const CATEGORY: f64 = 25.0;
    /// Flat bonus when the query appears in the animal type
    pub const ANIMAL: f64 = 30.0;
    /// Flat bonus for having at least one image
    pub const IMAGE: f64 = 5.0;
}

/// Scores products against one query
///
/// Normalizes the query once at construction; `score` is then a pure
/// function of the product. Higher is more relevant; zero is the floor.
///
/// An empty or whitespace-only query scores 0.0 for every product — the
/// empty string is a substring of everything, which would otherwise mark the
/// whole catalog relevant.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    query: String,
}

impl RelevanceScorer {
    /// Build a scorer from a raw query
    pub fn new(raw_query: &str) -> Self {
        RelevanceScorer {
            query: normalize(raw_query),
        }
    }

    /// The normalized query this scorer matches against
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query normalized to nothing (matches no product)
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Score a product; non-negative, deterministic, no side effects
    pub fn score(&self, product: &Product) -> f64 {
        if self.query.is_empty() {
            return 0.0;
        }

        let mut score = 0.0;

        let title = normalize(&product.title);
        score += fuzzy_match(&self.query, &title) * weight::TITLE;
        if title.contains(self.query.as_str()) {
            score += weight::TITLE_SUBSTRING;
        }

        // Duplicate tags carry no extra weight
        let mut seen_tags = std::collections::HashSet::new();
        for tag in &product.tags {
            let tag = normalize(tag);
            if seen_tags.insert(tag.clone()) {
                score += fuzzy_match(&self.query, &tag) * weight::TAG;
            }
        }

        let description = normalize_opt(product.seo_description.as_deref());
        score += fuzzy_match(&self.query, &description) * weight::DESCRIPTION;

        for bullet in &product.bullets {
            score += fuzzy_match(&self.query, &normalize(bullet)) * weight::BULLET;
        }

        let category = normalize_opt(product.category_name.as_deref());
        if !category.is_empty() && category.contains(self.query.as_str()) {
            score += weight::CATEGORY;
        }

        let animal = normalize_opt(product.animal.as_deref());
        if !animal.is_empty() && animal.contains(self.query.as_str()) {
            score += weight::ANIMAL;
        }

        if !product.images.is_empty() {
            score += weight::IMAGE;
        }

        score
    }
}
