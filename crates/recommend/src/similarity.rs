//! Pairwise product similarity
//!
//! The similarity score combines four signals: same category, tag-set
//! Jaccard overlap, price proximity, and the candidate's rating. A separate
//! upsell-band bonus rewards candidates priced just above the seed.

use pawsy_core::Product;
use std::collections::HashSet;

/// Bonus when both products declare the same category
const CATEGORY_MATCH: f64 = 30.0;
/// Multiplier on the tag-set Jaccard overlap
const TAG_OVERLAP: f64 = 40.0;
/// Ceiling of the price-proximity bonus
const PRICE_PROXIMITY_MAX: f64 = 20.0;
/// Slope of the price-proximity falloff per unit of relative difference
const PRICE_PROXIMITY_SLOPE: f64 = 40.0;
/// Bonus for a candidate rated at least 4.5
const RATING_HIGH: f64 = 10.0;
/// Bonus for a candidate rated at least 4.0
const RATING_GOOD: f64 = 5.0;
/// Bonus when the candidate sits in the upsell price band
const UPSELL_BAND: f64 = 15.0;

/// Jaccard overlap of two sets: |∩| / |∪|, 0 when the union is empty
pub(crate) fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Similarity between a seed product and a candidate
///
/// - Category equality: +30 (both sides must declare a category)
/// - Tag Jaccard overlap × 40 (both tag sets non-empty)
/// - Price proximity: up to +20, linearly decreasing with the relative
///   price difference, floored at 0 beyond a 50% difference
/// - Candidate rating: +10 at ≥4.5, +5 at ≥4.0
///
/// Non-negative, deterministic, and pure.
pub fn similarity(seed: &Product, candidate: &Product) -> f64 {
    let mut score = 0.0;

    if let (Some(a), Some(b)) = (&seed.category, &candidate.category) {
        if a == b {
            score += CATEGORY_MATCH;
        }
    }

    let seed_tags = seed.tag_set();
    let candidate_tags = candidate.tag_set();
    if !seed_tags.is_empty() && !candidate_tags.is_empty() {
        score += jaccard(&seed_tags, &candidate_tags) * TAG_OVERLAP;
    }

    let seed_price = seed.price.unwrap_or(0.0);
    let candidate_price = candidate.price.unwrap_or(0.0);
    if seed_price > 0.0 && candidate_price > 0.0 {
        let rel_diff = (seed_price - candidate_price).abs() / seed_price.max(candidate_price);
        score += (PRICE_PROXIMITY_MAX - rel_diff * PRICE_PROXIMITY_SLOPE).max(0.0);
    }

    let rating = candidate.rating.unwrap_or(0.0);
    if rating >= 4.5 {
        score += RATING_HIGH;
    } else if rating >= 4.0 {
        score += RATING_GOOD;
    }

    score
}

/// Upsell-band bonus: +15 when the candidate price is strictly above the
/// seed price but at most 1.5× it
pub fn upsell_band_bonus(seed: &Product, candidate: &Product) -> f64 {
    let seed_price = seed.price.unwrap_or(0.0);
    let candidate_price = candidate.price.unwrap_or(0.0);
    if candidate_price > seed_price && candidate_price <= seed_price * 1.5 {
        UPSELL_BAND
    } else {
        0.0
    }
}
