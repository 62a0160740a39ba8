//! Context-specific recommendation scoring
//!
//! Each storefront slot weighs different signals: a product page rewards
//! similarity and the upsell price band, the cart rewards cheap add-ons and
//! tag overlap, checkout rewards impulse prices and bundles, post-purchase
//! rewards category affinity. All contexts share the same candidate rules
//! and the same terminal fallback.

use crate::popularity::{popular_excluding, popular_products};
use crate::similarity::{jaccard, similarity, upsell_band_bonus};
use pawsy_catalog::Catalog;
use pawsy_core::{CartLine, Product, ProductId, RecommendContext};
use std::collections::HashSet;
use tracing::debug;

/// Default number of recommendations per slot
pub const DEFAULT_LIMIT: usize = 3;

// Cart-context weights
const CART_CATEGORY: f64 = 20.0;
const CART_TAG_OVERLAP: f64 = 30.0;
const CART_PRICE_UNDER_20: f64 = 25.0;
const CART_PRICE_UNDER_40: f64 = 15.0;
const CART_BADGE: f64 = 10.0;
const CART_RATING: f64 = 10.0;

// Checkout-context weights
const CHECKOUT_PRICE_UNDER_15: f64 = 40.0;
const CHECKOUT_PRICE_UNDER_25: f64 = 20.0;
const CHECKOUT_BADGE: f64 = 20.0;
const CHECKOUT_RATING: f64 = 15.0;
const CHECKOUT_BUNDLE: f64 = 10.0;

// Post-purchase-context weights
const POST_CATEGORY: f64 = 25.0;
const POST_BADGE: f64 = 15.0;
const POST_RATING_SLOPE: f64 = 20.0;
const POST_RATING_BASELINE: f64 = 4.0;

/// Rank candidates for a recommendation context
///
/// Total: a missing seed or an all-zero candidate set degrades to the
/// popularity ranking; an empty catalog yields an empty list. Results never
/// include a seed/cart member, an out-of-stock product, or an unpublished
/// one.
pub fn recommend(catalog: &Catalog, context: &RecommendContext, limit: usize) -> Vec<Product> {
    match context {
        RecommendContext::Product(seed_id) => product_upsells(catalog, seed_id, limit),
        RecommendContext::Cart(lines) => cart_upsells(catalog, lines, limit),
        RecommendContext::Checkout(lines) => checkout_upsells(catalog, lines, limit),
        RecommendContext::PostPurchase(lines) => post_purchase_upsells(catalog, lines, limit),
        RecommendContext::Popular => popular_products(catalog, limit),
    }
}

/// Uniform candidate gate: not excluded, published, in stock
fn is_candidate(product: &Product, excluded: &HashSet<&ProductId>) -> bool {
    !excluded.contains(&product.id) && product.published && product.in_stock()
}

/// Sort scored candidates and truncate, or fall back to popularity when
/// nothing scored above zero
///
/// The fallback keeps the context's exclusion set; a seed or cart member
/// never reappears through popularity.
fn rank_or_fallback(
    catalog: &Catalog,
    mut candidates: Vec<(&Product, f64)>,
    excluded: &HashSet<&ProductId>,
    limit: usize,
    context_name: &str,
) -> Vec<Product> {
    if !candidates.iter().any(|(_, score)| *score > 0.0) {
        debug!(context = context_name, "no scoring candidates, using popularity fallback");
        return popular_excluding(catalog, excluded, limit);
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(limit)
        .map(|(p, _)| p.clone())
        .collect()
}

// ============================================================================
// Product context
// ============================================================================

fn product_upsells(catalog: &Catalog, seed_id: &ProductId, limit: usize) -> Vec<Product> {
    let Some(seed) = catalog.get(seed_id) else {
        debug!(seed = %seed_id, "seed product not found, using popularity fallback");
        return popular_products(catalog, limit);
    };

    let excluded: HashSet<&ProductId> = [seed_id].into_iter().collect();

    let candidates: Vec<(&Product, f64)> = catalog
        .iter()
        .filter(|p| is_candidate(p, &excluded))
        .map(|p| (p, similarity(seed, p) + upsell_band_bonus(seed, p)))
        .collect();

    rank_or_fallback(catalog, candidates, &excluded, limit, "product")
}

// ============================================================================
// Cart context
// ============================================================================

fn cart_upsells(catalog: &Catalog, lines: &[CartLine], limit: usize) -> Vec<Product> {
    let excluded: HashSet<&ProductId> = lines.iter().map(|l| &l.product.id).collect();
    let cart_categories: HashSet<&str> = lines
        .iter()
        .filter_map(|l| l.product.category.as_deref())
        .collect();
    let cart_tags: HashSet<&str> = lines
        .iter()
        .flat_map(|l| l.product.tags.iter().map(String::as_str))
        .collect();

    let candidates: Vec<(&Product, f64)> = catalog
        .iter()
        .filter(|p| is_candidate(p, &excluded))
        .map(|p| {
            let mut score = 0.0;

            if let Some(category) = p.category.as_deref() {
                if cart_categories.contains(category) {
                    score += CART_CATEGORY;
                }
            }

            let tags = p.tag_set();
            if !tags.is_disjoint(&cart_tags) {
                score += jaccard(&tags, &cart_tags) * CART_TAG_OVERLAP;
            }

            let price = p.price.unwrap_or(0.0);
            if price < 20.0 {
                score += CART_PRICE_UNDER_20;
            } else if price < 40.0 {
                score += CART_PRICE_UNDER_40;
            }

            if p.has_badge_of(&["Bestseller", "Hot", "Trending"]) {
                score += CART_BADGE;
            }

            if p.rating.unwrap_or(0.0) >= 4.5 {
                score += CART_RATING;
            }

            (p, score)
        })
        .collect();

    rank_or_fallback(catalog, candidates, &excluded, limit, "cart")
}

// ============================================================================
// Checkout context
// ============================================================================

fn checkout_upsells(catalog: &Catalog, lines: &[CartLine], limit: usize) -> Vec<Product> {
    let excluded: HashSet<&ProductId> = lines.iter().map(|l| &l.product.id).collect();

    let candidates: Vec<(&Product, f64)> = catalog
        .iter()
        .filter(|p| is_candidate(p, &excluded))
        .map(|p| {
            let mut score = 0.0;

            let price = p.price.unwrap_or(0.0);
            if price <= 15.0 {
                score += CHECKOUT_PRICE_UNDER_15;
            } else if price <= 25.0 {
                score += CHECKOUT_PRICE_UNDER_25;
            }

            if p.has_badge_of(&["Bestseller", "Hot"]) {
                score += CHECKOUT_BADGE;
            }

            if p.rating.unwrap_or(0.0) >= 4.7 {
                score += CHECKOUT_RATING;
            }

            if p.is_bundle_offer() {
                score += CHECKOUT_BUNDLE;
            }

            (p, score)
        })
        .collect();

    rank_or_fallback(catalog, candidates, &excluded, limit, "checkout")
}

// ============================================================================
// Post-purchase context
// ============================================================================

fn post_purchase_upsells(catalog: &Catalog, lines: &[CartLine], limit: usize) -> Vec<Product> {
    let excluded: HashSet<&ProductId> = lines.iter().map(|l| &l.product.id).collect();
    let order_categories: HashSet<&str> = lines
        .iter()
        .filter_map(|l| l.product.category.as_deref())
        .collect();

    let candidates: Vec<(&Product, f64)> = catalog
        .iter()
        .filter(|p| is_candidate(p, &excluded))
        .map(|p| {
            let mut score = 0.0;

            if let Some(category) = p.category.as_deref() {
                if order_categories.contains(category) {
                    score += POST_CATEGORY;
                }
            }

            if p.has_badge_of(&["Bestseller", "New", "Trending"]) {
                score += POST_BADGE;
            }

            // Unrated products sink below the 4.0 baseline
            score += (p.rating.unwrap_or(0.0) - POST_RATING_BASELINE) * POST_RATING_SLOPE;

            (p, score)
        })
        .collect();

    rank_or_fallback(catalog, candidates, &excluded, limit, "post_purchase")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(products: serde_json::Value) -> Catalog {
        Catalog::new(serde_json::from_value(products).unwrap())
    }

    fn line(json: serde_json::Value) -> CartLine {
        serde_json::from_value(json).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn toy_catalog() -> Catalog {
        catalog(serde_json::json!([
            {"id": 1, "title": "Squeaky Dog Ball", "category": "toys",
             "tags": ["dog", "toy"], "price": 8.0, "stock": 10},
            {"id": 3, "title": "Dog Rope Toy", "category": "toys",
             "tags": ["dog", "toy"], "price": 10.0, "stock": 10},
            {"id": 4, "title": "Plush Cave Bed", "category": "beds",
             "tags": ["bed"], "price": 50.0, "stock": 10}
        ]))
    }

    #[test]
    fn test_product_context_ranks_similar_upsell_first() {
        let results = recommend(&toy_catalog(), &RecommendContext::Product(1.into()), 3);
        // id 3 shares category and tags and sits in the upsell band;
        // id 4 shares nothing and is far away in price
        assert_eq!(ids(&results), vec!["3", "4"]);
    }

    #[test]
    fn test_product_context_excludes_seed() {
        let results = recommend(&toy_catalog(), &RecommendContext::Product(1.into()), 10);
        assert!(!ids(&results).contains(&"1"));
    }

    #[test]
    fn test_candidates_exclude_out_of_stock_and_unpublished() {
        let cat = catalog(serde_json::json!([
            {"id": 1, "title": "Seed", "category": "toys", "price": 10.0, "stock": 5},
            {"id": "gone", "title": "Gone", "category": "toys", "price": 10.0, "stock": 0},
            {"id": "hidden", "title": "Hidden", "category": "toys", "price": 10.0,
             "stock": 5, "published": false},
            {"id": "ok", "title": "Ok", "category": "toys", "price": 11.0, "stock": 5}
        ]));

        let results = recommend(&cat, &RecommendContext::Product(1.into()), 10);
        assert_eq!(ids(&results), vec!["ok"]);
    }

    #[test]
    fn test_missing_seed_falls_back_to_popularity() {
        let cat = catalog(serde_json::json!([
            {"id": "a", "title": "A", "rating": 4.8, "reviews_count": 100, "stock": 5},
            {"id": "b", "title": "B", "rating": 3.0, "reviews_count": 10, "stock": 5},
            {"id": "c", "title": "C", "rating": 4.0, "badge": "Bestseller", "stock": 5}
        ]));

        let results = recommend(&cat, &RecommendContext::Product("missing".into()), 3);
        // Popularity: c = 80 + 50 = 130, a = 96 + 10 = 106, b = 61
        assert_eq!(ids(&results), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_missing_seed_fallback_is_deterministic() {
        let cat = catalog(serde_json::json!([
            {"id": "a", "title": "A", "rating": 4.5, "stock": 5},
            {"id": "b", "title": "B", "rating": 4.5, "stock": 5}
        ]));

        let context = RecommendContext::Product("missing".into());
        let first = recommend(&cat, &context, 2);
        let second = recommend(&cat, &context, 2);
        assert_eq!(ids(&first), ids(&second));
        // Equal scores keep catalog order
        assert_eq!(ids(&first), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_scoring_candidates_fall_back_to_popularity() {
        // Candidate shares nothing with the seed: no category, no tags,
        // no rating, and a price far outside the proximity band
        let cat = catalog(serde_json::json!([
            {"id": "seed", "title": "Seed", "price": 1.0, "stock": 5},
            {"id": "far", "title": "Far", "price": 500.0, "stock": 5,
             "reviews_count": 200}
        ]));

        let results = recommend(&cat, &RecommendContext::Product("seed".into()), 3);
        // Fallback serves popular products, still excluding the seed
        assert_eq!(ids(&results), vec!["far"]);
    }

    #[test]
    fn test_cart_context_rewards_overlap_and_cheap_addons() {
        let cart = vec![line(serde_json::json!({
            "id": "in-cart", "title": "Dog Ball", "category": "toys",
            "tags": ["dog", "toy"], "price": 8.0, "quantity": 2
        }))];

        let cat = catalog(serde_json::json!([
            {"id": "in-cart", "title": "Dog Ball", "category": "toys",
             "tags": ["dog", "toy"], "price": 8.0, "stock": 9},
            {"id": "treats", "title": "Dog Treats", "category": "toys",
             "tags": ["dog"], "price": 6.0, "stock": 9},
            {"id": "mansion", "title": "Cat Mansion", "category": "furniture",
             "tags": ["cat"], "price": 120.0, "stock": 9}
        ]));

        let results = recommend(&cat, &RecommendContext::Cart(cart), 3);
        // treats: category 20 + jaccard(1/2)*30 + price 25 = 60; mansion: 0
        assert_eq!(ids(&results), vec!["treats", "mansion"]);
        assert!(!ids(&results).contains(&"in-cart"));
    }

    #[test]
    fn test_checkout_context_rewards_impulse_prices_and_bundles() {
        let cat = catalog(serde_json::json!([
            {"id": "impulse", "title": "Chew Stick", "price": 4.0, "stock": 9},
            {"id": "bundle", "title": "Starter Bundle", "price": 24.0,
             "is_bundle": true, "stock": 9},
            {"id": "pricey", "title": "Luxury Bed", "price": 90.0, "stock": 9}
        ]));

        let results = recommend(&cat, &RecommendContext::Checkout(vec![]), 3);
        // impulse: 40; bundle: 20 + 10 = 30; pricey: 0
        assert_eq!(ids(&results), vec!["impulse", "bundle", "pricey"]);
    }

    #[test]
    fn test_post_purchase_context_rewards_category_affinity() {
        let order = vec![line(serde_json::json!({
            "id": "bought", "title": "Dog Ball", "category": "toys", "price": 8.0
        }))];

        let cat = catalog(serde_json::json!([
            {"id": "bought", "title": "Dog Ball", "category": "toys", "stock": 9},
            {"id": "same-cat", "title": "Rope Toy", "category": "toys",
             "rating": 4.5, "stock": 9},
            {"id": "other-cat", "title": "Litter Box", "category": "litter",
             "rating": 4.5, "stock": 9}
        ]));

        let results = recommend(&cat, &RecommendContext::PostPurchase(order), 3);
        // same-cat: 25 + (4.5-4)*20 = 35; other-cat: 10
        assert_eq!(ids(&results), vec!["same-cat", "other-cat"]);
        assert!(!ids(&results).contains(&"bought"));
    }

    #[test]
    fn test_post_purchase_unrated_sinks_to_fallback() {
        // All candidates unrated and outside the order's categories:
        // every score is negative, so popularity takes over
        let cat = catalog(serde_json::json!([
            {"id": "a", "title": "A", "category": "toys", "reviews_count": 40, "stock": 9},
            {"id": "b", "title": "B", "category": "toys", "reviews_count": 10, "stock": 9}
        ]));

        let results = recommend(&cat, &RecommendContext::PostPurchase(vec![]), 3);
        assert_eq!(ids(&results), vec!["a", "b"]);
    }

    #[test]
    fn test_popular_context() {
        let cat = catalog(serde_json::json!([
            {"id": "a", "title": "A", "rating": 3.0, "stock": 9},
            {"id": "b", "title": "B", "rating": 4.9, "stock": 9}
        ]));

        let results = recommend(&cat, &RecommendContext::Popular, 1);
        assert_eq!(ids(&results), vec!["b"]);
    }

    #[test]
    fn test_empty_catalog_never_errors() {
        let empty = Catalog::new(vec![]);
        for context in [
            RecommendContext::Product("x".into()),
            RecommendContext::Cart(vec![]),
            RecommendContext::Checkout(vec![]),
            RecommendContext::PostPurchase(vec![]),
            RecommendContext::Popular,
        ] {
            assert!(recommend(&empty, &context, DEFAULT_LIMIT).is_empty());
        }
    }

    #[test]
    fn test_limit_truncates_after_ranking() {
        let results = recommend(&toy_catalog(), &RecommendContext::Product(1.into()), 1);
        assert_eq!(ids(&results), vec!["3"]);
    }
}
