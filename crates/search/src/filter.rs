//! Filter and sort stages for search results
//!
//! Filters narrow an already-matched set with exact/range predicates; sorts
//! re-order it. Both stages are deterministic: every sort is stable, so
//! equal keys keep catalog order.
//!
//! # Missing-price conventions
//!
//! A product without a price sorts as 0 when ascending and as
//! [`MISSING_PRICE_MAX`] when descending; the `price_max` filter also treats
//! it as [`MISSING_PRICE_MAX`] (so unpriced products never pass an upper
//! bound), while `price_min` treats it as 0 (so they always pass a lower
//! bound). The asymmetry is preserved from the legacy storefront.

use pawsy_core::{Filters, Product, SortKey};

/// Stand-in price for products without one, on the "expensive" side
pub const MISSING_PRICE_MAX: f64 = 999_999.0;

/// Whether a product passes every predicate in the filter set
pub fn matches_filters(product: &Product, filters: &Filters) -> bool {
    if let Some(category) = &filters.category {
        let wanted = category.to_lowercase();
        let slug = product
            .category_slug
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let ptype = product
            .product_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if !slug.contains(&wanted) && !ptype.contains(&wanted) {
            return false;
        }
    }

    if let Some(animal) = &filters.animal {
        let actual = product.animal.as_deref().unwrap_or_default();
        if !actual.eq_ignore_ascii_case(animal) {
            return false;
        }
    }

    if let Some(min) = filters.price_min {
        if product.price.unwrap_or(0.0) < min {
            return false;
        }
    }

    if let Some(max) = filters.price_max {
        if product.price.unwrap_or(MISSING_PRICE_MAX) > max {
            return false;
        }
    }

    if filters.has_images && product.images.is_empty() {
        return false;
    }

    true
}

/// Sort scored matches in place
///
/// `matches` pairs each product with its relevance score. All orderings are
/// stable; score ties and key ties retain catalog order.
pub fn sort_matches(matches: &mut [(&Product, f64)], sort: SortKey) {
    match sort {
        SortKey::Relevance => {
            matches.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
        SortKey::PriceLow => {
            matches.sort_by(|a, b| {
                a.0.price
                    .unwrap_or(0.0)
                    .total_cmp(&b.0.price.unwrap_or(0.0))
            });
        }
        SortKey::PriceHigh => {
            matches.sort_by(|a, b| {
                b.0.price
                    .unwrap_or(MISSING_PRICE_MAX)
                    .total_cmp(&a.0.price.unwrap_or(MISSING_PRICE_MAX))
            });
        }
        SortKey::Name => {
            matches.sort_by(|a, b| a.0.title.to_lowercase().cmp(&b.0.title.to_lowercase()));
        }
    }
}
