//! Recommendation request contracts
//!
//! The legacy storefront dispatched recommendation requests on free-form
//! context strings. Here the context is a closed enum, so every call site is
//! checked at compile time and the terminal fallback is an explicit variant
//! rather than a stringly-typed default arm.

use crate::product::{CartLine, ProductId};

/// Where a recommendation slot is being rendered, plus its seed data
#[derive(Debug, Clone)]
pub enum RecommendContext {
    /// Related-products slot on a product page; seeded by the viewed product
    Product(ProductId),

    /// Cross-sell slot on the cart page; seeded by the cart contents
    Cart(Vec<CartLine>),

    /// Last-chance slot on the checkout page; seeded by the cart contents
    Checkout(Vec<CartLine>),

    /// Follow-up slot on the order confirmation page; seeded by the order
    PostPurchase(Vec<CartLine>),

    /// Popularity ranking with no seed (also the terminal fallback)
    Popular,
}

impl RecommendContext {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            RecommendContext::Product(_) => "product",
            RecommendContext::Cart(_) => "cart",
            RecommendContext::Checkout(_) => "checkout",
            RecommendContext::PostPurchase(_) => "post_purchase",
            RecommendContext::Popular => "popular",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_names() {
        assert_eq!(RecommendContext::Product("1".into()).name(), "product");
        assert_eq!(RecommendContext::Cart(vec![]).name(), "cart");
        assert_eq!(RecommendContext::Checkout(vec![]).name(), "checkout");
        assert_eq!(RecommendContext::PostPurchase(vec![]).name(), "post_purchase");
        assert_eq!(RecommendContext::Popular.name(), "popular");
    }
}
