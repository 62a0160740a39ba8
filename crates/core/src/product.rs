//! Product record and identity types
//!
//! The product record is deserialized from legacy catalog JSON, which is
//! tolerant by nature: ids appear as strings or numbers, the display name
//! appears under `title` or `name`, and almost every other field may be
//! absent. Defaults here mirror what the storefront assumes when a field is
//! missing (`published` defaults to true, `stock` to 0).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// ProductId
// ============================================================================

/// Opaque, stable product identity key
///
/// Legacy catalogs mix string and numeric ids, so deserialization accepts
/// both and canonicalizes to a string. Serialization always emits a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProductId(String);

impl ProductId {
    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId(s)
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ProductId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric product id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ProductId, E> {
                Ok(ProductId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ProductId, E> {
                Ok(ProductId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ProductId, E> {
                Ok(ProductId(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ProductId, E> {
                Ok(ProductId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

// ============================================================================
// Product
// ============================================================================

fn default_true() -> bool {
    true
}

/// A catalog product record
///
/// All scoring functions are pure functions over this record; no search or
/// recommendation operation mutates a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable identity key, unique per catalog
    pub id: ProductId,

    /// Display title (legacy records use `name`)
    #[serde(default, alias = "name")]
    pub title: String,

    /// Short descriptive tags; duplicates carry no extra scoring weight
    #[serde(default)]
    pub tags: Vec<String>,

    /// Classification used by recommendation similarity
    #[serde(default)]
    pub category: Option<String>,

    /// URL-safe classification used by the category filter and the index
    #[serde(default)]
    pub category_slug: Option<String>,

    /// Human-readable classification used by relevance scoring
    #[serde(default)]
    pub category_name: Option<String>,

    /// Secondary classification consulted by the category filter
    #[serde(default)]
    pub product_type: Option<String>,

    /// Animal type ("dog", "cat", ...)
    #[serde(default)]
    pub animal: Option<String>,

    /// Non-negative price; absence is significant to filters and sorts
    #[serde(default)]
    pub price: Option<f64>,

    /// Ordered image references; presence feeds a flat relevance bonus
    #[serde(default)]
    pub images: Vec<String>,

    /// Free-text selling points
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Generated SEO copy
    #[serde(default)]
    pub seo_description: Option<String>,

    /// Average rating in [0, 5]
    #[serde(default)]
    pub rating: Option<f64>,

    /// Review count feeding the popularity fallback
    #[serde(default)]
    pub reviews_count: u32,

    /// Units on hand; zero excludes the product from recommendations
    #[serde(default)]
    pub stock: u32,

    /// Whether the product is live on the storefront
    #[serde(default = "default_true")]
    pub published: bool,

    /// Merchandising label ("Bestseller", "Hot", "Trending", "New")
    #[serde(default)]
    pub badge: Option<String>,

    /// Bundle flag; bundles get a checkout-context bonus
    #[serde(default)]
    pub is_bundle: bool,
}

impl Product {
    /// First image reference, if any
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product can be recommended at all (stock on hand)
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether the badge matches any of the given labels (exact match)
    pub fn has_badge_of(&self, labels: &[&str]) -> bool {
        self.badge
            .as_deref()
            .is_some_and(|b| labels.contains(&b))
    }

    /// Whether the product is sold as a bundle (tag or explicit flag)
    pub fn is_bundle_offer(&self) -> bool {
        self.is_bundle || self.tags.iter().any(|t| t == "bundle")
    }

    /// Tag set view for overlap scoring (duplicates collapse)
    pub fn tag_set(&self) -> HashSet<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

// ============================================================================
// CartLine
// ============================================================================

fn default_quantity() -> u32 {
    1
}

/// A product plus quantity, as carried in a cart or order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// The product in the cart
    #[serde(flatten)]
    pub product: Product,

    /// Units of this product (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartLine {
    /// Create a cart line
    pub fn new(product: Product, quantity: u32) -> Self {
        CartLine { product, quantity }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: &str, title: &str) -> Product {
        serde_json::from_value(serde_json::json!({"id": id, "title": title})).unwrap()
    }

    #[test]
    fn test_product_id_from_string() {
        let p = minimal("sku-1", "Squeaky Ball");
        assert_eq!(p.id, ProductId::from("sku-1"));
        assert_eq!(p.id.as_str(), "sku-1");
    }

    #[test]
    fn test_product_id_from_number() {
        let p: Product =
            serde_json::from_value(serde_json::json!({"id": 42, "title": "Rope Toy"})).unwrap();
        assert_eq!(p.id, ProductId::from(42));
        assert_eq!(p.id.to_string(), "42");
    }

    #[test]
    fn test_product_id_serializes_as_string() {
        let json = serde_json::to_value(ProductId::from(7)).unwrap();
        assert_eq!(json, serde_json::json!("7"));
    }

    #[test]
    fn test_title_accepts_name_alias() {
        let p: Product =
            serde_json::from_value(serde_json::json!({"id": 1, "name": "Cat Feather Wand"}))
                .unwrap();
        assert_eq!(p.title, "Cat Feather Wand");
    }

    #[test]
    fn test_defaults_for_absent_fields() {
        let p = minimal("1", "Ball");
        assert!(p.tags.is_empty());
        assert!(p.price.is_none());
        assert!(p.images.is_empty());
        assert_eq!(p.reviews_count, 0);
        assert_eq!(p.stock, 0);
        assert!(p.published); // defaults to live
        assert!(!p.is_bundle);
        assert!(!p.in_stock()); // absent stock means not recommendable
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let p: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Ball",
            "cj_sku": "ABC",
            "seo_keywords": ["dog"]
        }))
        .unwrap();
        assert_eq!(p.title, "Ball");
    }

    #[test]
    fn test_has_badge_of() {
        let mut p = minimal("1", "Ball");
        p.badge = Some("Bestseller".to_string());
        assert!(p.has_badge_of(&["Bestseller", "Hot"]));
        assert!(!p.has_badge_of(&["New"]));

        p.badge = None;
        assert!(!p.has_badge_of(&["Bestseller"]));
    }

    #[test]
    fn test_is_bundle_offer() {
        let mut p = minimal("1", "Ball");
        assert!(!p.is_bundle_offer());

        p.tags = vec!["bundle".to_string()];
        assert!(p.is_bundle_offer());

        p.tags.clear();
        p.is_bundle = true;
        assert!(p.is_bundle_offer());
    }

    #[test]
    fn test_tag_set_collapses_duplicates() {
        let mut p = minimal("1", "Ball");
        p.tags = vec!["dog".into(), "toy".into(), "dog".into()];
        let set = p.tag_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("dog"));
        assert!(set.contains("toy"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_product_id_round_trips(s in "[a-zA-Z0-9_-]{1,24}") {
                let id = ProductId::from(s.as_str());
                let json = serde_json::to_string(&id).unwrap();
                let back: ProductId = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(id, back);
            }

            #[test]
            fn prop_numeric_id_matches_string_form(n in 0i64..1_000_000) {
                let from_num: ProductId = serde_json::from_str(&n.to_string()).unwrap();
                prop_assert_eq!(from_num, ProductId::from(n));
            }
        }
    }

    #[test]
    fn test_cart_line_quantity_default() {
        let line: CartLine =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Ball"})).unwrap();
        assert_eq!(line.quantity, 1);

        let line: CartLine =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Ball", "quantity": 3}))
                .unwrap();
        assert_eq!(line.quantity, 3);
    }
}
