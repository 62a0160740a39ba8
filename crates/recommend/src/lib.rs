//! Upsell and related-product recommendations
//!
//! This crate provides:
//! - Pairwise similarity scoring (category, tag overlap, price proximity)
//! - Context scorers for product, cart, checkout, and post-purchase slots
//! - The popularity fallback, terminal for every context
//!
//! All scorers are total functions over a catalog snapshot: a missing seed
//! or an empty candidate set degrades to the popularity ranking, never an
//! error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod popularity;
pub mod similarity;

pub use context::{recommend, DEFAULT_LIMIT};
pub use popularity::popular_products;
pub use similarity::{similarity, upsell_band_bonus};
