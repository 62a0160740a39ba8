//! Core types and contracts for the GetPawsy catalog engine
//!
//! This crate defines the foundational types used throughout the system:
//! - Product: the catalog record and its identity key (ProductId)
//! - Error: error type hierarchy
//! - Search contracts: SearchRequest, Filters, SortKey, SearchPage, Suggestion
//! - Recommendation contracts: RecommendContext, CartLine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod product;
pub mod recommend_types;
pub mod search_types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use product::{CartLine, Product, ProductId};
pub use recommend_types::RecommendContext;
pub use search_types::{Filters, SearchPage, SearchRequest, SortKey, Suggestion};
