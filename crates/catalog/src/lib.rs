//! Catalog storage abstraction for the GetPawsy catalog engine
//!
//! This crate provides:
//! - Catalog: an immutable snapshot of product records with by-id lookup
//! - CatalogSource: the dependency-injection seam consumers read through
//! - JsonCatalogStore: a JSON-file-backed store with copy-on-read snapshots
//! - StaticCatalog: an in-memory source for tests and embedding callers
//!
//! # Consistency Model
//!
//! The store is single-writer, copy-on-read. `snapshot()` hands out an
//! `Arc<Catalog>` under a read lock; `reload()` swaps in a freshly parsed
//! catalog under a write lock. Overlapping operations may observe different
//! snapshots — there is no read-your-writes guarantee across calls. This is
//! an acceptable, documented weak-consistency model for a catalog that
//! changes rarely relative to read volume.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod snapshot;
pub mod source;
pub mod store;

pub use snapshot::Catalog;
pub use source::{CatalogSource, StaticCatalog};
pub use store::JsonCatalogStore;
