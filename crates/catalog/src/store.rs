//! JSON-file-backed catalog store
//!
//! The legacy storefront kept its catalog in a flat JSON file, read wholesale
//! on every operation. This store keeps the file format but replaces the
//! unguarded re-reads with an explicit lifecycle: parse once at `open()`,
//! swap snapshots on `reload()`, hand out `Arc` clones on `snapshot()`.

use crate::snapshot::Catalog;
use crate::source::CatalogSource;
use parking_lot::RwLock;
use pawsy_core::{Error, Product, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// On-disk catalog shapes
///
/// Older exports are a bare array; newer ones wrap the array in an object.
/// Both occur in production data, so both parse.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

impl CatalogFile {
    fn into_products(self) -> Vec<Product> {
        match self {
            CatalogFile::Wrapped { products } => products,
            CatalogFile::Bare(products) => products,
        }
    }
}

/// Catalog store backed by a single JSON file
///
/// # Consistency
///
/// Single-writer, copy-on-read. `reload()` is the only writer; readers get
/// point-in-time `Arc<Catalog>` snapshots and never block each other.
///
/// # Example
///
/// ```ignore
/// use pawsy_catalog::{CatalogSource, JsonCatalogStore};
///
/// let store = JsonCatalogStore::open("data/products.json")?;
/// let catalog = store.snapshot()?;
/// ```
#[derive(Debug)]
pub struct JsonCatalogStore {
    path: PathBuf,
    current: RwLock<Arc<Catalog>>,
}

impl JsonCatalogStore {
    /// Open a store, reading and parsing the backing file
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogUnavailable`] if the file does not exist and
    /// [`Error::SerializationError`] if it does not parse. A missing or
    /// malformed catalog is surfaced to the caller, never collapsed into an
    /// empty catalog — "no matches" and "catalog unavailable" are different
    /// answers.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let catalog = Self::read_file(&path)?;
        Ok(JsonCatalogStore {
            path,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file and swap in the new snapshot
    ///
    /// Readers holding older snapshots keep them; new `snapshot()` calls see
    /// the reloaded catalog. On error the previous snapshot stays current.
    pub fn reload(&self) -> Result<()> {
        let catalog = Self::read_file(&self.path)?;
        *self.current.write() = Arc::new(catalog);
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Catalog> {
        if !path.exists() {
            return Err(Error::CatalogUnavailable(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        let catalog = Catalog::new(file.into_products());

        info!(
            path = %path.display(),
            products = catalog.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }
}

impl CatalogSource for JsonCatalogStore {
    fn snapshot(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::clone(&self.current.read()))
    }
}
