//! Error types for the catalog engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Scoring is total by construction and never produces an error; only the
//! storage boundary (catalog/index files) and the filter/sort boundary are
//! fallible. Callers can therefore distinguish "no matches" (an empty page)
//! from "catalog unavailable" (an `Err`).

use std::io;
use thiserror::Error;

/// Result type alias for catalog engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the catalog engine
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (catalog or index file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Catalog backing store could not be read
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Search index file could not be read
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    /// A filter predicate was rejected at the boundary
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// An unknown sort key was rejected at the boundary
    #[error("Unknown sort key {0:?} (expected one of: relevance, price_low, price_high, name)")]
    InvalidSort(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = Error::IoError(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_error_display_serialization() {
        let err = Error::SerializationError("invalid format".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Serialization error"));
        assert!(msg.contains("invalid format"));
    }

    #[test]
    fn test_error_display_catalog_unavailable() {
        let err = Error::CatalogUnavailable("data/products.json missing".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Catalog unavailable"));
    }

    #[test]
    fn test_error_display_invalid_filter() {
        let err = Error::InvalidFilter("price_min must be non-negative".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid filter"));
        assert!(msg.contains("price_min"));
    }

    #[test]
    fn test_error_display_invalid_sort() {
        let err = Error::InvalidSort("cheapest".to_string());
        let msg = err.to_string();
        assert!(msg.contains("cheapest"));
        assert!(msg.contains("price_low"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: std::result::Result<i64, serde_json::Error> =
            serde_json::from_str("not json");
        let err: Error = result.unwrap_err().into();
        assert!(matches!(err, Error::SerializationError(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::InvalidFilter("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}
