//! # Store Error Types
//!
//! Typed error handling for the verdant-cart storefront.
//! All store operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for all store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No document matched the given id
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: &'static str, id: String },

    /// Product not found in the catalog collection
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Document id failed to parse
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Store handle used after shutdown
    #[error("Store is closed")]
    StoreClosed,

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Configuration(_) => 500,
            StoreError::InvalidRequest(_) => 400,
            StoreError::NotFound { .. } => 404,
            StoreError::ProductNotFound { .. } => 404,
            StoreError::InvalidId(_) => 400,
            StoreError::ProviderError { .. } => 502,
            StoreError::NetworkError(_) => 503,
            StoreError::StoreClosed => 500,
            StoreError::Internal(_) => 500,
            StoreError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StoreError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            StoreError::NotFound {
                collection: "orders",
                id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            StoreError::ProviderError {
                provider: "stripe".into(),
                message: "boom".into()
            }
            .status_code(),
            502
        );
        assert_eq!(StoreError::StoreClosed.status_code(), 500);
    }
}
