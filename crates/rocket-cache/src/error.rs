//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error")]
    SerializeError(#[from] serde_json::Error),

    /// The stored bytes for a key could not be decoded.
    #[error("Corrupt value for key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
