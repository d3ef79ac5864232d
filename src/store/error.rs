//! Error types for record store operations.

use thiserror::Error;

/// Errors that can occur while reading or writing saved records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error in a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage backend rejected the operation
    #[error("Storage error: {message}")]
    Backend {
        /// Description reported by the backend
        message: String,
    },

    /// No storage backend is reachable (e.g. `localStorage` disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a backend error with a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create an unavailable-storage error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
