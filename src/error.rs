//! Error types for the catalog client

use thiserror::Error;

/// Catalog client error
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Payload parsed but a record failed boundary validation
    #[error("Invalid {kind} record (id {id}): {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: i64,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
