//! Common error types for Mycolog

use thiserror::Error;

/// Common result type for Mycolog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Domain and infrastructure errors shared by the store and the API
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON document encoding/decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identifier is not 24 hexadecimal characters
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Well-formed lookup key with no matching document
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or malformed request fields
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Suggested species is not in the mushroom catalog
    #[error("The mushroom doesn't exist: {0}")]
    UnknownSpecies(String),

    /// Optimistic update lost every retry
    #[error("Conflict: {0}")]
    Conflict(String),
}
