//! Common error types for the song library

use thiserror::Error;

/// Common result type for song library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store and the service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}
