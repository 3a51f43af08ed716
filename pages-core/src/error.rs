//! Error types for pagesd

use thiserror::Error;

/// Result type alias for pagesd operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pagesd operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git error
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
