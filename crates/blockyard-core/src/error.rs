//! Error types for the sandbox.

use thiserror::Error;

/// Sandbox-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The world document is not a JSON array of block entries.
    #[error("malformed world document: {0}")]
    Document(String),

    /// A single entry of the world document is unusable.
    #[error("block entry {index}: {reason}")]
    InvalidBlock { index: usize, reason: String },

    /// Invalid data error
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
