//! Error types for the bridge.
//!
//! # Design
//! Every failure carries a category plus a human-readable message.
//! `NotFound` gets a dedicated variant because plugin callers frequently
//! distinguish "the resource does not exist" from everything else; all
//! host-reported and transport failures land in `Other` with the message
//! as supplied. Errors are constructed at the point of failure and never
//! mutated afterwards.

use thiserror::Error;

/// Result alias used by every public bridge operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller-supplied data that cannot cross the boundary, such as a URL
    /// containing an interior NUL byte.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure or a host-reported error, message as supplied.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
