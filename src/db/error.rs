//! Tag-cache error types
//!
//! Most variants wrap failures of the underlying store (sled) or of
//! entry serialization (bincode). `NotCached` is different: it reports a
//! caller-discipline violation, not a transient condition. Fetching a path
//! that was never classified Valid or Stale is a bug in the caller, and
//! re-running does not make it go away.

use std::path::PathBuf;

use thiserror::Error;

/// Tag-cache specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Represents an I/O error while reading file metadata
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetch without a prior classification saying the entry exists
    #[error("No cached tags for {}: classify the path before fetching it", .0.display())]
    NotCached(PathBuf),
}
