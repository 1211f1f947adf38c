//! Tag-extraction error types

use thiserror::Error;

/// Errors raised while extracting tags from a media file
///
/// An unsupported or unreadable file is NOT an error: providers report it
/// as `None` and the orchestrator caches an empty `TagSet` for it. Only
/// filesystem failures on files we expected to be able to stat end up here.
#[derive(Debug, Error)]
pub enum TagError {
    /// Represents an I/O error while reading file metadata
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
