//! m3ugen - playlist generation from human-authored filter files
//!
//! This library walks a media tree, extracts metadata tags per file,
//! caches them keyed by modification time, and evaluates M3UG filter
//! rules against the cached tags to produce M3U playlists.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod db;
pub mod generate;
pub mod m3ug;
pub mod output;
pub mod patterns;
pub mod playlist;
pub mod tags;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum M3ugenError {
    /// Tag-cache error
    #[error("Database error: {0}")]
    Db(#[from] db::DbError),
    /// Filter file rejected by the parser
    #[error("Filter error: {0}")]
    Parse(#[from] m3ug::ParseError),
    /// Tag-extraction error
    #[error("Tag error: {0}")]
    Tags(#[from] tags::TagError),
    /// Invalid exclusion pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] patterns::PatternError),
    /// Playlist-writing error
    #[error("Playlist error: {0}")]
    Playlist(#[from] playlist::PlaylistError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Directory traversal failure
    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),
    /// The target path is neither a file nor a directory
    #[error("{} must be either a directory or a file", .0.display())]
    InvalidTarget(std::path::PathBuf),
}
