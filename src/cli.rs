//! Command-line interface definitions and parsing
//!
//! m3ugen has a single operation: process a target path. Pointed at a
//! directory it walks the tree, refreshes the tag cache and generates one
//! playlist per filter file; pointed at a single file it prints what it
//! knows about it (parsed rules for a filter file, cache state and tags
//! for a media file).
//!
//! # Examples
//!
//! ```bash
//! # Generate playlists for a music collection
//! m3ugen ~/Music
//!
//! # Same, replacing playlists that already exist
//! m3ugen --overwrite ~/Music
//!
//! # Skip work-in-progress directories and raw recordings
//! m3ugen -e incoming -e '\.tmp$' --exclude-glob '**/*.wav' ~/Music
//!
//! # Inspect a single file
//! m3ugen -v ~/Music/song.mp3
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Generate M3U playlists from your own M3UG filter files
#[derive(Parser, Debug, Clone)]
#[command(name = "m3ugen", version, about)]
pub struct Cli {
    /// Path to process: a media directory, or a single file to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Exclude files whose path matches this regex (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Exclude files whose path matches this glob (repeatable)
    #[arg(long = "exclude-glob", value_name = "GLOB")]
    pub exclude_glob: Vec<String>,

    /// Replace playlists that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Use this tag-cache directory instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Print per-file diagnostics while processing
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print playlist results
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
