//! M3U playlist output
//!
//! Playlists are plain text: one entry per line, relative to the playlist
//! file's own directory, newline terminated. An existing playlist is
//! preserved unless overwriting was explicitly requested; the skip is an
//! outcome the caller reports, not an error.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Playlist-writing errors
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Represents an I/O error while writing the playlist file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// What happened to one playlist write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Playlist written with this many entries
    Written(usize),
    /// Playlist already existed and overwrite was not requested
    SkippedExisting,
}

/// Write a playlist of entries, relative to the playlist's directory
///
/// # Errors
///
/// Returns `PlaylistError` if the file cannot be written.
pub fn write_playlist<P: AsRef<Path>>(
    playlist_path: &Path,
    entries: &[P],
    overwrite: bool,
) -> Result<WriteOutcome, PlaylistError> {
    if playlist_path.exists() && !overwrite {
        return Ok(WriteOutcome::SkippedExisting);
    }

    let playlist_dir = playlist_path.parent().unwrap_or_else(|| Path::new(""));

    let mut contents = String::new();
    for entry in entries {
        let relative = relative_to_dir(entry.as_ref(), playlist_dir);
        contents.push_str(&relative.display().to_string());
        contents.push('\n');
    }

    fs::write(playlist_path, contents)?;
    Ok(WriteOutcome::Written(entries.len()))
}

/// Express `entry` relative to `dir`, walking up with `..` where needed
///
/// Both paths are expected to be absolute (the orchestrator absolutizes
/// everything it collects); with mismatched anchors the entry is returned
/// as-is.
#[must_use]
pub fn relative_to_dir(entry: &Path, dir: &Path) -> PathBuf {
    let entry_components: Vec<Component<'_>> = entry.components().collect();
    let dir_components: Vec<Component<'_>> = dir.components().collect();

    if entry.is_absolute() != dir.is_absolute() {
        return entry.to_path_buf();
    }

    let common = entry_components
        .iter()
        .zip(dir_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..dir_components.len() {
        relative.push("..");
    }
    for component in &entry_components[common..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
