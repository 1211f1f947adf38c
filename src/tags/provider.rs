//! Tag extraction from audio files
//!
//! The `TagProvider` trait is the seam between the orchestrator and
//! whatever library turns raw media bytes into tags. The shipped
//! implementation reads common audio formats through `audiotags`.

use std::fs;
use std::path::Path;

use audiotags::Tag;

use super::error::TagError;
use super::{TagSet, TagValue};

/// Extensions the audio provider will attempt to read
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "m4a", "mp4", "flac"];

/// Source of tag sets for candidate media files
///
/// `Ok(None)` means the file is not supported; this is a normal outcome,
/// not an error, and callers cache it as an empty `TagSet` so the file is
/// never probed again.
pub trait TagProvider {
    /// Read the tags of one file
    ///
    /// # Errors
    ///
    /// Returns `TagError` if file metadata cannot be read for a file that
    /// passed the format check.
    fn read_tags(&self, path: &Path) -> Result<Option<TagSet>, TagError>;
}

/// `TagProvider` backed by the `audiotags` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct AudioFileProvider;

impl AudioFileProvider {
    /// Whether the provider will attempt to read this path at all
    #[must_use]
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }
}

impl TagProvider for AudioFileProvider {
    fn read_tags(&self, path: &Path) -> Result<Option<TagSet>, TagError> {
        if !Self::is_supported(path) {
            return Ok(None);
        }

        // A supported extension over unreadable contents is still treated
        // as unsupported: the run must survive corrupt files in the tree.
        let Ok(tag) = Tag::new().read_from_path(path) else {
            return Ok(None);
        };

        let metadata = fs::metadata(path)?;

        let mut tags = TagSet::new();
        if let Some(title) = tag.title() {
            tags.insert("title", TagValue::text(title));
        }
        match tag.artists() {
            Some(artists) if artists.len() > 1 => {
                tags.insert("artist", TagValue::list(artists));
            }
            _ => {
                if let Some(artist) = tag.artist() {
                    tags.insert("artist", TagValue::text(artist));
                }
            }
        }
        if let Some(album) = tag.album_title() {
            tags.insert("album", TagValue::text(album));
        }
        if let Some(album_artist) = tag.album_artist() {
            tags.insert("albumartist", TagValue::text(album_artist));
        }
        if let Some(genre) = tag.genre() {
            tags.insert("genre", TagValue::text(genre));
        }
        if let Some(year) = tag.year() {
            tags.insert("year", TagValue::Number(f64::from(year)));
        }
        if let Some(track) = tag.track_number() {
            tags.insert("track", TagValue::Number(f64::from(track)));
        }
        if let Some(total) = tag.total_tracks() {
            tags.insert("track_total", TagValue::Number(f64::from(total)));
        }
        if let Some(disc) = tag.disc_number() {
            tags.insert("disc", TagValue::Number(f64::from(disc)));
        }
        if let Some(total) = tag.total_discs() {
            tags.insert("disc_total", TagValue::Number(f64::from(total)));
        }
        if let Some(duration) = tag.duration() {
            tags.insert("duration", TagValue::Number(duration));
        }
        tags.insert("filename", TagValue::text(path.display().to_string()));
        tags.insert("filesize", TagValue::Number(metadata.len() as f64));

        Ok(Some(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_supported_extensions() {
        assert!(AudioFileProvider::is_supported(Path::new("song.mp3")));
        assert!(AudioFileProvider::is_supported(Path::new("song.FLAC")));
        assert!(AudioFileProvider::is_supported(Path::new("a/b/song.m4a")));
        assert!(!AudioFileProvider::is_supported(Path::new("cover.jpg")));
        assert!(!AudioFileProvider::is_supported(Path::new("playlist.m3ug")));
        assert!(!AudioFileProvider::is_supported(Path::new("noext")));
    }

    #[test]
    fn test_unsupported_file_is_none_not_error() {
        let provider = AudioFileProvider;
        let result = provider
            .read_tags(&PathBuf::from("definitely/not/there.txt"))
            .unwrap();
        assert_eq!(result, None);
    }
}
