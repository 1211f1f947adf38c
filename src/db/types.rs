//! Key and value types for the tag cache
//!
//! `PathKey` normalizes a file path into the absolute form used as the
//! cache key, serializable to `Vec<u8>` for sled. `CacheEntry` is the
//! stored value: the file's last-modified time at write time plus its
//! serialized `TagSet`. Round-trip fidelity is part of the contract:
//! decoding an encoded entry yields a structurally equal value.

use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::tags::TagSet;

use super::error::DbError;

/// Absolute-path cache key, serializable to database bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKey(PathBuf);

impl PathKey {
    /// Build the key for a file, absolutizing the path
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the current working directory is unavailable
    /// while absolutizing a relative path.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        Ok(Self(std::path::absolute(path)?))
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> PathBuf {
        self.0
    }
}

impl TryFrom<&PathKey> for Vec<u8> {
    type Error = DbError;

    fn try_from(key: &PathKey) -> Result<Self, Self::Error> {
        Ok(bincode::encode_to_vec(&key.0, bincode::config::standard())?)
    }
}

impl AsRef<Path> for PathKey {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// One cached record: last-modified timestamp and the tag set
///
/// The invariant the cache maintains: the entry is valid for a path iff
/// the file's current modification time is not newer than `last_modified`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheEntry {
    /// File modification time at store time, unix milliseconds
    pub last_modified: i64,
    /// Tags as extracted; empty for files the provider does not support
    pub tags: TagSet,
}

impl CacheEntry {
    #[must_use]
    pub const fn new(last_modified: i64, tags: TagSet) -> Self {
        Self {
            last_modified,
            tags,
        }
    }

    /// Serialize for storage
    ///
    /// # Errors
    ///
    /// Returns `DbError` if bincode encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DbError> {
        Ok(bincode::encode_to_vec(self, bincode::config::standard())?)
    }

    /// Deserialize a stored entry
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the bytes do not decode to a `CacheEntry`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let (entry, _): (Self, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(entry)
    }
}
