//! Persistent tag cache
//!
//! Stores one record per absolute file path: the file's modification time
//! when the tags were extracted, plus the extracted `TagSet`. Backed by a
//! single sled tree; keys are bincode-encoded absolute paths, values are
//! bincode-encoded `CacheEntry` records.
//!
//! The consistency protocol is classify-then-act:
//!
//! - `classify` reports Absent, Valid or Stale for a path, comparing the
//!   file's current mtime against the stored timestamp;
//! - `fetch` may only be called for paths classified Valid (or Stale, if
//!   the caller wants the outdated tags anyway) — fetching an absent path
//!   is a caller bug and fails with `DbError::NotCached`;
//! - `store` upserts, recomputing the mtime at call time, and flushes so
//!   every upsert is durable on its own. A crash mid-run loses at most the
//!   in-flight file's update.
//!
//! Invalidation is driven purely by modification time. Files whose mtime
//! is reset (archive extraction, clock skew) can appear spuriously Valid;
//! that trade keeps the staleness check O(1) with no content re-read.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use sled::{Db, Tree};

pub mod error;
pub mod types;

pub use error::DbError;
pub use types::{CacheEntry, PathKey};

use crate::tags::TagSet;

/// Validity of a cached record for a given path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No record for this path
    Absent,
    /// Record exists and the file has not been modified since it was
    /// written
    Valid,
    /// Record exists but the file is newer than the stored timestamp
    Stale,
}

/// Tag cache over a sled database
///
/// One handle is shared for a whole run. Upserts are atomic per key;
/// concurrent *processes* sharing a cache file are not supported.
pub struct TagCache {
    db: Db,
    files: Tree,
}

impl TagCache {
    /// Open or create a cache at the given directory
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or the files
    /// tree cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let files = db.open_tree("files")?;
        Ok(Self { db, files })
    }

    /// Classify the cache record for a path
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the file's metadata cannot be read or the
    /// stored record fails to decode.
    pub fn classify(&self, path: &Path) -> Result<CacheState, DbError> {
        let key: Vec<u8> = (&PathKey::for_file(path)?).try_into()?;
        match self.files.get(key)? {
            None => Ok(CacheState::Absent),
            Some(raw) => {
                let entry = CacheEntry::from_bytes(&raw)?;
                if last_modified_millis(path)? <= entry.last_modified {
                    Ok(CacheState::Valid)
                } else {
                    Ok(CacheState::Stale)
                }
            }
        }
    }

    /// Fetch the stored tag set for a path
    ///
    /// The caller must have classified the path first; see the module
    /// docs.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotCached` if no record exists for the path.
    pub fn fetch(&self, path: &Path) -> Result<TagSet, DbError> {
        let path_key = PathKey::for_file(path)?;
        let key: Vec<u8> = (&path_key).try_into()?;
        match self.files.get(key)? {
            Some(raw) => Ok(CacheEntry::from_bytes(&raw)?.tags),
            None => Err(DbError::NotCached(path_key.into_inner())),
        }
    }

    /// Upsert the tag set for a path, stamping the file's current mtime
    ///
    /// Flushes the database so the write is durable before returning.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the file's metadata cannot be read or the
    /// write fails.
    pub fn store(&self, path: &Path, tags: &TagSet) -> Result<(), DbError> {
        let last_modified = last_modified_millis(path)?;
        self.store_at(path, tags, last_modified)
    }

    /// The raw stored timestamp for a path, if any
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the stored record fails to decode.
    pub fn stored_timestamp(&self, path: &Path) -> Result<Option<i64>, DbError> {
        let key: Vec<u8> = (&PathKey::for_file(path)?).try_into()?;
        match self.files.get(key)? {
            Some(raw) => Ok(Some(CacheEntry::from_bytes(&raw)?.last_modified)),
            None => Ok(None),
        }
    }

    /// Number of cached records
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn store_at(&self, path: &Path, tags: &TagSet, last_modified: i64) -> Result<(), DbError> {
        let key: Vec<u8> = (&PathKey::for_file(path)?).try_into()?;
        let entry = CacheEntry::new(last_modified, tags.clone());
        self.files.insert(key, entry.to_bytes()?)?;
        self.db.flush()?;
        Ok(())
    }
}

/// Modification time of a file as unix milliseconds
///
/// # Errors
///
/// Returns `DbError` if the file's metadata cannot be read.
pub fn last_modified_millis(path: &Path) -> Result<i64, DbError> {
    let modified = fs::metadata(path)?.modified()?;
    let millis = match modified.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
        // pre-epoch mtimes happen on weird filesystems; keep the ordering
        Err(err) => -i64::try_from(err.duration().as_millis()).unwrap_or(i64::MAX),
    };
    Ok(millis)
}
