//! In-memory tag provider for tests
//!
//! Resolves tags by file name instead of file contents, so tests can build
//! media trees out of placeholder files with deterministic tag sets.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::Path;

use super::error::TagError;
use super::provider::TagProvider;
use super::TagSet;

/// Deterministic `TagProvider` keyed by file name
#[derive(Debug, Default)]
pub struct StaticProvider {
    by_name: HashMap<String, TagSet>,
    reads: Cell<usize>,
}

impl StaticProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the tags returned for any path with this file name
    #[must_use]
    pub fn with<S: Into<String>>(mut self, file_name: S, tags: TagSet) -> Self {
        self.by_name.insert(file_name.into(), tags);
        self
    }

    /// Number of `read_tags` invocations so far
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl TagProvider for StaticProvider {
    fn read_tags(&self, path: &Path) -> Result<Option<TagSet>, TagError> {
        self.reads.set(self.reads.get() + 1);
        let tags = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.by_name.get(name))
            .cloned();
        Ok(tags)
    }
}
