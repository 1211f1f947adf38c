//! Tag data model and tag extraction
//!
//! Defines the `TagValue`/`TagSet` types shared by the cache, the rule
//! evaluator and the orchestrator, plus the `TagProvider` seam that turns
//! a media file into a `TagSet`.
//!
//! Tag names are normalized to lowercase on insertion and lookups are
//! case-insensitive. A `TagSet` is immutable once produced: the cache and
//! the evaluator only ever read it, refreshes replace it wholesale.

use std::collections::BTreeMap;
use std::fmt;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

pub mod error;
pub mod mock;
pub mod provider;

pub use error::TagError;
pub use mock::StaticProvider;
pub use provider::{AudioFileProvider, SUPPORTED_EXTENSIONS, TagProvider};

/// A single tag value as stored in the cache and seen by the evaluator
///
/// Absence is not a variant: a missing tag is a missing `TagSet` key.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum TagValue {
    /// Numeric value; integer and float tags both live here so that
    /// comparisons are purely numeric (`5` equals `5.0`)
    Number(f64),
    /// Free-form text value
    Text(String),
    /// Multi-valued text tag (e.g. several genres)
    List(Vec<String>),
}

impl TagValue {
    /// Build a `Text` value from anything string-like
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }

    /// Build a `List` value from string-like items
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// Resolved metadata for one media file: lowercase tag name -> value
///
/// Backed by a `BTreeMap` so iteration order (and thus serialized form and
/// diagnostic output) is stable.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TagSet(BTreeMap<String, TagValue>);

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, lowercasing its name
    pub fn insert<S: Into<String>>(&mut self, name: S, value: TagValue) {
        self.0.insert(name.into().to_lowercase(), value);
    }

    /// Case-insensitive lookup
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.0.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate tags in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TagValue)> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, TagValue)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (S, TagValue)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (name, value) in iter {
            tags.insert(name, value);
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lowercases_names() {
        let mut tags = TagSet::new();
        tags.insert("Artist", TagValue::text("DANCE WITH THE DEAD"));

        assert!(tags.contains("artist"));
        assert_eq!(
            tags.get("ARTIST"),
            Some(&TagValue::text("DANCE WITH THE DEAD"))
        );
    }

    #[test]
    fn test_missing_tag_is_none() {
        let tags = TagSet::new();
        assert_eq!(tags.get("rating"), None);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let tags: TagSet = [
            ("year", TagValue::Number(1984.0)),
            ("artist", TagValue::text("a")),
            ("title", TagValue::text("t")),
        ]
        .into_iter()
        .collect();

        let names: Vec<&String> = tags.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["artist", "title", "year"]);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(TagValue::Number(4.5).to_string(), "4.5");
        assert_eq!(TagValue::Number(5.0).to_string(), "5");
        assert_eq!(TagValue::text("Synthwave").to_string(), "Synthwave");
        assert_eq!(
            TagValue::list(["Synthwave", "Retrowave"]).to_string(),
            "Synthwave, Retrowave"
        );
    }
}
