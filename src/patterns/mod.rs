//! Exclusion patterns for the traversal
//!
//! The orchestrator takes a caller-supplied exclusion predicate; excluded
//! entries are skipped entirely, neither tag-resolved nor rule-parsed.
//! Patterns are compiled once at startup, so an invalid pattern fails the
//! run before any file is touched.
//!
//! Regex patterns use search semantics: they match anywhere in the path
//! string. Glob patterns match against the whole path.

use std::path::Path;

use glob::Pattern as GlobPattern;
use regex::Regex;

pub mod error;

pub use error::PatternError;

/// One compiled exclusion pattern (regex or glob)
#[derive(Debug, Clone)]
pub enum ExcludePattern {
    Regex { original: String, compiled: Regex },
    Glob { original: String, spec: GlobPattern },
}

impl ExcludePattern {
    /// Compile a regex exclusion pattern.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `p` is empty.
    /// * Returns `PatternError::RegexCompile` if the regex fails to compile.
    pub fn regex(p: &str) -> Result<Self, PatternError> {
        if p.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        Regex::new(p)
            .map(|r| Self::Regex {
                original: p.to_string(),
                compiled: r,
            })
            .map_err(|e| PatternError::regex_compile(p, &e.to_string()))
    }

    /// Compile a glob exclusion pattern.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `p` is empty.
    /// * Returns `PatternError::GlobParse` if the glob specification is invalid.
    pub fn glob(p: &str) -> Result<Self, PatternError> {
        if p.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }
        GlobPattern::new(p)
            .map(|g| Self::Glob {
                original: p.to_string(),
                spec: g,
            })
            .map_err(|e| PatternError::glob_parse(p, &e.to_string()))
    }

    /// Whether this pattern matches the given path
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Regex { compiled, .. } => compiled.is_match(&path.to_string_lossy()),
            Self::Glob { spec, .. } => spec.matches_path(path),
        }
    }

    /// The pattern string as originally written
    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Self::Regex { original, .. } | Self::Glob { original, .. } => original,
        }
    }
}

impl PartialEq for ExcludePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Regex { original: a, .. }, Self::Regex { original: b, .. })
            | (Self::Glob { original: a, .. }, Self::Glob { original: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for ExcludePattern {}

/// The exclusion predicate handed to the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    patterns: Vec<ExcludePattern>,
}

impl ExcludeSet {
    #[must_use]
    pub fn new(patterns: Vec<ExcludePattern>) -> Self {
        Self { patterns }
    }

    /// True if any pattern matches the path
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_regex_matches_anywhere_in_path() {
        let pattern = ExcludePattern::regex("incoming").unwrap();
        assert!(pattern.matches(&PathBuf::from("/music/incoming/song.mp3")));
        assert!(pattern.matches(&PathBuf::from("/music/incoming")));
        assert!(!pattern.matches(&PathBuf::from("/music/library/song.mp3")));
    }

    #[test]
    fn test_glob_matches_whole_path() {
        let pattern = ExcludePattern::glob("/music/**/*.wav").unwrap();
        assert!(pattern.matches(&PathBuf::from("/music/a/b/take.wav")));
        assert!(!pattern.matches(&PathBuf::from("/music/a/b/take.mp3")));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert!(matches!(
            ExcludePattern::regex(""),
            Err(PatternError::InvalidEmpty)
        ));
        assert!(matches!(
            ExcludePattern::glob(""),
            Err(PatternError::InvalidEmpty)
        ));
    }

    #[test]
    fn test_invalid_patterns_are_rejected() {
        assert!(matches!(
            ExcludePattern::regex("["),
            Err(PatternError::RegexCompile { .. })
        ));
        assert!(matches!(
            ExcludePattern::glob("[invalid"),
            Err(PatternError::GlobParse { .. })
        ));
    }

    #[test]
    fn test_exclude_set_any_match() {
        let set = ExcludeSet::new(vec![
            ExcludePattern::regex(r"\.wav$").unwrap(),
            ExcludePattern::regex("demos").unwrap(),
        ]);
        assert!(set.is_excluded(&PathBuf::from("/music/take.wav")));
        assert!(set.is_excluded(&PathBuf::from("/music/demos/song.mp3")));
        assert!(!set.is_excluded(&PathBuf::from("/music/album/song.mp3")));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExcludeSet::default();
        assert!(!set.is_excluded(&PathBuf::from("/anything")));
        assert!(set.is_empty());
    }
}
