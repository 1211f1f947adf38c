//! Exclusion-pattern error types

use thiserror::Error;

/// Errors raised while compiling exclusion patterns
#[derive(Debug, Error)]
pub enum PatternError {
    /// Empty pattern string
    #[error("Exclusion pattern cannot be empty")]
    InvalidEmpty,

    /// Regex failed to compile
    #[error("Invalid exclude regex '{pattern}': {reason}")]
    RegexCompile { pattern: String, reason: String },

    /// Glob specification failed to parse
    #[error("Invalid exclude glob '{pattern}': {reason}")]
    GlobParse { pattern: String, reason: String },
}

impl PatternError {
    pub(crate) fn regex_compile(pattern: &str, reason: &str) -> Self {
        Self::RegexCompile {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn glob_parse(pattern: &str, reason: &str) -> Self {
        Self::GlobParse {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
