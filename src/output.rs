//! Output formatting for CLI display
//!
//! Small helpers that keep console formatting in one place: cache-state
//! labels, tag listings for inspect mode, and the per-filter and
//! end-of-run summaries.

use std::path::Path;
use std::time::Duration;

use chrono::{Local, TimeZone};
use colored::Colorize;

use crate::db::CacheState;
use crate::tags::TagValue;

/// Human-readable, colored cache-state label
#[must_use]
pub fn cache_state_label(state: CacheState) -> String {
    match state {
        CacheState::Absent => "not cached".yellow().to_string(),
        CacheState::Valid => "valid".green().to_string(),
        CacheState::Stale => "stale".red().to_string(),
    }
}

/// Format one tag for the inspect listing
#[must_use]
pub fn tag_line(name: &str, value: &TagValue) -> String {
    format!("    {name} = {value}")
}

/// Render a unix-milliseconds timestamp in local time
#[must_use]
pub fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map_or_else(|| millis.to_string(), |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Per-filter match summary
#[must_use]
pub fn filter_summary(filter_path: &Path, matched: usize) -> String {
    format!(
        "Filter file {} matched {} file(s)",
        filter_path.display(),
        matched.to_string().bold()
    )
}

/// Warning for a playlist that already exists and was left untouched
#[must_use]
pub fn playlist_preserved(playlist_path: &Path) -> String {
    format!(
        "{} {} already exists, skipping (use --overwrite to replace)",
        "WARNING:".yellow(),
        playlist_path.display()
    )
}

/// End-of-run summary line
#[must_use]
pub fn run_summary(files: usize, elapsed: Duration) -> String {
    format!("Processed {files} file(s) in {:.3} seconds", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_line() {
        assert_eq!(
            tag_line("rating", &TagValue::Number(4.5)),
            "    rating = 4.5"
        );
    }

    #[test]
    fn test_format_timestamp_falls_back_on_out_of_range() {
        // far out of chrono's representable range
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
