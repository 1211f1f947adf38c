//! Playlist generation orchestration
//!
//! Walks a target tree once, resolving every file into one of three
//! roles: excluded (skipped entirely), filter definition (`.m3ug`, parsed
//! into a `RuleSet`), or candidate media (tag set resolved through the
//! cache). After the walk, every rule set is applied to every collected
//! tag set, in the order files were encountered, and non-empty match
//! lists become `.m3u` playlists next to their filter files.
//!
//! The walk is sorted by file name, so an unchanged tree produces the
//! same encounter order, the same match lists and byte-identical
//! playlists on every run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::M3ugenError;
use crate::db::{CacheState, TagCache};
use crate::m3ug::{RuleSet, parse_rules};
use crate::output;
use crate::patterns::ExcludeSet;
use crate::playlist::{self, WriteOutcome};
use crate::tags::{TagProvider, TagSet};

/// Knobs for one orchestration run
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Entries matching any of these patterns are skipped entirely
    pub excludes: ExcludeSet,
    /// Replace playlists that already exist
    pub overwrite: bool,
    /// Print per-file diagnostics
    pub verbose: bool,
    /// Only print playlist results
    pub quiet: bool,
}

/// What a run did, for callers and tests
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Media files that resolved to a non-empty tag set
    pub files_processed: usize,
    /// Filter files parsed
    pub filters_parsed: usize,
    /// Playlists written this run, in filter order
    pub playlists_written: Vec<PathBuf>,
}

/// Process a target path
///
/// Directories are walked and turned into playlists; single files are
/// inspected and reported on. Anything else is fatal.
///
/// # Errors
///
/// Returns `M3ugenError` if the target is neither a file nor a
/// directory, if any filter file fails to parse, or on cache/filesystem
/// failures.
pub fn run<P: TagProvider>(
    cache: &TagCache,
    provider: &P,
    target: &Path,
    opts: &GenerateOptions,
) -> Result<GenerateReport, M3ugenError> {
    if target.is_dir() {
        generate_directory(cache, provider, target, opts)
    } else if target.is_file() {
        inspect_file(cache, provider, target, opts)?;
        Ok(GenerateReport::default())
    } else {
        Err(M3ugenError::InvalidTarget(target.to_path_buf()))
    }
}

/// A filter definition is recognized purely by its file name
fn is_filter_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("m3ug"))
}

fn generate_directory<P: TagProvider>(
    cache: &TagCache,
    provider: &P,
    directory: &Path,
    opts: &GenerateOptions,
) -> Result<GenerateReport, M3ugenError> {
    let started = Instant::now();

    let mut tag_sets: Vec<(PathBuf, TagSet)> = Vec::new();
    let mut filters: Vec<(PathBuf, RuleSet)> = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = std::path::absolute(entry.path())?;

        if opts.excludes.is_excluded(&path) {
            if opts.verbose {
                println!("Skipping {} because of exclude pattern", path.display());
            }
            continue;
        }

        if is_filter_file(&path) {
            let content = fs::read_to_string(&path)?;
            let rules = parse_rules(&content, &path.display().to_string())?;
            if opts.verbose {
                println!("Parsed {} rule(s) from {}", rules.len(), path.display());
            }
            filters.push((path, rules));
        } else {
            let tags = resolve_tags(cache, provider, &path, opts)?;
            // an empty tag set marks an unsupported file; it is cached
            // but takes no part in matching
            if !tags.is_empty() {
                tag_sets.push((path, tags));
            }
        }
    }

    let mut report = GenerateReport {
        files_processed: tag_sets.len(),
        filters_parsed: filters.len(),
        playlists_written: Vec::new(),
    };

    for (filter_path, rules) in &filters {
        let matches: Vec<&Path> = tag_sets
            .iter()
            .filter(|(_, tags)| rules.apply(tags))
            .map(|(path, _)| path.as_path())
            .collect();

        if !opts.quiet {
            println!("{}", output::filter_summary(filter_path, matches.len()));
        }
        if matches.is_empty() {
            continue;
        }

        let playlist_path = filter_path.with_extension("m3u");
        match playlist::write_playlist(&playlist_path, &matches, opts.overwrite)? {
            WriteOutcome::Written(count) => {
                if !opts.quiet {
                    println!(
                        "Writing playlist {} ({count} entries)",
                        playlist_path.display()
                    );
                }
                report.playlists_written.push(playlist_path);
            }
            WriteOutcome::SkippedExisting => {
                if !opts.quiet {
                    println!("{}", output::playlist_preserved(&playlist_path));
                }
            }
        }
    }

    if !opts.quiet {
        println!(
            "{}",
            output::run_summary(report.files_processed, started.elapsed())
        );
    }

    Ok(report)
}

/// Resolve the tag set for one candidate media file through the cache
///
/// Valid entries are reused; absent or stale ones are recomputed via the
/// provider and stored (even when empty) before continuing.
fn resolve_tags<P: TagProvider>(
    cache: &TagCache,
    provider: &P,
    path: &Path,
    opts: &GenerateOptions,
) -> Result<TagSet, M3ugenError> {
    match cache.classify(path)? {
        CacheState::Valid => {
            if opts.verbose {
                println!("Reusing cached tags for {}", path.display());
            }
            Ok(cache.fetch(path)?)
        }
        state @ (CacheState::Absent | CacheState::Stale) => {
            if opts.verbose {
                println!(
                    "Extracting tags for {} (cache {})",
                    path.display(),
                    output::cache_state_label(state)
                );
            }
            let tags = provider.read_tags(path)?.unwrap_or_default();
            cache.store(path, &tags)?;
            Ok(tags)
        }
    }
}

/// Single-file mode: report what m3ugen knows about one path
fn inspect_file<P: TagProvider>(
    cache: &TagCache,
    provider: &P,
    target: &Path,
    opts: &GenerateOptions,
) -> Result<(), M3ugenError> {
    let path = std::path::absolute(target)?;

    if is_filter_file(&path) {
        let content = fs::read_to_string(&path)?;
        let rules = parse_rules(&content, &path.display().to_string())?;
        println!("{} detected as M3UG filter file", path.display());
        println!("Parsed rules:");
        for rule in rules.iter() {
            println!("    {rule}");
        }
    } else {
        let state = cache.classify(&path)?;
        println!("Cache status: {}", output::cache_state_label(state));
        if opts.verbose {
            if let Some(timestamp) = cache.stored_timestamp(&path)? {
                println!("Cached at: {}", output::format_timestamp(timestamp));
            }
        }

        let tags = resolve_tags(cache, provider, &path, opts)?;
        if tags.is_empty() {
            println!("{} is not a supported media file", path.display());
        } else {
            println!("{} detected as media file", path.display());
            println!("Resolved tags:");
            for (name, value) in tags.iter() {
                println!("{}", output::tag_line(name, value));
            }
        }
    }

    if opts.excludes.is_excluded(&path) {
        println!("WARNING: this file is excluded by the current configuration");
    }

    Ok(())
}
