//! m3ugen CLI application entry point
//!
//! Generates M3U playlists from M3UG filter files scattered through a
//! media tree. Tags are extracted once per file and cached keyed by
//! modification time, so repeat runs only pay for files that changed.
//!
//! # Usage
//!
//! ```bash
//! # Process a music collection: refresh the tag cache, generate one
//! # playlist per .m3ug filter file found in the tree
//! m3ugen ~/Music
//!
//! # Replace playlists that already exist
//! m3ugen --overwrite ~/Music
//!
//! # Exclude paths by regex or glob
//! m3ugen -e incoming --exclude-glob '**/*.wav' ~/Music
//!
//! # Inspect what m3ugen knows about a single file
//! m3ugen -v ~/Music/song.mp3
//! ```
//!
//! # Configuration
//!
//! Defaults (cache location, standing exclusions, overwrite behavior)
//! live in the user's config directory (`~/.config/m3ugen/config.toml`
//! on Linux); command-line flags take precedence.

use m3ugen::{
    M3ugenError,
    cli::Cli,
    config::M3ugenConfig,
    db::TagCache,
    generate::{self, GenerateOptions},
    patterns::{ExcludePattern, ExcludeSet},
    tags::AudioFileProvider,
};

type Result<T> = std::result::Result<T, M3ugenError>;

/// Compile exclusion patterns from configuration and command line
fn build_excludes(config: &M3ugenConfig, cli: &Cli) -> Result<ExcludeSet> {
    let mut patterns = Vec::new();
    for pattern in config.exclude.iter().chain(&cli.exclude) {
        patterns.push(ExcludePattern::regex(pattern)?);
    }
    for pattern in config.exclude_glob.iter().chain(&cli.exclude_glob) {
        patterns.push(ExcludePattern::glob(pattern)?);
    }
    Ok(ExcludeSet::new(patterns))
}

/// Main entry point for the m3ugen application
///
/// Loads configuration, parses command-line arguments, opens the tag
/// cache, and runs the generator against the target path.
///
/// # Errors
///
/// Returns `M3ugenError` on any fatal condition; the process then exits
/// non-zero.
fn main() -> Result<()> {
    let config = M3ugenConfig::load()?;
    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;
    let verbose = cli.verbose && !quiet;

    let excludes = build_excludes(&config, &cli)?;

    let db_path = match &cli.database {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    let cache = TagCache::open(&db_path)?;
    if verbose {
        println!("Using {} as tag cache", db_path.display());
    }

    let opts = GenerateOptions {
        excludes,
        overwrite: cli.overwrite || config.overwrite,
        verbose,
        quiet,
    };

    generate::run(&cache, &AudioFileProvider, &cli.path, &opts)?;

    Ok(())
}
