//! Configuration module for m3ugen
//!
//! Manages persisted user settings: the tag-cache location, default
//! exclusion patterns and the default overwrite behavior. Configuration
//! is stored as TOML in the user's config directory and merged with
//! command-line flags at startup (flags win).

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct M3ugenConfig {
    /// Tag-cache database directory; defaults to the user cache dir
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Regex exclusion patterns applied on every run
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob exclusion patterns applied on every run
    #[serde(default)]
    pub exclude_glob: Vec<String>,

    /// Overwrite existing playlists by default
    #[serde(default)]
    pub overwrite: bool,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl M3ugenConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("m3ugen").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or
    /// created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created,
    /// the configuration cannot be serialized to TOML, or the file cannot
    /// be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// The tag-cache directory to use: configured override or the default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no override is set and the system cache
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        self.database
            .clone()
            .map_or_else(default_database_path, Ok)
    }
}

/// Default tag-cache location under the user cache directory
///
/// # Errors
///
/// Returns `ConfigError` if the system cache directory cannot be
/// determined.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine cache directory".to_string()))?;
    Ok(cache_dir.join("m3ugen").join("cache"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = M3ugenConfig::default();
        assert!(config.database.is_none());
        assert!(config.exclude.is_empty());
        assert!(config.exclude_glob.is_empty());
        assert!(!config.overwrite);
        assert!(!config.quiet);
    }

    #[test]
    fn test_database_override_wins() {
        let config = M3ugenConfig {
            database: Some(PathBuf::from("/tmp/custom-cache")),
            ..Default::default()
        };
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/custom-cache")
        );
    }

    #[test]
    fn test_default_database_path_is_under_cache_dir() {
        let path = default_database_path().unwrap();
        assert!(path.to_string_lossy().contains("m3ugen"));
        assert!(path.ends_with("m3ugen/cache"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = M3ugenConfig {
            database: Some(PathBuf::from("/data/m3ugen")),
            exclude: vec!["incoming".to_string()],
            exclude_glob: vec!["**/*.wav".to_string()],
            overwrite: true,
            quiet: false,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: M3ugenConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.database, config.database);
        assert_eq!(parsed.exclude, config.exclude);
        assert_eq!(parsed.exclude_glob, config.exclude_glob);
        assert_eq!(parsed.overwrite, config.overwrite);
    }
}
