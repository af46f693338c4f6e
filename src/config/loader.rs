use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/meetup/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("meetup").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Title bounds are non-zero and ordered
    /// - At least one block and some description text are allowed
    /// - Every realtime path is a non-empty relative path
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.validation;
        if rules.title_min_chars == 0 || rules.title_min_chars > rules.title_max_chars {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "title_min_chars ({}) must be between 1 and title_max_chars ({})",
                    rules.title_min_chars, rules.title_max_chars
                ),
            });
        }
        if rules.max_blocks == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_blocks must be at least 1".to_string(),
            });
        }
        if rules.description_max_chars == 0 {
            return Err(ConfigError::ValidationError {
                message: "description_max_chars must be at least 1".to_string(),
            });
        }

        let realtime = &self.realtime;
        let paths = [
            ("meetings_path", &realtime.meetings_path),
            ("unpublished_meetings_path", &realtime.unpublished_meetings_path),
            ("locations_path", &realtime.locations_path),
            ("stories_path", &realtime.stories_path),
            ("users_path", &realtime.users_path),
            ("categories_path", &realtime.categories_path),
        ];
        for (name, path) in paths {
            if path.trim().is_empty() || path.starts_with('/') || path.ends_with('/') {
                return Err(ConfigError::ValidationError {
                    message: format!("realtime.{} '{}' is not a relative path", name, path),
                });
            }
        }

        Ok(())
    }
}
