//! Configuration management for the animanga catalog.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Favorites database settings
    pub database: DatabaseConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Anime catalog (Jikan) settings
    #[serde(default)]
    pub jikan: JikanConfig,

    /// Manga catalog (MangaDex) settings
    #[serde(default)]
    pub mangadex: MangaDexConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path (relative to data directory or absolute)
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Jikan (anime catalog) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Fixed delay before every request, in milliseconds
    pub request_delay_ms: u64,

    /// HTTP timeout in seconds (None = client default, no timeout)
    pub timeout_secs: Option<u64>,
}

/// MangaDex (manga catalog) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MangaDexConfig {
    /// MangaDex API base URL
    pub base_url: String,

    /// Host serving cover images
    pub uploads_url: String,

    /// Translated language used for chapter feeds
    pub chapter_language: String,

    /// Content ratings requested for list and search calls
    pub content_ratings: Vec<String>,

    /// HTTP timeout in seconds (None = client default, no timeout)
    pub timeout_secs: Option<u64>,
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            request_delay_ms: 500,
            timeout_secs: None,
        }
    }
}

impl Default for MangaDexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mangadex.org".to_string(),
            uploads_url: "https://uploads.mangadex.org".to_string(),
            chapter_language: "en".to_string(),
            content_ratings: vec!["safe".to_string(), "suggestive".to_string()],
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
            },
            database: DatabaseConfig {
                path: "favorites.db".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            jikan: JikanConfig::default(),
            mangadex: MangaDexConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the path for the favorites database file
    pub fn database_path(&self) -> PathBuf {
        self.resolve(&self.database.path)
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.log_dir)
    }

    /// Parse the configured default log level, falling back to INFO
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .default_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}
