//! Configuration management for Breachwatch.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/breachwatch/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the breach list is fetched from
    pub source: SourceConfig,
    /// Query defaults
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.source.check()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `BREACHWATCH_BASE_URL`: Override the server the list is fetched from
    /// - `BREACHWATCH_TIMEOUT_SECS`: Override the request timeout
    /// - `BREACHWATCH_VALIDATE`: Override schema validation (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides on top of the current values.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("BREACHWATCH_BASE_URL") {
            if !val.trim().is_empty() {
                tracing::debug!("Override source.base_url from env: {}", val);
                self.source.base_url = val;
            }
        }

        if let Ok(val) = std::env::var("BREACHWATCH_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.source.timeout_secs = secs;
                tracing::debug!("Override source.timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("BREACHWATCH_VALIDATE") {
            if let Ok(validate) = val.parse() {
                self.query.validate = validate;
                tracing::debug!("Override query.validate from env: {}", validate);
            }
        }
    }

    /// Save configuration to an explicit path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/breachwatch/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "spectral", "breachwatch")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Remote breach list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Server the list is fetched from, without a trailing slash
    pub base_url: String,
    /// Path of the breach list endpoint on that server
    pub path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl SourceConfig {
    /// Full URL of the breach list endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{base}{}", self.path)
        } else {
            format!("{base}/{}", self.path)
        }
    }

    fn check(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://haveibeenpwned.com".to_string(),
            path: "/api/v3/breaches".to_string(),
            timeout_secs: 30,
            user_agent: "Breachwatch/0.1.0 (+https://github.com/spectral-privacy/breachwatch)"
                .to_string(),
        }
    }
}

/// Query behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Validate every record against the breach schema while loading
    pub validate: bool,
    /// Sort key used when none is given, e.g. `AddedDate` or `-PwnCount`
    pub default_sort: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            validate: false,
            default_sort: "AddedDate".to_string(),
        }
    }
}
