use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "FOLIO_API_URL";
/// Overrides `assets.cloud_name`.
pub const ENV_CLOUD_NAME: &str = "FOLIO_CLOUD_NAME";

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
    /// Uses `~/.config/folio/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("folio").join("config.toml")
    }

    /// Loads `path`, then applies `FOLIO_*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
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

    /// Applies `FOLIO_*` overrides; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(name) = lookup(ENV_CLOUD_NAME).filter(|v| !v.trim().is_empty()) {
            self.assets.cloud_name = name;
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both URLs parse and use http(s)
    /// - The auto-close delay is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("api.base_url", &self.api.base_url)?;
        check_url("assets.upload_base_url", &self.assets.upload_base_url)?;

        if self.notifications.auto_close_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "notifications.auto_close_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        message: format!("{} '{}' is not a valid URL: {}", field, value, e),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError {
            message: format!("{} must use http or https, got '{}'", field, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_values() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_URL => Some("https://api.example.com".into()),
            ENV_CLOUD_NAME => Some("demo".into()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.assets.cloud_name, "demo");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".into()));
        assert_eq!(config, Config::default());
    }
}
