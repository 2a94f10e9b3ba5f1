use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, DEFAULT_ENDPOINTS};

/// Upper bound on configured retries.
const MAX_RETRIES_LIMIT: u32 = 10;

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
    /// Uses `~/.config/trackcase/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("trackcase").join("config.toml")
    }

    /// Loads configuration from the default config file, then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific path.
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

    /// Applies `TRACKCASE_*` overrides using the given variable lookup.
    ///
    /// Recognized variables:
    /// - `TRACKCASE_BASE_URL`
    /// - `TRACKCASE_<KEY>_ENDPOINT` for every known endpoint key
    /// - `TRACKCASE_BASIC_AUTH_USERNAME` / `TRACKCASE_BASIC_AUTH_PASSWORD`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TRACKCASE_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(user) = lookup("TRACKCASE_BASIC_AUTH_USERNAME") {
            self.auth.basic_username = Some(user);
        }
        if let Some(pass) = lookup("TRACKCASE_BASIC_AUTH_PASSWORD") {
            self.auth.basic_password = Some(pass);
        }
        for (key, _) in DEFAULT_ENDPOINTS {
            let var = format!("TRACKCASE_{}_ENDPOINT", key.to_uppercase());
            if let Some(template) = lookup(&var) {
                self.endpoints.set(*key, template);
            }
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an http(s) URL
    /// - No endpoint template is blank
    /// - The retry count is bounded
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("Base URL '{}' must start with http:// or https://", base),
            });
        }

        if let Some((key, _)) = self.endpoints.iter().find(|(_, t)| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("Endpoint '{}' has an empty template", key),
            });
        }

        if self.retry.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "max_retries {} exceeds the limit of {}",
                    self.retry.max_retries, MAX_RETRIES_LIMIT
                ),
            });
        }

        Ok(())
    }
}
