//! Configuration management for recipebox.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "recipebox";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "recipes.db";

/// Default address for the web front end.
const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RECIPEBOX_`, sections separated by
///    `__`, e.g. `RECIPEBOX_WEB__LIST_LIMIT=50`)
/// 2. TOML config file at `~/.config/recipebox/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Web front end configuration.
    pub web: WebConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/recipebox/recipes.db`
    pub database_path: Option<PathBuf>,
}

/// Web-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Maximum number of recipes shown on the index page. Unset shows all.
    pub list_limit: Option<usize>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            list_limit: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("RECIPEBOX_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.web.bind.parse::<SocketAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("web.bind is not a valid socket address: {}", self.web.bind),
            });
        }

        if self.web.list_limit == Some(0) {
            return Err(Error::ConfigValidation {
                message: "web.list_limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the web bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `web.bind` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.web.bind.parse().map_err(|_| Error::ConfigValidation {
            message: format!("web.bind is not a valid socket address: {}", self.web.bind),
        })
    }
}
