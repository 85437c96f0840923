//! Bootstrap configuration
//!
//! Two tiers, highest priority first:
//! 1. Command-line arguments / process environment (resolved by the binary)
//! 2. TOML configuration file
//!
//! Database URL and port have no built-in default. Startup fails if neither
//! tier supplies them.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// File name searched for in the working directory
pub const LOCAL_CONFIG_FILE: &str = "songlib.toml";

/// Largest page size served when the config file does not set one
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Configuration as read from the TOML file
///
/// Every field is optional so that a partial file can be combined with
/// command-line and environment values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// sqlx connection string, e.g. `sqlite://songs.db?mode=rwc`
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Upper bound applied to the `pageSize` query parameter
    #[serde(default)]
    pub max_page_size: Option<i64>,

    /// Insert the built-in catalog songs at startup
    #[serde(default)]
    pub seed_initial_songs: Option<bool>,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Outbound metadata lookup settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Lookup endpoint. When absent, new songs are stored as submitted.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_enrichment_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_enrichment_timeout_secs(),
        }
    }
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_enrichment_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// `true` forces seeding off regardless of the TOML file
    pub no_seed: bool,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_page_size: i64,
    pub seed_initial_songs: bool,
    pub enrichment: EnrichmentConfig,
}

impl ServiceConfig {
    /// Combine command-line/environment overrides with the TOML file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the database URL or port is missing, or if
    /// `max_page_size` is not positive.
    pub fn resolve(overrides: ConfigOverrides, toml_config: TomlConfig) -> Result<Self> {
        let database_url = overrides
            .database_url
            .or(toml_config.database_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("database URL is not set (DATABASE_URL)".to_string()))?;

        let port = overrides
            .port
            .or(toml_config.port)
            .ok_or_else(|| Error::Config("server port is not set (APP_PORT)".to_string()))?;

        let host = overrides
            .host
            .or(toml_config.host)
            .unwrap_or_else(default_host);

        let max_page_size = toml_config.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE);
        if max_page_size < 1 {
            return Err(Error::Config(format!(
                "max_page_size must be positive, got {}",
                max_page_size
            )));
        }

        let seed_initial_songs = !overrides.no_seed && toml_config.seed_initial_songs.unwrap_or(true);

        Ok(Self {
            database_url,
            host,
            port,
            max_page_size,
            seed_initial_songs,
            enrichment: toml_config.enrichment,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Locate the configuration file to use
///
/// An explicit path must exist. Otherwise `./songlib.toml` is tried, then
/// `<config dir>/songlib/config.toml`. `None` means no file is used.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|d| d.join("songlib").join("config.toml"))
        .filter(|p| p.exists()))
}

/// Load the TOML tier, falling back to an empty config when no file exists
pub fn load_file_tier(explicit: Option<&Path>) -> Result<TomlConfig> {
    match locate_config_file(explicit)? {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            load_toml_config(&path)
        }
        None => {
            info!("No configuration file found, using command line and environment only");
            Ok(TomlConfig::default())
        }
    }
}
