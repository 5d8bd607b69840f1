//! Server configuration
//!
//! The listening port is the only command-line argument. Everything else
//! resolves in priority order:
//! 1. Environment variable
//! 2. TOML config file
//! 3. Compiled default

use lux_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "LUX_CONFIG";
pub const DATABASE_ENV: &str = "LUX_DATABASE";
pub const REQUEST_TIMEOUT_ENV: &str = "LUX_REQUEST_TIMEOUT_SECS";
pub const MAX_REQUEST_BYTES_ENV: &str = "LUX_MAX_REQUEST_BYTES";
pub const MAX_CONNECTIONS_ENV: &str = "LUX_MAX_CONNECTIONS";

/// Compiled defaults
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const DATABASE: &'static str = "lux.sqlite";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const MAX_REQUEST_BYTES: usize = 64 * 1024;
    pub const MAX_CONNECTIONS: u32 = 8;
}

/// Contents of `config.toml`; every key optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub max_request_bytes: Option<usize>,
    pub max_connections: Option<u32>,
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    /// `None` when configured as 0 seconds
    pub request_timeout: Option<Duration>,
    pub max_request_bytes: usize,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(CompiledDefaults::DATABASE),
            request_timeout: Some(Duration::from_secs(CompiledDefaults::REQUEST_TIMEOUT_SECS)),
            max_request_bytes: CompiledDefaults::MAX_REQUEST_BYTES,
            max_connections: CompiledDefaults::MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Resolve from the process environment and the config file
    pub fn resolve() -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let toml_config = load_toml_config(config_file_path(&env).as_deref())?;
        Self::from_sources(&toml_config, env)
    }

    /// Resolve from an explicit TOML layer and environment lookup
    pub fn from_sources<F>(toml_config: &TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = env(DATABASE_ENV)
            .map(PathBuf::from)
            .or_else(|| toml_config.database.clone())
            .unwrap_or_else(|| PathBuf::from(CompiledDefaults::DATABASE));

        let timeout_secs = parse_env(&env, REQUEST_TIMEOUT_ENV)?
            .or(toml_config.request_timeout_secs)
            .unwrap_or(CompiledDefaults::REQUEST_TIMEOUT_SECS);

        let max_request_bytes = parse_env(&env, MAX_REQUEST_BYTES_ENV)?
            .or(toml_config.max_request_bytes)
            .unwrap_or(CompiledDefaults::MAX_REQUEST_BYTES);

        let max_connections = parse_env(&env, MAX_CONNECTIONS_ENV)?
            .or(toml_config.max_connections)
            .unwrap_or(CompiledDefaults::MAX_CONNECTIONS);

        if max_connections == 0 {
            return Err(Error::Config("max_connections must be at least 1".to_string()));
        }

        Ok(Self {
            database_path,
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            max_request_bytes,
            max_connections,
        })
    }
}

fn parse_env<T, F>(env: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", key, raw, e)))
        })
        .transpose()
}

/// Config file location: `LUX_CONFIG`, else `<config dir>/lux/config.toml`
pub fn config_file_path<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("lux").join("config.toml")))
}

/// Load the TOML layer; a missing file yields an empty layer
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path.filter(|p| p.exists()) else {
        debug!("No config file found, using environment and defaults");
        return Ok(TomlConfig::default());
    };

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    debug!("Loaded config file: {}", path.display());
    Ok(config)
}
