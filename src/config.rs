//! Service configuration.
//!
//! Configuration is layered. Each layer only needs the keys it wants to
//! override:
//!
//! ```text
//! environment variables   (highest priority)
//! vdrone.toml             (or the file given with --config)
//! built-in defaults       (lowest priority)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! listen_addr = "0.0.0.0:8000"   # VDRONE_LISTEN_ADDR
//! cors = true                    # VDRONE_CORS
//! seed_on_start = true           # VDRONE_SEED_ON_START
//!
//! [store]
//! # url = "file:///var/lib/vdrone"   # DATABASE_URL; omit to run without a store
//! database_name = "vdrone"           # DATABASE_NAME
//!
//! [log]
//! level = "info"                 # LOG_LEVEL (RUST_LOG wins when set)
//! format = "human"               # LOG_FORMAT: human | json
//! ```
//!
//! The store URL is read once at startup. Leaving it out is not an error: the
//! service starts in degraded mode and serves defaults.

use crate::telemetry::LogFormat;
use confique::Config;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vdrone.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),
    #[error("{0}")]
    Load(#[from] confique::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Config)]
pub struct CmsConfig {
    /// HTTP server settings.
    #[config(nested)]
    pub server: ServerConfig,
    /// Document store connection.
    #[config(nested)]
    pub store: StoreConfig,
    /// Logging output.
    #[config(nested)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Config)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[config(default = "0.0.0.0:8000", env = "VDRONE_LISTEN_ADDR")]
    pub listen_addr: SocketAddr,
    /// Allow cross-origin requests from any origin, method and header.
    #[config(default = true, env = "VDRONE_CORS")]
    pub cors: bool,
    /// Fill empty public collections with placeholder content at startup.
    #[config(default = true, env = "VDRONE_SEED_ON_START")]
    pub seed_on_start: bool,
}

#[derive(Debug, Clone, Config)]
pub struct StoreConfig {
    /// Store connection string: `memory`, `file:///path/to/dir`, or a bare
    /// directory path. Without it the service runs with no database.
    #[config(env = "DATABASE_URL")]
    pub url: Option<String>,
    /// Namespace inside the store (a subdirectory for file stores).
    #[config(default = "vdrone", env = "DATABASE_NAME")]
    pub database_name: String,
}

#[derive(Debug, Clone, Config)]
pub struct LogConfig {
    /// Default log level, used when RUST_LOG is not set.
    #[config(default = "info", env = "LOG_LEVEL")]
    pub level: String,
    /// Log line format: "human" or "json".
    #[config(default = "human", env = "LOG_FORMAT")]
    pub format: String,
}

impl CmsConfig {
    /// Built-in defaults only, ignoring environment and files.
    pub fn defaults() -> Result<Self, ConfigError> {
        Ok(Self::builder().load()?)
    }

    /// Validate values that the types alone cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LogFormat::parse(&self.log.format).is_none() {
            return Err(ConfigError::Validation(format!(
                "log.format must be \"human\" or \"json\", got {:?}",
                self.log.format
            )));
        }
        let name = self.store.database_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::Validation(format!(
                "store.database_name must be a plain name, got {name:?}"
            )));
        }
        Ok(())
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log.format).unwrap_or_default()
    }
}

/// Load configuration from the environment, a config file, and defaults.
///
/// An explicit `path` must exist; the implicit [`DEFAULT_CONFIG_FILE`] is
/// optional.
pub fn load_config(path: Option<&Path>) -> Result<CmsConfig, ConfigError> {
    load_layers(CmsConfig::builder().env(), path)
}

fn load_layers(
    builder: confique::Builder<CmsConfig>,
    path: Option<&Path>,
) -> Result<CmsConfig, ConfigError> {
    let file = match path {
        Some(p) if !p.exists() => return Err(ConfigError::Missing(p.to_path_buf())),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    let config = builder.file(file).load()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented config file with every key and its default.
///
/// Used by the `gen-config` CLI command.
pub fn config_template() -> String {
    confique::toml::template::<CmsConfig>(confique::toml::FormatOptions::default())
}
