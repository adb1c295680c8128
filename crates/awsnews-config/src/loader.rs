//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::AwsNewsConfig;

/// Prefix for environment overrides, e.g. `AWS_NEWS_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "AWS_NEWS_";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`AWS_NEWS_` prefix, `__` separates sections)
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if `config_path` is given but missing,
/// and `ConfigError::Load` if any layer fails to parse or extract.
pub fn load_config(config_path: Option<&str>) -> Result<AwsNewsConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(AwsNewsConfig::default()));

    if let Some(path) = config_path {
        if !Path::new(path).is_file() {
            return Err(ConfigError::NotFound(path.to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
