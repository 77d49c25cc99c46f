//! Configuration loading from TOML files
//!
//! Optional convenience layer over the typed constructors: enemy presets,
//! anomaly effects, skill definitions, and estimator unit values.

mod anomalies;
mod enemies;
mod skills;
mod stat_values;

pub use anomalies::{load_anomaly_configs, parse_anomaly_configs};
pub use enemies::{default_enemies, load_enemy_configs, parse_enemy_configs};
pub use skills::{load_skill_configs, parse_skill_configs};
pub use stat_values::{load_stat_unit_values, parse_stat_unit_values};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Validation(String),
}

/// Read and deserialize one TOML config file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

/// Deserialize one TOML config document from a string
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
