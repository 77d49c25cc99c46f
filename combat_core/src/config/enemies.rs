//! Enemy preset configuration loading

use super::ConfigError;
use crate::enemy::EnemyStats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One named enemy entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub id: String,
    #[serde(flatten)]
    pub stats: EnemyStats,
}

/// Container for enemy configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemiesConfig {
    #[serde(rename = "enemies")]
    pub enemies: Vec<EnemyConfig>,
}

/// Load enemy presets from a TOML file
pub fn load_enemy_configs(path: &Path) -> Result<HashMap<String, EnemyStats>, ConfigError> {
    let config: EnemiesConfig = super::load_toml(path)?;

    let mut map = HashMap::new();
    for entry in config.enemies {
        validate_enemy(&entry)?;
        map.insert(entry.id, entry.stats);
    }

    Ok(map)
}

/// Load enemy presets from a TOML string
pub fn parse_enemy_configs(content: &str) -> Result<HashMap<String, EnemyStats>, ConfigError> {
    let config: EnemiesConfig = super::parse_toml(content)?;

    let mut map = HashMap::new();
    for entry in config.enemies {
        validate_enemy(&entry)?;
        map.insert(entry.id, entry.stats);
    }

    Ok(map)
}

fn validate_enemy(entry: &EnemyConfig) -> Result<(), ConfigError> {
    if entry.stats.hp < 0.0 || entry.stats.defense < 0.0 {
        return Err(ConfigError::Validation(format!(
            "enemy '{}' has negative hp or defense",
            entry.id
        )));
    }
    Ok(())
}

/// Built-in practice targets
pub fn default_enemies() -> HashMap<String, EnemyStats> {
    let mut map = HashMap::new();

    map.insert(
        "training_dummy".to_string(),
        EnemyStats::new(60, 1_000_000.0, 600.0),
    );

    map.insert(
        "shielded_sentinel".to_string(),
        EnemyStats::new(70, 2_400_000.0, 800.0).with_shielded(true),
    );

    map.insert(
        "stunned_brute".to_string(),
        EnemyStats::new(60, 1_800_000.0, 700.0).with_stunned(true),
    );

    map
}
