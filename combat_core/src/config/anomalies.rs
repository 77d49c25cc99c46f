//! Anomaly effect configuration loading

use super::ConfigError;
use crate::damage::{AnomalyEffect, AnomalyRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for anomaly effect configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomaliesConfig {
    #[serde(rename = "anomaly_effects")]
    pub anomaly_effects: Vec<AnomalyEffect>,
}

/// Load anomaly effects from a TOML file
///
/// File entries land on top of the standard set, overriding same-name
/// effects and leaving the rest in place.
pub fn load_anomaly_configs(path: &Path) -> Result<AnomalyRegistry, ConfigError> {
    let config: AnomaliesConfig = super::load_toml(path)?;

    let mut registry = AnomalyRegistry::with_defaults();
    for effect in config.anomaly_effects {
        registry.register(effect);
    }

    Ok(registry)
}

/// Load anomaly effects from a TOML string
pub fn parse_anomaly_configs(content: &str) -> Result<AnomalyRegistry, ConfigError> {
    let config: AnomaliesConfig = super::parse_toml(content)?;

    let mut registry = AnomalyRegistry::with_defaults();
    for effect in config.anomaly_effects {
        registry.register(effect);
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;

    #[test]
    fn test_parse_anomalies() {
        let toml = r#"
[[anomaly_effects]]
name = "frostbite"
element = "ice"
ratio = 1.5
tick_interval = 2.0
duration = 8.0

[[anomaly_effects]]
name = "burn"
element = "fire"
ratio = 0.75
tick_interval = 0.5
duration = 10.0
"#;

        let registry = parse_anomaly_configs(toml).unwrap();

        // Custom effect registered, 4 ticks × 1.5
        let frostbite = registry.get("frostbite").unwrap();
        assert_eq!(frostbite.element, Element::Ice);
        assert!((frostbite.total_ratio() - 6.0).abs() < f64::EPSILON);

        // File entry overrides the standard burn
        let burn = registry.get("burn").unwrap();
        assert!((burn.ratio - 0.75).abs() < f64::EPSILON);

        // The untouched standard effects are still there
        assert!(registry.get("shock").is_some());
        assert!(registry.get("assault").is_some());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_parse_one_shot_defaults() {
        let toml = r#"
[[anomaly_effects]]
name = "rupture"
element = "physical"
ratio = 3.0
"#;

        let registry = parse_anomaly_configs(toml).unwrap();
        let rupture = registry.get("rupture").unwrap();
        assert!((rupture.tick_interval - 0.0).abs() < f64::EPSILON);
        assert!((rupture.total_ratio() - 3.0).abs() < f64::EPSILON);
    }
}
