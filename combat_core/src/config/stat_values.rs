//! Stat unit value configuration loading

use super::ConfigError;
use crate::estimator::StatUnitValues;
use crate::types::PropertyType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Container for per-roll stat value overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatValuesConfig {
    #[serde(rename = "unit_values", default)]
    pub unit_values: BTreeMap<PropertyType, f64>,
}

/// Load stat unit values from a TOML file
///
/// File entries override the built-in per-roll values stat by stat.
pub fn load_stat_unit_values(path: &Path) -> Result<StatUnitValues, ConfigError> {
    let config: StatValuesConfig = super::load_toml(path)?;

    let mut units = StatUnitValues::default();
    for (stat, value) in config.unit_values {
        units.set_unit(stat, value);
    }

    Ok(units)
}

/// Load stat unit values from a TOML string
pub fn parse_stat_unit_values(content: &str) -> Result<StatUnitValues, ConfigError> {
    let config: StatValuesConfig = super::parse_toml(content)?;

    let mut units = StatUnitValues::default();
    for (stat, value) in config.unit_values {
        units.set_unit(stat, value);
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides_merge_with_defaults() {
        let toml = r#"
[unit_values]
attack_flat = 21.0
crit_rate = 0.03
"#;

        let units = parse_stat_unit_values(toml).unwrap();
        assert!((units.unit(PropertyType::AttackFlat) - 21.0).abs() < f64::EPSILON);
        assert!((units.unit(PropertyType::CritRate) - 0.03).abs() < f64::EPSILON);
        // Stats the file does not name keep their built-in values
        assert!((units.unit(PropertyType::HpFlat) - 112.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_file_gives_defaults() {
        let units = parse_stat_unit_values("").unwrap();
        assert!((units.unit(PropertyType::CritDamage) - 0.048).abs() < f64::EPSILON);
    }
}
