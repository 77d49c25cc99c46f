//! Skill configuration loading

use super::ConfigError;
use crate::damage::SkillDamageParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<SkillDamageParams>,
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, SkillDamageParams>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;

    let mut map = HashMap::new();
    for skill in config.skills {
        map.insert(skill.name.clone(), skill);
    }

    Ok(map)
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(
    content: &str,
) -> Result<HashMap<String, SkillDamageParams>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;

    let mut map = HashMap::new();
    for skill in config.skills {
        map.insert(skill.name.clone(), skill);
    }

    Ok(map)
}
