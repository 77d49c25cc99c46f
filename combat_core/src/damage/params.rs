//! Skill damage parameters - what one hit scales off and how it lands

use crate::types::{DecayProfile, Element};
use serde::{Deserialize, Serialize};

/// Per-attribute damage ratios of one skill
///
/// Most skills scale off attack alone; defense and HP scalers exist for a
/// few kits, and sheer ratios drive penetration-flagged hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub sheer: f64,
}

impl RatioSet {
    /// Ratio set scaling off attack only (the common case)
    pub fn attack_only(ratio: f64) -> Self {
        RatioSet {
            attack: ratio,
            ..Default::default()
        }
    }

    /// Whether every component is zero
    pub fn is_zero(&self) -> bool {
        self.attack == 0.0 && self.defense == 0.0 && self.hp == 0.0 && self.sheer == 0.0
    }
}

/// One skill hit as the damage pipeline sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDamageParams {
    /// Skill name (for logs and result inspection)
    pub name: String,
    /// Damage element
    pub element: Element,
    /// Attribute ratios
    pub ratios: RatioSet,
    /// Penetration hits swap the defense zone for the penetration damage zone
    #[serde(default)]
    pub is_penetration: bool,
    /// Distance to the target in game units
    #[serde(default)]
    pub distance: f64,
    /// Falloff profile past close range
    #[serde(default)]
    pub decay_profile: DecayProfile,
    /// Anomaly buildup this hit applies before efficiency scaling
    #[serde(default)]
    pub anomaly_buildup: f64,
    /// Ratio of the bonus direct hit paid on anomaly trigger (0 = none)
    #[serde(default)]
    pub anomaly_attack_ratio: f64,
    /// Daze ratio of this hit
    #[serde(default)]
    pub stun_ratio: f64,
    /// Fraction of enemy defense this skill ignores outright
    #[serde(default)]
    pub ignore_defense_rate: f64,
}

impl SkillDamageParams {
    /// Create a skill from a single attack ratio (the backward-compatible
    /// constructor; the ratio lands on the attack component)
    pub fn new(name: &str, element: Element, attack_ratio: f64) -> Self {
        Self::with_ratios(name, element, RatioSet::attack_only(attack_ratio))
    }

    /// Create a skill with a full ratio set
    pub fn with_ratios(name: &str, element: Element, ratios: RatioSet) -> Self {
        SkillDamageParams {
            name: name.to_string(),
            element,
            ratios,
            is_penetration: false,
            distance: 0.0,
            decay_profile: DecayProfile::default(),
            anomaly_buildup: 0.0,
            anomaly_attack_ratio: 0.0,
            stun_ratio: 0.0,
            ignore_defense_rate: 0.0,
        }
    }

    /// Flag the skill as a penetration hit
    pub fn penetration(mut self) -> Self {
        self.is_penetration = true;
        self
    }

    /// Set the distance to the target
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the falloff profile
    pub fn with_decay_profile(mut self, profile: DecayProfile) -> Self {
        self.decay_profile = profile;
        self
    }

    /// Set the anomaly buildup applied per hit
    pub fn with_anomaly_buildup(mut self, buildup: f64) -> Self {
        self.anomaly_buildup = buildup;
        self
    }

    /// Set the anomaly-attack bonus hit ratio
    pub fn with_anomaly_attack_ratio(mut self, ratio: f64) -> Self {
        self.anomaly_attack_ratio = ratio;
        self
    }

    /// Set the daze ratio
    pub fn with_stun_ratio(mut self, ratio: f64) -> Self {
        self.stun_ratio = ratio;
        self
    }

    /// Set the defense-ignore fraction
    pub fn with_ignore_defense(mut self, rate: f64) -> Self {
        self.ignore_defense_rate = rate;
        self
    }
}
