//! EnemyStats - Target-side attributes and derived defense quantities

use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Level coefficient at enemy level 1 and below
pub const LEVEL_COEFFICIENT_MIN: f64 = 50.0;
/// Level coefficient at enemy level 60 and above
pub const LEVEL_COEFFICIENT_MAX: f64 = 794.0;
/// Defense multiplier while a shield is up
pub const SHIELDED_DEFENSE_FACTOR: f64 = 2.0;
/// Threshold returned for an element missing from the threshold map
pub const FALLBACK_ANOMALY_THRESHOLD: f64 = 3000.0;

fn default_anomaly_thresholds() -> BTreeMap<Element, f64> {
    let mut thresholds = BTreeMap::new();
    thresholds.insert(Element::Ice, 600.0);
    thresholds.insert(Element::Fire, 600.0);
    thresholds.insert(Element::Electric, 600.0);
    thresholds.insert(Element::Ether, 600.0);
    thresholds.insert(Element::Physical, 720.0);
    thresholds
}

fn default_stun_vulnerability() -> f64 {
    0.5
}

fn default_level() -> u32 {
    60
}

/// An anomaly currently ticking on the enemy
///
/// A new trigger of a different element consumes it for disorder damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveAnomaly {
    pub element: Element,
    /// Seconds left before the anomaly expires
    pub remaining_duration: f64,
}

/// Attributes of the target under attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Enemy level (drives the defense level coefficient)
    #[serde(default = "default_level")]
    pub level: u32,
    pub hp: f64,
    pub defense: f64,
    /// Per-element damage resistance as a fraction (0.2 = 20% resist,
    /// negative = weakness)
    #[serde(default)]
    pub resistances: BTreeMap<Element, f64>,
    /// Per-element anomaly buildup thresholds
    #[serde(default = "default_anomaly_thresholds")]
    pub anomaly_thresholds: BTreeMap<Element, f64>,
    /// Anomaly buildup resistance as a fraction
    #[serde(default)]
    pub anomaly_buildup_resistance: f64,
    /// Daze required to stun
    #[serde(default)]
    pub stun_ceiling: f64,
    /// Extra damage taken while stunned
    #[serde(default = "default_stun_vulnerability")]
    pub stun_vulnerability: f64,
    /// Resistance to incoming stun (daze) value
    #[serde(default)]
    pub stun_resistance: f64,
    /// Whether the enemy is currently stunned
    #[serde(default)]
    pub stunned: bool,
    /// Additive damage-taken modifier (0 = neutral)
    #[serde(default)]
    pub damage_taken: f64,
    /// Whether a shield currently doubles effective defense
    #[serde(default)]
    pub shielded: bool,
    /// Anomaly currently ticking on the enemy, if any
    #[serde(default)]
    pub active_anomaly: Option<ActiveAnomaly>,
}

impl Default for EnemyStats {
    fn default() -> Self {
        EnemyStats {
            level: default_level(),
            hp: 0.0,
            defense: 0.0,
            resistances: BTreeMap::new(),
            anomaly_thresholds: default_anomaly_thresholds(),
            anomaly_buildup_resistance: 0.0,
            stun_ceiling: 0.0,
            stun_vulnerability: default_stun_vulnerability(),
            stun_resistance: 0.0,
            stunned: false,
            damage_taken: 0.0,
            shielded: false,
            active_anomaly: None,
        }
    }
}

impl EnemyStats {
    /// Create an enemy with explicit level, HP, and defense
    pub fn new(level: u32, hp: f64, defense: f64) -> Self {
        EnemyStats {
            level,
            hp,
            defense,
            ..Default::default()
        }
    }

    /// Set one element's resistance
    pub fn with_resistance(mut self, element: Element, value: f64) -> Self {
        self.resistances.insert(element, value);
        self
    }

    /// Set one element's anomaly threshold
    pub fn with_anomaly_threshold(mut self, element: Element, value: f64) -> Self {
        self.anomaly_thresholds.insert(element, value);
        self
    }

    /// Set the stunned flag
    pub fn with_stunned(mut self, stunned: bool) -> Self {
        self.stunned = stunned;
        self
    }

    /// Set the shielded flag
    pub fn with_shielded(mut self, shielded: bool) -> Self {
        self.shielded = shielded;
        self
    }

    /// Set the additive damage-taken modifier
    pub fn with_damage_taken(mut self, modifier: f64) -> Self {
        self.damage_taken = modifier;
        self
    }

    /// Set the anomaly currently ticking on the enemy
    pub fn with_active_anomaly(mut self, element: Element, remaining_duration: f64) -> Self {
        self.active_anomaly = Some(ActiveAnomaly {
            element,
            remaining_duration,
        });
        self
    }

    /// Resistance against one element (0 if unlisted)
    pub fn resistance(&self, element: Element) -> f64 {
        self.resistances.get(&element).copied().unwrap_or(0.0)
    }

    /// Anomaly buildup threshold for one element
    pub fn anomaly_threshold(&self, element: Element) -> f64 {
        self.anomaly_thresholds
            .get(&element)
            .copied()
            .unwrap_or(FALLBACK_ANOMALY_THRESHOLD)
    }

    /// Defense level coefficient
    ///
    /// 50 at level 1, 794 at level 60, linear between, flat outside.
    pub fn level_coefficient(&self) -> f64 {
        if self.level <= 1 {
            LEVEL_COEFFICIENT_MIN
        } else if self.level >= 60 {
            LEVEL_COEFFICIENT_MAX
        } else {
            LEVEL_COEFFICIENT_MIN
                + (LEVEL_COEFFICIENT_MAX - LEVEL_COEFFICIENT_MIN) * (self.level - 1) as f64 / 59.0
        }
    }

    /// Defense remaining after shields, penetration, and defense-ignore
    ///
    /// defense × (2 if shielded) × (1 − ignore_rate) × (1 − pen_rate) − pen_flat,
    /// floored at 0.
    pub fn effective_defense(&self, pen_rate: f64, pen_flat: f64, ignore_defense_rate: f64) -> f64 {
        let shield_factor = if self.shielded {
            SHIELDED_DEFENSE_FACTOR
        } else {
            1.0
        };
        let remaining =
            self.defense * shield_factor * (1.0 - ignore_defense_rate) * (1.0 - pen_rate)
                - pen_flat;
        remaining.max(0.0)
    }
}
