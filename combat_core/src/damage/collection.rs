//! ZoneCollection - Scratch space for one damage evaluation

use super::params::RatioSet;
use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Non-crit / crit / expected damage for one channel
///
/// Final values are already rounded up to whole numbers; summing triples
/// therefore sums the rounded figures, matching how channel totals combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTriple {
    pub non_crit: f64,
    pub crit: f64,
    pub expected: f64,
}

impl DamageTriple {
    /// All-zero triple
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a triple from an uncrit base and the two crit multipliers,
    /// rounding each channel up to a whole number
    pub fn from_base(base: f64, crit_multiplier: f64, expectation: f64) -> Self {
        DamageTriple {
            non_crit: base.ceil(),
            crit: (base * crit_multiplier).ceil(),
            expected: (base * expectation).ceil(),
        }
    }

    /// Channel-wise sum
    pub fn plus(&self, other: &DamageTriple) -> DamageTriple {
        DamageTriple {
            non_crit: self.non_crit + other.non_crit,
            crit: self.crit + other.crit,
            expected: self.expected + other.expected,
        }
    }
}

/// Every intermediate value of one skill evaluation
///
/// Created fresh per evaluation and returned inside the DamageResult so a
/// caller (or a test) can inspect any stage. `zone_entries` exposes the
/// multiplicative stages as (name, value) pairs for structured tracing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneCollection {
    /// Skill that was evaluated
    pub skill_name: String,
    /// Element the hit carried
    pub element: Option<Element>,
    /// Ratio set the hit resolved to
    pub ratios: RatioSet,
    pub is_penetration: bool,

    // === Resolved attributes ===
    pub final_attack: f64,
    pub final_hp: f64,
    pub final_defense: f64,
    pub final_impact: f64,
    pub sheer_force: f64,

    // === Direct zones ===
    pub dmg_bonus_zone: f64,
    pub crit_zone: f64,
    pub crit_expectation: f64,
    pub defense_zone: f64,
    pub penetration_dmg_zone: f64,
    pub resistance_zone: f64,
    pub damage_taken_zone: f64,
    pub stun_vulnerability_zone: f64,
    pub distance_zone: f64,

    // === Anomaly zones ===
    pub anomaly_buildup: f64,
    pub trigger_expectation: f64,
    pub anomaly_ratio: f64,
    pub anomaly_attack_ratio: f64,
    pub proficiency_factor: f64,
    pub anomaly_crit_zone: f64,
    pub anomaly_crit_expectation: f64,
    pub anomaly_dmg_bonus_zone: f64,
    pub level_zone: f64,
    pub disorder_ratio: f64,

    // === Damage channels ===
    pub direct: DamageTriple,
    pub anomaly_attack: DamageTriple,
    pub proficiency: DamageTriple,
    pub disorder: DamageTriple,
    pub total: DamageTriple,

    /// Daze inflicted by the hit
    pub stun_value: f64,
}

impl ZoneCollection {
    /// The multiplicative zones as (name, value) pairs, in pipeline order
    pub fn zone_entries(&self) -> [(&'static str, f64); 14] {
        [
            ("dmg_bonus", self.dmg_bonus_zone),
            ("crit", self.crit_zone),
            ("crit_expectation", self.crit_expectation),
            ("defense", self.defense_zone),
            ("penetration_dmg", self.penetration_dmg_zone),
            ("resistance", self.resistance_zone),
            ("damage_taken", self.damage_taken_zone),
            ("stun_vulnerability", self.stun_vulnerability_zone),
            ("distance", self.distance_zone),
            ("trigger_expectation", self.trigger_expectation),
            ("proficiency_factor", self.proficiency_factor),
            ("anomaly_dmg_bonus", self.anomaly_dmg_bonus_zone),
            ("level", self.level_zone),
            ("disorder_ratio", self.disorder_ratio),
        ]
    }
}
