//! DamageResult - Structured output of one skill evaluation

use super::collection::{DamageTriple, ZoneCollection};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One sampled hit outcome drawn from a DamageResult
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RolledHit {
    /// Whether the direct hit rolled a crit
    pub is_crit: bool,
    /// Direct damage actually dealt by this roll
    pub direct_damage: f64,
    /// Whether the hit's buildup rolled an anomaly trigger
    pub anomaly_triggered: bool,
}

/// The outcome of one full pipeline evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Every zone and per-channel damage triple of the evaluation
    pub zones: ZoneCollection,
}

impl DamageResult {
    /// Wrap a finished zone collection
    pub fn new(zones: ZoneCollection) -> Self {
        DamageResult { zones }
    }

    /// Expected damage summed over all channels
    pub fn expected_total(&self) -> f64 {
        self.zones.total.expected
    }

    /// Total damage triple across channels
    pub fn total(&self) -> DamageTriple {
        self.zones.total
    }

    /// Expected direct-channel damage
    pub fn expected_direct(&self) -> f64 {
        self.zones.direct.expected
    }

    /// Expected anomaly damage (bonus attack + proficiency + disorder)
    pub fn expected_anomaly(&self) -> f64 {
        self.zones.anomaly_attack.expected
            + self.zones.proficiency.expected
            + self.zones.disorder.expected
    }

    /// Daze the hit inflicts
    pub fn stun_value(&self) -> f64 {
        self.zones.stun_value
    }

    /// Sample one concrete hit from the evaluation
    ///
    /// Rolls the direct hit's crit against the crit expectation's rate band
    /// and the anomaly trigger against the trigger expectation. The direct
    /// damage figure comes straight from the stored triple; anomaly channels
    /// stay expectations and are reported via the trigger flag.
    pub fn roll(&self, rng: &mut impl Rng) -> RolledHit {
        // crit_expectation = 1 + clamped_rate × crit_damage; recover the
        // clamped rate without re-clamping here
        let crit_rate = if self.zones.crit_zone > 1.0 {
            (self.zones.crit_expectation - 1.0) / (self.zones.crit_zone - 1.0)
        } else {
            0.0
        };
        let is_crit = rng.gen::<f64>() < crit_rate;
        let direct_damage = if is_crit {
            self.zones.direct.crit
        } else {
            self.zones.direct.non_crit
        };
        let anomaly_triggered = rng.gen::<f64>() < self.zones.trigger_expectation;

        RolledHit {
            is_crit,
            direct_damage,
            anomaly_triggered,
        }
    }
}
