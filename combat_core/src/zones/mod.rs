//! Damage zones - the multiplicative stages of the damage formula

mod anomaly;
mod direct;
mod stun;

pub use anomaly::{
    accumulated_buildup, anomaly_crit_expectation, anomaly_crit_zone, anomaly_dmg_bonus_zone,
    disorder_ratio, level_zone, mastery_factor, proficiency_factor, trigger_expectation,
};
pub use direct::{
    crit_expectation, crit_zone, damage_taken_zone, defense_zone, distance_decay_zone,
    dmg_bonus_zone, penetration_dmg_zone, resistance_zone, stun_vulnerability_zone,
};
pub use stun::{stun_bonus_zone, stun_resistance_zone, stun_value};

/// Clamp bounds used by the zone formulas
pub mod constants {
    /// Lower bound of the damage bonus zone
    pub const DMG_BONUS_ZONE_MIN: f64 = 0.0;
    /// Upper bound of the damage bonus zone
    pub const DMG_BONUS_ZONE_MAX: f64 = 6.0;
    /// Lower bound of crit rate as a probability
    pub const CRIT_RATE_MIN: f64 = 0.0;
    /// Upper bound of crit rate as a probability
    pub const CRIT_RATE_MAX: f64 = 1.0;
    /// Lower bound of the resistance zone (150%+ resist nullifies)
    pub const RESISTANCE_ZONE_MIN: f64 = 0.0;
    /// Upper bound of the resistance zone (weakness caps at double)
    pub const RESISTANCE_ZONE_MAX: f64 = 2.0;
    /// Lower bound of the stun vulnerability zone
    pub const STUN_VULNERABILITY_ZONE_MIN: f64 = 0.2;
    /// Upper bound of the stun vulnerability zone
    pub const STUN_VULNERABILITY_ZONE_MAX: f64 = 5.0;
    /// Lower bound of the penetration damage zone
    pub const PEN_DMG_ZONE_MIN: f64 = 0.2;
    /// Upper bound of the penetration damage zone
    pub const PEN_DMG_ZONE_MAX: f64 = 9.0;
    /// Lower bound of the anomaly mastery factor
    pub const MASTERY_FACTOR_MIN: f64 = 0.0;
    /// Upper bound of the anomaly mastery factor
    pub const MASTERY_FACTOR_MAX: f64 = 3.0;
    /// Lower bound of the anomaly proficiency factor
    pub const PROFICIENCY_FACTOR_MIN: f64 = 0.0;
    /// Upper bound of the anomaly proficiency factor
    pub const PROFICIENCY_FACTOR_MAX: f64 = 10.0;
    /// Lower bound of the anomaly damage bonus zone
    pub const ANOMALY_DMG_ZONE_MIN: f64 = 0.0;
    /// Upper bound of the anomaly damage bonus zone
    pub const ANOMALY_DMG_ZONE_MAX: f64 = 3.0;
    /// Lower bound of the anomaly crit zone
    pub const ANOMALY_CRIT_ZONE_MIN: f64 = 1.0;
    /// Upper bound of the anomaly crit zone
    pub const ANOMALY_CRIT_ZONE_MAX: f64 = 3.0;
    /// Lower bound of the stun resistance zone
    pub const STUN_RESISTANCE_ZONE_MIN: f64 = 0.0;
    /// Upper bound of the stun resistance zone
    pub const STUN_RESISTANCE_ZONE_MAX: f64 = 2.0;
    /// Lower bound of the stun bonus zone
    pub const STUN_BONUS_ZONE_MIN: f64 = 0.0;
    /// Upper bound of the stun bonus zone
    pub const STUN_BONUS_ZONE_MAX: f64 = 4.0;
    /// Distance within which no falloff applies
    pub const CLOSE_RANGE: f64 = 15.0;
    /// Width of each falloff step past close range
    pub const DECAY_STEP_LENGTH: f64 = 5.0;
    /// Per-step falloff factor of the standard profile
    pub const DECAY_FACTOR: f64 = 0.75;
    /// Flat falloff factor of the grace profile
    pub const GRACE_DECAY_FACTOR: f64 = 0.7;
    /// Base disorder ratio before the duration-scaled increment
    pub const DISORDER_BASE_RATIO: f64 = 4.5;
    /// Decimal precision (as a scale) the level zone is floored to
    pub const LEVEL_ZONE_SCALE: f64 = 10000.0;
}
