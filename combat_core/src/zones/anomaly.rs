//! Anomaly zones - buildup, trigger expectation, and the anomaly-only
//! multiplier stages

use super::constants::*;
use crate::enemy::EnemyStats;
use crate::property::CombatStats;
use crate::types::Element;

/// Mastery factor: clamp(⌊mastery⌋ / 100, 0, 3)
///
/// Mastery contributes in whole points; partial points are dropped before
/// the division.
pub fn mastery_factor(anomaly_mastery: f64) -> f64 {
    (anomaly_mastery.floor() / 100.0).clamp(MASTERY_FACTOR_MIN, MASTERY_FACTOR_MAX)
}

/// Buildup accumulated by one hit
///
/// skill buildup × mastery factor × (1 + buildup efficiency) ×
/// (1 − enemy buildup resistance) × distance decay.
pub fn accumulated_buildup(
    skill_buildup: f64,
    stats: &CombatStats,
    enemy: &EnemyStats,
    distance_zone: f64,
) -> f64 {
    skill_buildup
        * mastery_factor(stats.anomaly_mastery)
        * (1.0 + stats.anomaly_buildup_rate)
        * (1.0 - enemy.anomaly_buildup_resistance)
        * distance_zone
}

/// Probability the hit triggers the anomaly: buildup / threshold, saturated
/// into [0, 1]; a non-positive threshold never triggers
pub fn trigger_expectation(accumulated: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (accumulated / threshold).clamp(0.0, 1.0)
}

/// Proficiency factor: clamp(proficiency / 100, 0, 10)
pub fn proficiency_factor(anomaly_proficiency: f64) -> f64 {
    (anomaly_proficiency / 100.0).clamp(PROFICIENCY_FACTOR_MIN, PROFICIENCY_FACTOR_MAX)
}

/// Anomaly crit zone for a resolved trigger: clamp(1 + anomaly crit damage,
/// 1, 3) on a crit, 1 otherwise
pub fn anomaly_crit_zone(anomaly_crit_damage: f64, is_crit: bool) -> f64 {
    if is_crit {
        (1.0 + anomaly_crit_damage).clamp(ANOMALY_CRIT_ZONE_MIN, ANOMALY_CRIT_ZONE_MAX)
    } else {
        1.0
    }
}

/// Expected-value anomaly crit multiplier
pub fn anomaly_crit_expectation(anomaly_crit_rate: f64, anomaly_crit_damage: f64) -> f64 {
    1.0 + anomaly_crit_rate.clamp(CRIT_RATE_MIN, CRIT_RATE_MAX) * anomaly_crit_damage
}

/// Anomaly damage bonus zone: clamp(1 + anomaly damage bonus, 0, 3)
pub fn anomaly_dmg_bonus_zone(anomaly_damage_bonus: f64) -> f64 {
    (1.0 + anomaly_damage_bonus).clamp(ANOMALY_DMG_ZONE_MIN, ANOMALY_DMG_ZONE_MAX)
}

/// Level zone shared by proficiency and disorder payouts
///
/// 1 + (level − 1)/59, floored to 4 decimal digits so fixture values
/// reproduce exactly.
pub fn level_zone(level: u32) -> f64 {
    let raw = 1.0 + (level.max(1) - 1) as f64 / 59.0;
    (raw * LEVEL_ZONE_SCALE).floor() / LEVEL_ZONE_SCALE
}

/// Disorder ratio: 450% plus a per-element increment for each whole tick
/// unit left on the interrupted anomaly
pub fn disorder_ratio(element: Element, remaining_duration: f64) -> f64 {
    let remaining = remaining_duration.max(0.0);
    let increment = match element {
        Element::Fire => (remaining / 0.5).floor() * 0.50,
        Element::Electric => remaining.floor() * 1.25,
        Element::Ether => (remaining / 0.5).floor() * 0.625,
        Element::Ice => remaining.floor() * 0.075,
        Element::Physical => remaining.floor() * 0.075,
    };
    DISORDER_BASE_RATIO + increment
}
