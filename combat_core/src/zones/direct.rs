//! Direct damage zones - each function computes one multiplicative stage

use super::constants::*;
use crate::enemy::EnemyStats;
use crate::property::CombatStats;
use crate::types::{DecayProfile, Element};

/// Damage bonus zone: clamp(1 + generic bonus + element bonus, 0, 6)
pub fn dmg_bonus_zone(stats: &CombatStats, element: Element) -> f64 {
    let bonus = 1.0 + stats.damage_bonus + stats.element_damage_bonus(element);
    bonus.clamp(DMG_BONUS_ZONE_MIN, DMG_BONUS_ZONE_MAX)
}

/// Crit zone for a resolved hit: 1 + crit damage on a crit, 1 otherwise
pub fn crit_zone(crit_damage: f64, is_crit: bool) -> f64 {
    if is_crit {
        1.0 + crit_damage
    } else {
        1.0
    }
}

/// Expected-value crit multiplier: 1 + clamp(rate, 0, 1) × crit damage
pub fn crit_expectation(crit_rate: f64, crit_damage: f64) -> f64 {
    1.0 + crit_rate.clamp(CRIT_RATE_MIN, CRIT_RATE_MAX) * crit_damage
}

/// Defense zone: level_coefficient / (effective_defense + level_coefficient)
///
/// Monotonically decreasing in enemy defense, increasing in penetration;
/// always in (0, 1] because effective defense is floored at zero.
pub fn defense_zone(stats: &CombatStats, enemy: &EnemyStats, ignore_defense_rate: f64) -> f64 {
    let coefficient = enemy.level_coefficient();
    let effective = enemy.effective_defense(stats.pen_rate, stats.pen_flat, ignore_defense_rate);
    coefficient / (effective + coefficient)
}

/// Resistance zone: clamp(1 − enemy resistance, 0, 2)
pub fn resistance_zone(enemy: &EnemyStats, element: Element) -> f64 {
    (1.0 - enemy.resistance(element)).clamp(RESISTANCE_ZONE_MIN, RESISTANCE_ZONE_MAX)
}

/// Damage taken zone: 1 + the enemy's additive damage-taken modifier
pub fn damage_taken_zone(enemy: &EnemyStats) -> f64 {
    1.0 + enemy.damage_taken
}

/// Stun vulnerability zone: clamp(1 + vulnerability, 0.2, 5) while stunned,
/// 1 otherwise
pub fn stun_vulnerability_zone(enemy: &EnemyStats) -> f64 {
    if !enemy.stunned {
        return 1.0;
    }
    (1.0 + enemy.stun_vulnerability)
        .clamp(STUN_VULNERABILITY_ZONE_MIN, STUN_VULNERABILITY_ZONE_MAX)
}

/// Penetration damage zone: clamp(1 + pen damage bonus, 0.2, 9)
///
/// Replaces the defense zone for penetration-flagged skills.
pub fn penetration_dmg_zone(pen_damage_bonus: f64) -> f64 {
    (1.0 + pen_damage_bonus).clamp(PEN_DMG_ZONE_MIN, PEN_DMG_ZONE_MAX)
}

/// Distance decay zone
///
/// 1 within close range. Past it, the grace profile pays a flat 0.7; the
/// standard profile pays 0.75^(1 + full 5-unit steps past the band).
pub fn distance_decay_zone(distance: f64, profile: DecayProfile) -> f64 {
    if distance <= CLOSE_RANGE {
        return 1.0;
    }
    match profile {
        DecayProfile::Grace => GRACE_DECAY_FACTOR,
        DecayProfile::Standard => {
            let steps = ((distance - CLOSE_RANGE) / DECAY_STEP_LENGTH).floor();
            DECAY_FACTOR.powf(1.0 + steps)
        }
    }
}
