//! Stun (daze) value - how much stagger one hit inflicts

use super::constants::*;
use crate::enemy::EnemyStats;
use crate::property::CombatStats;

/// Stun resistance zone: clamp(1 − enemy stun resistance, 0, 2)
pub fn stun_resistance_zone(stun_resistance: f64) -> f64 {
    (1.0 - stun_resistance).clamp(STUN_RESISTANCE_ZONE_MIN, STUN_RESISTANCE_ZONE_MAX)
}

/// Stun bonus zone: clamp(1 + agent stun bonus, 0, 4)
pub fn stun_bonus_zone(stun_bonus: f64) -> f64 {
    (1.0 + stun_bonus).clamp(STUN_BONUS_ZONE_MIN, STUN_BONUS_ZONE_MAX)
}

/// Daze inflicted by one hit
///
/// final impact × skill stun ratio × resistance zone × bonus zone ×
/// distance decay.
pub fn stun_value(
    stats: &CombatStats,
    enemy: &EnemyStats,
    stun_ratio: f64,
    distance_zone: f64,
) -> f64 {
    stats.final_impact()
        * stun_ratio
        * stun_resistance_zone(enemy.stun_resistance)
        * stun_bonus_zone(stats.stun_bonus)
        * distance_zone
}
