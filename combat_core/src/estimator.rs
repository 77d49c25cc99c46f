//! Estimator - Marginal damage value per attribute, used to rank equipment

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::damage::DamageResult;
use crate::enemy::EnemyStats;
use crate::equipment::DriveDisk;
use crate::property::{CombatStats, PropertyCollection};
use crate::types::PropertyType;
use crate::zones::constants::{DMG_BONUS_ZONE_MAX, DMG_BONUS_ZONE_MIN};
use crate::zones::proficiency_factor;

/// A main stat counts as this many sub-stat rolls when scoring a disk
pub const MAIN_STAT_MULTIPLIER: f64 = 10.0;

/// How expected damage splits between the direct and anomaly channels
///
/// The weights scale with these shares, so an anomaly-leaning agent ranks
/// proficiency rolls above crit rolls and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageShares {
    /// Fraction of expected damage dealt by the direct channel
    pub direct: f64,
    /// Fraction dealt by anomaly attacks, proficiency ticks, and disorder
    pub anomaly: f64,
}

impl DamageShares {
    pub fn new(direct: f64, anomaly: f64) -> Self {
        DamageShares { direct, anomaly }
    }

    /// All damage on the direct channel
    pub fn direct_only() -> Self {
        DamageShares {
            direct: 1.0,
            anomaly: 0.0,
        }
    }

    /// Split observed in an evaluated damage result
    pub fn from_result(result: &DamageResult) -> Self {
        let total = result.expected_total();
        if total <= 0.0 {
            return Self::direct_only();
        }
        DamageShares {
            direct: result.expected_direct() / total,
            anomaly: result.expected_anomaly() / total,
        }
    }
}

/// First-derivative contribution of each attribute to expected damage
///
/// Weights are ranking values, not damage numbers. Attributes with no
/// damage contribution (HP, defense, impact, energy) weigh zero; conversion
/// modifiers that feed off them are applied during resolution, upstream of
/// this estimate.
pub fn compute_marginal_weights(
    shares: &DamageShares,
    stats: &CombatStats,
    enemy: &EnemyStats,
) -> BTreeMap<PropertyType, f64> {
    let mut weights = BTreeMap::new();

    // Generic bonus zone, without any element-specific part
    let dmg_bonus_zone = (1.0 + stats.damage_bonus).clamp(DMG_BONUS_ZONE_MIN, DMG_BONUS_ZONE_MAX);

    // === Direct channel ===

    // d(crit expectation)/d(rate) = crit damage, d/d(damage) = clamped rate
    weights.insert(PropertyType::CritRate, stats.crit_damage * shares.direct);
    weights.insert(
        PropertyType::CritDamage,
        stats.crit_rate.clamp(0.0, 1.0) * shares.direct,
    );

    // Bonus zones stack additively, so every point lands 1:1
    weights.insert(PropertyType::DamageBonus, shares.direct);
    weights.insert(PropertyType::PhysicalDamageBonus, shares.direct);
    weights.insert(PropertyType::FireDamageBonus, shares.direct);
    weights.insert(PropertyType::IceDamageBonus, shares.direct);
    weights.insert(PropertyType::ElectricDamageBonus, shares.direct);
    weights.insert(PropertyType::EtherDamageBonus, shares.direct);

    // d(damage)/d(attack%) = base attack × bonus zone
    let attack_percent_weight = if stats.base_attack > 0.0 {
        stats.base_attack * dmg_bonus_zone * shares.direct
    } else {
        0.0
    };
    weights.insert(PropertyType::AttackPercent, attack_percent_weight);
    weights.insert(PropertyType::AttackFlat, dmg_bonus_zone * shares.direct);

    // === Anomaly channel ===

    let prof_factor = proficiency_factor(stats.anomaly_proficiency);
    weights.insert(
        PropertyType::AnomalyProficiency,
        prof_factor * shares.anomaly,
    );
    weights.insert(PropertyType::AnomalyMastery, prof_factor * shares.anomaly);

    // === Shared mitigation ===

    // d(defense zone)/d(pen rate) = defense × coefficient / (coefficient + effective)²
    let pen_rate_weight = if enemy.defense > 0.0 {
        let coefficient = enemy.level_coefficient();
        let effective = enemy.defense * (1.0 - stats.pen_rate);
        enemy.defense * coefficient / (coefficient + effective).powi(2)
            * (shares.direct + shares.anomaly)
    } else {
        0.0
    };
    weights.insert(PropertyType::PenRate, pen_rate_weight);

    // === No damage contribution ===

    weights.insert(PropertyType::HpFlat, 0.0);
    weights.insert(PropertyType::HpPercent, 0.0);
    weights.insert(PropertyType::DefenseFlat, 0.0);
    weights.insert(PropertyType::DefensePercent, 0.0);
    weights.insert(PropertyType::PenFlat, 0.0);
    weights.insert(PropertyType::ImpactPercent, 0.0);
    weights.insert(PropertyType::EnergyRegenPercent, 0.0);

    weights
}

/// Per-roll value of each stat a disk can carry, used to turn marginal
/// weights into a disk score
///
/// Defaults match standard S-rank rolls; a TOML config can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatUnitValues {
    #[serde(default = "default_unit_values")]
    values: BTreeMap<PropertyType, f64>,
}

fn default_unit_values() -> BTreeMap<PropertyType, f64> {
    let mut values = BTreeMap::new();
    values.insert(PropertyType::AttackFlat, 19.0);
    values.insert(PropertyType::HpFlat, 112.0);
    values.insert(PropertyType::DefenseFlat, 15.0);
    values.insert(PropertyType::PenFlat, 9.0);
    values.insert(PropertyType::AnomalyProficiency, 9.2);
    values.insert(PropertyType::AnomalyMastery, 9.0);
    values.insert(PropertyType::AttackPercent, 0.030);
    values.insert(PropertyType::HpPercent, 0.030);
    values.insert(PropertyType::DefensePercent, 0.048);
    values.insert(PropertyType::CritRate, 0.024);
    values.insert(PropertyType::CritDamage, 0.048);
    values.insert(PropertyType::PenRate, 0.024);
    values.insert(PropertyType::ImpactPercent, 0.018);
    values.insert(PropertyType::EnergyRegenPercent, 0.060);
    values.insert(PropertyType::DamageBonus, 0.030);
    values.insert(PropertyType::PhysicalDamageBonus, 0.030);
    values.insert(PropertyType::FireDamageBonus, 0.030);
    values.insert(PropertyType::IceDamageBonus, 0.030);
    values.insert(PropertyType::ElectricDamageBonus, 0.030);
    values.insert(PropertyType::EtherDamageBonus, 0.030);
    values
}

impl Default for StatUnitValues {
    fn default() -> Self {
        StatUnitValues {
            values: default_unit_values(),
        }
    }
}

impl StatUnitValues {
    /// Per-roll value for a stat, zero when the stat has none
    pub fn unit(&self, stat: PropertyType) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    /// Override the per-roll value for a stat
    pub fn set_unit(&mut self, stat: PropertyType, value: f64) {
        self.values.insert(stat, value);
    }
}

/// Score a candidate's attribute contribution in marginal-value terms
///
/// Score = Σ weight[prop] × contribution[prop] across both layers. The
/// optimizer ranks gear candidates with this before enumerating.
pub fn score_collection(
    collection: &PropertyCollection,
    weights: &BTreeMap<PropertyType, f64>,
) -> f64 {
    let weight_of = |stat: PropertyType| weights.get(&stat).copied().unwrap_or(0.0);

    let mut score = 0.0;
    for (stat, value) in collection.iter_pre_battle() {
        score += weight_of(stat) * value;
    }
    for (stat, value) in collection.iter_in_battle() {
        score += weight_of(stat) * value;
    }
    score
}

/// Score a disk by roll counts instead of current values
///
/// The main stat counts as MAIN_STAT_MULTIPLIER rolls; each sub-stat counts
/// its roll count. Score = Σ weight × unit value × rolls. Useful for
/// judging an unenhanced disk's ceiling, since enhancement level drops out.
pub fn score_disk_rolls(
    disk: &DriveDisk,
    weights: &BTreeMap<PropertyType, f64>,
    units: &StatUnitValues,
) -> f64 {
    let weight_of = |stat: PropertyType| weights.get(&stat).copied().unwrap_or(0.0);

    let mut score = weight_of(disk.main_stat) * units.unit(disk.main_stat) * MAIN_STAT_MULTIPLIER;
    for sub in &disk.sub_stats {
        score += weight_of(sub.stat) * units.unit(sub.stat) * sub.rolls as f64;
    }
    score
}
