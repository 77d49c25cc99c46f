//! Damage calculation - turning a snapshot + enemy + skill into a DamageResult

use super::collection::{DamageTriple, ZoneCollection};
use super::effect::AnomalyEffect;
use super::params::SkillDamageParams;
use super::result::DamageResult;
use crate::enemy::EnemyStats;
use crate::property::CombatStats;
use crate::zones;
use tracing::trace;

/// Evaluate one skill hit through the full zone pipeline
///
/// Returns every intermediate zone and the per-channel damage triples.
/// Pure except for trace events; enabling or disabling a subscriber never
/// changes control flow or values.
pub fn calculate_skill_damage(
    stats: &CombatStats,
    enemy: &EnemyStats,
    skill: &SkillDamageParams,
    anomaly: Option<&AnomalyEffect>,
) -> DamageResult {
    let mut result = ZoneCollection {
        skill_name: skill.name.clone(),
        element: Some(skill.element),
        ratios: skill.ratios,
        is_penetration: skill.is_penetration,
        ..Default::default()
    };

    // Step 1: resolved attributes
    result.final_attack = stats.final_attack();
    result.final_hp = stats.final_hp();
    result.final_defense = stats.final_defense();
    result.final_impact = stats.final_impact();
    result.sheer_force = stats.sheer_force();

    // Step 2: direct zones
    result.distance_zone = zones::distance_decay_zone(skill.distance, skill.decay_profile);
    result.dmg_bonus_zone = zones::dmg_bonus_zone(stats, skill.element);
    result.crit_zone = zones::crit_zone(stats.crit_damage, true);
    result.crit_expectation = zones::crit_expectation(stats.crit_rate, stats.crit_damage);
    result.defense_zone = zones::defense_zone(stats, enemy, skill.ignore_defense_rate);
    result.penetration_dmg_zone = zones::penetration_dmg_zone(stats.pen_damage_bonus);
    result.resistance_zone = zones::resistance_zone(enemy, skill.element);
    result.damage_taken_zone = zones::damage_taken_zone(enemy);
    result.stun_vulnerability_zone = zones::stun_vulnerability_zone(enemy);

    // Step 3: direct damage
    //
    // Penetration hits swap the defense zone for the penetration damage
    // zone; the two never apply together.
    let mitigation = if skill.is_penetration {
        result.penetration_dmg_zone
    } else {
        result.defense_zone
    };
    let shared = result.dmg_bonus_zone
        * mitigation
        * result.resistance_zone
        * result.damage_taken_zone
        * result.stun_vulnerability_zone
        * result.distance_zone;
    let scaled = result.final_attack * skill.ratios.attack
        + result.final_defense * skill.ratios.defense
        + result.final_hp * skill.ratios.hp
        + result.sheer_force * skill.ratios.sheer;
    result.direct =
        DamageTriple::from_base(scaled * shared, result.crit_zone, result.crit_expectation);

    // Step 4: anomaly channels
    if let Some(effect) = anomaly {
        result.anomaly_ratio = effect.total_ratio();
        result.anomaly_attack_ratio = skill.anomaly_attack_ratio;
        result.level_zone = zones::level_zone(stats.level);
        result.proficiency_factor = zones::proficiency_factor(stats.anomaly_proficiency);
        result.anomaly_crit_zone = zones::anomaly_crit_zone(stats.anomaly_crit_damage, true);
        result.anomaly_crit_expectation =
            zones::anomaly_crit_expectation(stats.anomaly_crit_rate, stats.anomaly_crit_damage);
        result.anomaly_dmg_bonus_zone = zones::anomaly_dmg_bonus_zone(stats.anomaly_damage_bonus);

        result.anomaly_buildup =
            zones::accumulated_buildup(skill.anomaly_buildup, stats, enemy, result.distance_zone);
        let threshold = enemy.anomaly_threshold(effect.element);
        result.trigger_expectation =
            zones::trigger_expectation(result.anomaly_buildup, threshold);

        if result.trigger_expectation > 0.0 {
            // Anomaly attacks reuse the direct mitigation stack (defense
            // zone, never the penetration swap) without distance falloff;
            // buildup already paid the falloff.
            let direct_mult = result.dmg_bonus_zone
                * result.defense_zone
                * result.resistance_zone
                * result.damage_taken_zone
                * result.stun_vulnerability_zone;

            if skill.anomaly_attack_ratio > 0.0 {
                let base = result.final_attack
                    * skill.anomaly_attack_ratio
                    * direct_mult
                    * result.trigger_expectation;
                // Bonus hit crits with the agent's ordinary crit stats
                result.anomaly_attack =
                    DamageTriple::from_base(base, result.crit_zone, result.crit_expectation);
            }

            let anomaly_mult =
                direct_mult * result.level_zone * result.anomaly_dmg_bonus_zone;
            let proficiency_base = result.final_attack
                * result.anomaly_ratio
                * result.proficiency_factor
                * anomaly_mult
                * result.trigger_expectation;
            result.proficiency = DamageTriple::from_base(
                proficiency_base,
                result.anomaly_crit_zone,
                result.anomaly_crit_expectation,
            );

            // Disorder pays out only when a different-element anomaly is
            // already ticking on the target
            if let Some(prior) = enemy.active_anomaly {
                if prior.element != effect.element {
                    result.disorder_ratio =
                        zones::disorder_ratio(prior.element, prior.remaining_duration);
                    let disorder_base = result.final_attack
                        * result.disorder_ratio
                        * result.proficiency_factor
                        * anomaly_mult
                        * result.trigger_expectation;
                    result.disorder = DamageTriple::from_base(
                        disorder_base,
                        result.anomaly_crit_zone,
                        result.anomaly_crit_expectation,
                    );
                }
            }
        }
    }

    // Step 5: totals and stun
    result.total = result
        .direct
        .plus(&result.anomaly_attack)
        .plus(&result.proficiency)
        .plus(&result.disorder);
    result.stun_value = zones::stun_value(stats, enemy, skill.stun_ratio, result.distance_zone);

    for (zone, value) in result.zone_entries() {
        trace!(skill = %result.skill_name, zone, value, "zone evaluated");
    }

    DamageResult::new(result)
}
