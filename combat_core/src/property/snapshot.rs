//! CombatStats - Resolved combat snapshot built from merged collections

use crate::buff::ConversionBuff;
use crate::property::PropertyCollection;
use crate::types::{Element, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of final attack counted toward sheer force
pub const SHEER_ATTACK_RATIO: f64 = 0.30;
/// Share of final HP counted toward sheer force
pub const SHEER_HP_RATIO: f64 = 0.10;

/// Resolved combat attributes for one evaluation
///
/// Built once from a list of PropertyCollections plus the character level and
/// treated as immutable afterward. The four primary attributes store their
/// layer-converted base (the pre-battle final value) alongside the in-battle
/// percent/flat deltas still to apply; every other attribute is already the
/// sum of both layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Character level
    pub level: u32,

    // === Primary attributes (converted base + in-battle deltas) ===
    pub base_attack: f64,
    pub attack_percent: f64,
    pub attack_flat: f64,
    pub base_hp: f64,
    pub hp_percent: f64,
    pub hp_flat: f64,
    pub base_defense: f64,
    pub defense_percent: f64,
    pub defense_flat: f64,
    pub base_impact: f64,
    pub impact_percent: f64,

    // === Crit ===
    pub crit_rate: f64,
    pub crit_damage: f64,

    // === Penetration & sheer ===
    pub pen_rate: f64,
    pub pen_flat: f64,
    pub pen_damage_bonus: f64,
    pub sheer_flat: f64,

    // === Damage bonuses ===
    pub damage_bonus: f64,
    pub element_damage_bonus: BTreeMap<Element, f64>,

    // === Anomaly ===
    pub anomaly_mastery: f64,
    pub anomaly_proficiency: f64,
    pub anomaly_buildup_rate: f64,
    pub anomaly_crit_rate: f64,
    pub anomaly_crit_damage: f64,
    pub anomaly_damage_bonus: f64,

    // === Other ===
    pub stun_bonus: f64,
    pub energy_regen_percent: f64,
    pub energy_regen_flat: f64,
}

impl CombatStats {
    /// Resolve merged collections into a combat snapshot
    ///
    /// For attack, HP, defense, and impact the pre-battle final value
    /// (base × (1 + pre %) + pre flat) becomes the in-battle base; in-battle
    /// percent/flat contributions stay pending until `final_attack()` and
    /// friends apply them. All remaining attributes sum across both layers.
    /// Pure: identical inputs always produce an identical snapshot.
    pub fn resolve(collections: &[PropertyCollection], level: u32) -> CombatStats {
        let merged = PropertyCollection::merge(collections);
        Self::from_merged(&merged, level)
    }

    /// Resolve with conversion modifiers applied on top
    ///
    /// Each conversion reads its source from the base snapshot (conversions
    /// never see each other's output) and deposits the capped bonus as an
    /// in-battle contribution, then the whole list is resolved again.
    pub fn resolve_with_conversions(
        collections: &[PropertyCollection],
        level: u32,
        conversions: &[ConversionBuff],
    ) -> CombatStats {
        if conversions.is_empty() {
            return Self::resolve(collections, level);
        }

        let base = Self::resolve(collections, level);
        let mut converted = PropertyCollection::new();
        for conversion in conversions {
            let source = base.conversion_source_value(conversion.source);
            converted.add_in_battle(conversion.target, conversion.converted_bonus(source));
        }

        let mut all = collections.to_vec();
        all.push(converted);
        Self::resolve(&all, level)
    }

    fn from_merged(merged: &PropertyCollection, level: u32) -> CombatStats {
        // Layer conversion: the pre-battle panel value becomes the in-battle
        // base. In-battle base contributions (rare) join the converted base.
        let convert = |base: PropertyType, percent: PropertyType, flat: f64| {
            merged.pre_battle(base) * (1.0 + merged.pre_battle(percent)) + flat
                + merged.in_battle(base)
        };

        let base_attack = convert(
            PropertyType::AttackBase,
            PropertyType::AttackPercent,
            merged.pre_battle(PropertyType::AttackFlat),
        );
        let base_hp = convert(
            PropertyType::HpBase,
            PropertyType::HpPercent,
            merged.pre_battle(PropertyType::HpFlat),
        );
        let base_defense = convert(
            PropertyType::DefenseBase,
            PropertyType::DefensePercent,
            merged.pre_battle(PropertyType::DefenseFlat),
        );
        let base_impact = convert(
            PropertyType::ImpactBase,
            PropertyType::ImpactPercent,
            0.0,
        );

        let mut element_damage_bonus = BTreeMap::new();
        for &element in Element::all() {
            let bonus = merged.total(element.damage_bonus());
            if bonus != 0.0 {
                element_damage_bonus.insert(element, bonus);
            }
        }

        CombatStats {
            level,
            base_attack,
            attack_percent: merged.in_battle(PropertyType::AttackPercent),
            attack_flat: merged.in_battle(PropertyType::AttackFlat),
            base_hp,
            hp_percent: merged.in_battle(PropertyType::HpPercent),
            hp_flat: merged.in_battle(PropertyType::HpFlat),
            base_defense,
            defense_percent: merged.in_battle(PropertyType::DefensePercent),
            defense_flat: merged.in_battle(PropertyType::DefenseFlat),
            base_impact,
            impact_percent: merged.in_battle(PropertyType::ImpactPercent),
            crit_rate: merged.total(PropertyType::CritRate),
            crit_damage: merged.total(PropertyType::CritDamage),
            pen_rate: merged.total(PropertyType::PenRate),
            pen_flat: merged.total(PropertyType::PenFlat),
            pen_damage_bonus: merged.total(PropertyType::PenDamageBonus),
            sheer_flat: merged.total(PropertyType::SheerForce),
            damage_bonus: merged.total(PropertyType::DamageBonus),
            element_damage_bonus,
            anomaly_mastery: merged.total(PropertyType::AnomalyMastery),
            anomaly_proficiency: merged.total(PropertyType::AnomalyProficiency),
            anomaly_buildup_rate: merged.total(PropertyType::AnomalyBuildupRate),
            anomaly_crit_rate: merged.total(PropertyType::AnomalyCritRate),
            anomaly_crit_damage: merged.total(PropertyType::AnomalyCritDamage),
            anomaly_damage_bonus: merged.total(PropertyType::AnomalyDamageBonus),
            stun_bonus: merged.total(PropertyType::StunBonus),
            energy_regen_percent: merged.total(PropertyType::EnergyRegenPercent),
            energy_regen_flat: merged.total(PropertyType::EnergyRegenFlat),
        }
    }

    /// Final attack: base × (1 + in-battle %) + in-battle flat
    pub fn final_attack(&self) -> f64 {
        self.base_attack * (1.0 + self.attack_percent) + self.attack_flat
    }

    /// Final HP: base × (1 + in-battle %) + in-battle flat
    pub fn final_hp(&self) -> f64 {
        self.base_hp * (1.0 + self.hp_percent) + self.hp_flat
    }

    /// Final defense: base × (1 + in-battle %) + in-battle flat
    pub fn final_defense(&self) -> f64 {
        self.base_defense * (1.0 + self.defense_percent) + self.defense_flat
    }

    /// Final impact: base × (1 + in-battle %); impact has no flat term
    pub fn final_impact(&self) -> f64 {
        self.base_impact * (1.0 + self.impact_percent)
    }

    /// Sheer force: 30% of final attack + 10% of final HP + flat sheer
    pub fn sheer_force(&self) -> f64 {
        self.final_attack() * SHEER_ATTACK_RATIO + self.final_hp() * SHEER_HP_RATIO
            + self.sheer_flat
    }

    /// Damage bonus for one element (0 if none recorded)
    pub fn element_damage_bonus(&self, element: Element) -> f64 {
        self.element_damage_bonus.get(&element).copied().unwrap_or(0.0)
    }

    /// Value a conversion modifier reads for its source property
    ///
    /// Primary-base variants read the fully resolved attribute (a conversion
    /// from "attack" means final attack, not the raw base); every other
    /// property reads its summed value.
    pub fn conversion_source_value(&self, prop: PropertyType) -> f64 {
        match prop {
            PropertyType::AttackBase => self.final_attack(),
            PropertyType::HpBase => self.final_hp(),
            PropertyType::DefenseBase => self.final_defense(),
            PropertyType::ImpactBase => self.final_impact(),
            other => self.raw_value(other),
        }
    }

    fn raw_value(&self, prop: PropertyType) -> f64 {
        match prop {
            PropertyType::AttackBase => self.base_attack,
            PropertyType::AttackPercent => self.attack_percent,
            PropertyType::AttackFlat => self.attack_flat,
            PropertyType::HpBase => self.base_hp,
            PropertyType::HpPercent => self.hp_percent,
            PropertyType::HpFlat => self.hp_flat,
            PropertyType::DefenseBase => self.base_defense,
            PropertyType::DefensePercent => self.defense_percent,
            PropertyType::DefenseFlat => self.defense_flat,
            PropertyType::ImpactBase => self.base_impact,
            PropertyType::ImpactPercent => self.impact_percent,
            PropertyType::CritRate => self.crit_rate,
            PropertyType::CritDamage => self.crit_damage,
            PropertyType::PenRate => self.pen_rate,
            PropertyType::PenFlat => self.pen_flat,
            PropertyType::PenDamageBonus => self.pen_damage_bonus,
            PropertyType::SheerForce => self.sheer_force(),
            PropertyType::DamageBonus => self.damage_bonus,
            PropertyType::PhysicalDamageBonus => self.element_damage_bonus(Element::Physical),
            PropertyType::FireDamageBonus => self.element_damage_bonus(Element::Fire),
            PropertyType::IceDamageBonus => self.element_damage_bonus(Element::Ice),
            PropertyType::ElectricDamageBonus => self.element_damage_bonus(Element::Electric),
            PropertyType::EtherDamageBonus => self.element_damage_bonus(Element::Ether),
            PropertyType::AnomalyMastery => self.anomaly_mastery,
            PropertyType::AnomalyProficiency => self.anomaly_proficiency,
            PropertyType::AnomalyBuildupRate => self.anomaly_buildup_rate,
            PropertyType::AnomalyCritRate => self.anomaly_crit_rate,
            PropertyType::AnomalyCritDamage => self.anomaly_crit_damage,
            PropertyType::AnomalyDamageBonus => self.anomaly_damage_bonus,
            PropertyType::StunBonus => self.stun_bonus,
            PropertyType::EnergyRegenPercent => self.energy_regen_percent,
            PropertyType::EnergyRegenFlat => self.energy_regen_flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_conversion() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::AttackBase, 1000.0)
            .with_pre_battle(PropertyType::AttackPercent, 0.10)
            .with_pre_battle(PropertyType::AttackFlat, 50.0)
            .with_in_battle(PropertyType::AttackPercent, 0.20)
            .with_in_battle(PropertyType::AttackFlat, 100.0);

        let stats = CombatStats::resolve(&[kit], 60);
        // Pre-battle final: 1000 × 1.10 + 50 = 1150 becomes the base
        assert!((stats.base_attack - 1150.0).abs() < f64::EPSILON);
        // In-battle: 1150 × 1.20 + 100 = 1480
        assert!((stats.final_attack() - 1480.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_impact_has_no_flat_term() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::ImpactBase, 100.0)
            .with_pre_battle(PropertyType::ImpactPercent, 0.10)
            .with_in_battle(PropertyType::ImpactPercent, 0.10);

        let stats = CombatStats::resolve(&[kit], 60);
        // 100 × 1.10 = 110 base, then × 1.10 in-battle = 121
        assert!((stats.base_impact - 110.0).abs() < f64::EPSILON);
        assert!((stats.final_impact() - 121.0).abs() < 1e-9);
    }

    #[test]
    fn test_secondaries_sum_across_layers() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::CritRate, 0.05)
            .with_in_battle(PropertyType::CritRate, 0.10)
            .with_pre_battle(PropertyType::AnomalyMastery, 90.0)
            .with_in_battle(PropertyType::AnomalyMastery, 30.0);

        let stats = CombatStats::resolve(&[kit], 60);
        assert!((stats.crit_rate - 0.15).abs() < f64::EPSILON);
        assert!((stats.anomaly_mastery - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sheer_force_composition() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::AttackBase, 1000.0)
            .with_pre_battle(PropertyType::HpBase, 5000.0)
            .with_pre_battle(PropertyType::SheerForce, 40.0);

        let stats = CombatStats::resolve(&[kit], 60);
        // 1000 × 0.30 + 5000 × 0.10 + 40 = 840
        assert!((stats.sheer_force() - 840.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_is_pure() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::AttackBase, 847.0)
            .with_in_battle(PropertyType::CritDamage, 0.72);

        let a = CombatStats::resolve(&[kit.clone()], 55);
        let b = CombatStats::resolve(&[kit], 55);
        assert_eq!(a, b);
    }

    #[test]
    fn test_conversion_reads_base_snapshot() {
        let kit = PropertyCollection::new()
            .with_pre_battle(PropertyType::ImpactBase, 100.0)
            .with_pre_battle(PropertyType::AttackBase, 1000.0);
        // 10% of final impact becomes flat attack, capped at 8
        let conversion = ConversionBuff::new(
            "impact_to_attack",
            PropertyType::ImpactBase,
            PropertyType::AttackFlat,
            0.10,
        )
        .with_cap(8.0);

        let stats = CombatStats::resolve_with_conversions(&[kit], 60, &[conversion]);
        // min(100 × 0.10, 8) = 8 flat attack in-battle
        assert!((stats.final_attack() - 1008.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversions_do_not_chain() {
        let kit = PropertyCollection::new().with_pre_battle(PropertyType::AttackBase, 1000.0);
        let a = ConversionBuff::new(
            "attack_to_prof",
            PropertyType::AttackBase,
            PropertyType::AnomalyProficiency,
            0.10,
        );
        let b = ConversionBuff::new(
            "prof_to_mastery",
            PropertyType::AnomalyProficiency,
            PropertyType::AnomalyMastery,
            1.0,
        );

        let stats = CombatStats::resolve_with_conversions(&[kit], 60, &[a, b]);
        assert!((stats.anomaly_proficiency - 100.0).abs() < f64::EPSILON);
        // b read proficiency before a's output landed
        assert!((stats.anomaly_mastery - 0.0).abs() < f64::EPSILON);
    }
}
