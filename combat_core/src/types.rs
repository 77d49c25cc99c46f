//! Core types shared across the combat library

use serde::{Deserialize, Serialize};

/// Attribute kinds tracked by property collections
///
/// Percentage variants are always stored as fractions (0.05 = 5%), never as
/// display numbers. The four primary attributes (attack, HP, defense, impact)
/// carry separate base/percent/flat variants because pre-battle and in-battle
/// contributions resolve through different layers; everything else is a plain
/// additive total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    // Primary attributes (layered base/percent/flat)
    AttackBase,
    AttackPercent,
    AttackFlat,
    HpBase,
    HpPercent,
    HpFlat,
    DefenseBase,
    DefensePercent,
    DefenseFlat,
    ImpactBase,
    ImpactPercent,
    // Crit
    CritRate,
    CritDamage,
    // Penetration
    PenRate,
    PenFlat,
    PenDamageBonus,
    /// Flat sheer force on top of the attack/HP-derived portion
    SheerForce,
    // Damage bonuses
    DamageBonus,
    PhysicalDamageBonus,
    FireDamageBonus,
    IceDamageBonus,
    ElectricDamageBonus,
    EtherDamageBonus,
    // Anomaly
    AnomalyMastery,
    AnomalyProficiency,
    /// Anomaly buildup efficiency bonus
    AnomalyBuildupRate,
    AnomalyCritRate,
    AnomalyCritDamage,
    AnomalyDamageBonus,
    /// Bonus to stun (daze) value inflicted
    StunBonus,
    // Energy
    EnergyRegenPercent,
    EnergyRegenFlat,
}

impl PropertyType {
    /// Get all property types
    pub fn all() -> &'static [PropertyType] {
        &[
            PropertyType::AttackBase,
            PropertyType::AttackPercent,
            PropertyType::AttackFlat,
            PropertyType::HpBase,
            PropertyType::HpPercent,
            PropertyType::HpFlat,
            PropertyType::DefenseBase,
            PropertyType::DefensePercent,
            PropertyType::DefenseFlat,
            PropertyType::ImpactBase,
            PropertyType::ImpactPercent,
            PropertyType::CritRate,
            PropertyType::CritDamage,
            PropertyType::PenRate,
            PropertyType::PenFlat,
            PropertyType::PenDamageBonus,
            PropertyType::SheerForce,
            PropertyType::DamageBonus,
            PropertyType::PhysicalDamageBonus,
            PropertyType::FireDamageBonus,
            PropertyType::IceDamageBonus,
            PropertyType::ElectricDamageBonus,
            PropertyType::EtherDamageBonus,
            PropertyType::AnomalyMastery,
            PropertyType::AnomalyProficiency,
            PropertyType::AnomalyBuildupRate,
            PropertyType::AnomalyCritRate,
            PropertyType::AnomalyCritDamage,
            PropertyType::AnomalyDamageBonus,
            PropertyType::StunBonus,
            PropertyType::EnergyRegenPercent,
            PropertyType::EnergyRegenFlat,
        ]
    }

    /// Whether this property is a percentage (stored as a fraction)
    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            PropertyType::AttackPercent
                | PropertyType::HpPercent
                | PropertyType::DefensePercent
                | PropertyType::ImpactPercent
                | PropertyType::CritRate
                | PropertyType::CritDamage
                | PropertyType::PenRate
                | PropertyType::PenDamageBonus
                | PropertyType::DamageBonus
                | PropertyType::PhysicalDamageBonus
                | PropertyType::FireDamageBonus
                | PropertyType::IceDamageBonus
                | PropertyType::ElectricDamageBonus
                | PropertyType::EtherDamageBonus
                | PropertyType::AnomalyBuildupRate
                | PropertyType::AnomalyCritRate
                | PropertyType::AnomalyCritDamage
                | PropertyType::AnomalyDamageBonus
                | PropertyType::StunBonus
                | PropertyType::EnergyRegenPercent
        )
    }
}

/// Damage element of a skill or anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Electric,
    Ether,
}

impl Element {
    /// Get all elements
    pub fn all() -> &'static [Element] {
        &[
            Element::Physical,
            Element::Fire,
            Element::Ice,
            Element::Electric,
            Element::Ether,
        ]
    }

    /// The damage-bonus property keyed to this element
    pub fn damage_bonus(self) -> PropertyType {
        match self {
            Element::Physical => PropertyType::PhysicalDamageBonus,
            Element::Fire => PropertyType::FireDamageBonus,
            Element::Ice => PropertyType::IceDamageBonus,
            Element::Electric => PropertyType::ElectricDamageBonus,
            Element::Ether => PropertyType::EtherDamageBonus,
        }
    }
}

/// Equip slot for a drive disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskSlot {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl DiskSlot {
    /// Get all disk slots in order
    pub fn all() -> &'static [DiskSlot] {
        &[
            DiskSlot::One,
            DiskSlot::Two,
            DiskSlot::Three,
            DiskSlot::Four,
            DiskSlot::Five,
            DiskSlot::Six,
        ]
    }

    /// Zero-based index for array lookups
    pub fn index(self) -> usize {
        match self {
            DiskSlot::One => 0,
            DiskSlot::Two => 1,
            DiskSlot::Three => 2,
            DiskSlot::Four => 3,
            DiskSlot::Five => 4,
            DiskSlot::Six => 5,
        }
    }
}

/// Item rarity grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    B,
    A,
    S,
}

/// Damage falloff profile beyond the close-range band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayProfile {
    /// Stepped falloff: 0.75^(1 + steps past the close band)
    Standard,
    /// Flat 0.7 at any distance past the close band
    Grace,
}

impl Default for DecayProfile {
    fn default() -> Self {
        DecayProfile::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_classification() {
        assert!(PropertyType::AttackPercent.is_percentage());
        assert!(PropertyType::CritRate.is_percentage());
        assert!(!PropertyType::AttackFlat.is_percentage());
        assert!(!PropertyType::AnomalyMastery.is_percentage());
        assert!(!PropertyType::SheerForce.is_percentage());
    }

    #[test]
    fn test_all_covers_every_variant() {
        // Every variant must classify without panicking and appear once
        let all = PropertyType::all();
        for prop in all {
            let _ = prop.is_percentage();
        }
        assert_eq!(all.len(), 32);
    }

    #[test]
    fn test_element_damage_bonus_mapping() {
        assert_eq!(Element::Fire.damage_bonus(), PropertyType::FireDamageBonus);
        assert_eq!(Element::Ether.damage_bonus(), PropertyType::EtherDamageBonus);
    }

    #[test]
    fn test_disk_slot_indices() {
        for (i, slot) in DiskSlot::all().iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_property_type_serialization() {
        let json = serde_json::to_string(&PropertyType::AnomalyMastery).unwrap();
        assert_eq!(json, "\"anomaly_mastery\"");
    }
}
