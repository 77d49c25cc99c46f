//! WEngine - Weapon with a base attack line and one advanced stat

use serde::{Deserialize, Serialize};

use crate::buff::Buff;
use crate::equipment::ContributionSource;
use crate::property::PropertyCollection;
use crate::types::PropertyType;

/// Buffs unlocked at a specific refinement rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementTier {
    /// Rank this tier belongs to (1-5)
    pub refinement: u8,
    /// Buffs granted while the engine sits at this rank
    pub buffs: Vec<Buff>,
}

/// A weapon engine
///
/// The base attack line joins the wearer's attack base, so pre-battle
/// attack percentages scale it. The advanced stat is an ordinary
/// pre-battle contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WEngine {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Added to the wearer's attack base
    pub base_attack: f64,
    /// Secondary stat type
    pub advanced_stat: PropertyType,
    /// Secondary stat value (fraction for percentage stats)
    pub advanced_value: f64,
    /// Refinement rank (1-5), selects the active talent tier
    refinement: u8,
    /// Passive buff tiers keyed by refinement rank
    talents: Vec<RefinementTier>,
}

impl WEngine {
    /// Create a new engine at refinement 1 with no talents
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_attack: f64,
        advanced_stat: PropertyType,
        advanced_value: f64,
    ) -> Self {
        WEngine {
            id: id.into(),
            name: name.into(),
            base_attack,
            advanced_stat,
            advanced_value,
            refinement: 1,
            talents: Vec::new(),
        }
    }

    /// Set the refinement rank, clamped to 1-5
    pub fn with_refinement(mut self, refinement: u8) -> Self {
        self.refinement = refinement.clamp(1, 5);
        self
    }

    /// Add the talent buffs for one refinement rank
    pub fn with_talent(mut self, refinement: u8, buffs: Vec<Buff>) -> Self {
        self.talents.push(RefinementTier {
            refinement: refinement.clamp(1, 5),
            buffs,
        });
        self
    }

    /// Current refinement rank
    pub fn refinement(&self) -> u8 {
        self.refinement
    }

    /// Talent buffs for the current refinement rank
    pub fn talent_buffs(&self) -> Vec<Buff> {
        self.talents
            .iter()
            .filter(|tier| tier.refinement == self.refinement)
            .flat_map(|tier| tier.buffs.iter().cloned())
            .collect()
    }
}

impl ContributionSource for WEngine {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection(&self) -> PropertyCollection {
        let mut collection = PropertyCollection::new();
        if self.base_attack > 0.0 {
            collection.add_pre_battle(PropertyType::AttackBase, self.base_attack);
        }
        if self.advanced_value != 0.0 {
            collection.add_pre_battle(self.advanced_stat, self.advanced_value);
        }
        collection
    }

    fn active_buffs(&self) -> Vec<Buff> {
        self.talent_buffs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_is_pre_battle() {
        let engine = WEngine::new("w1", "Steel Cradle", 714.0, PropertyType::CritRate, 0.24);

        let collection = engine.collection();
        assert!((collection.pre_battle(PropertyType::AttackBase) - 714.0).abs() < f64::EPSILON);
        assert!((collection.pre_battle(PropertyType::CritRate) - 0.24).abs() < f64::EPSILON);
        assert_eq!(collection.in_battle(PropertyType::AttackBase), 0.0);
    }

    #[test]
    fn test_refinement_selects_talent_tier() {
        let engine = WEngine::new("w1", "Steel Cradle", 714.0, PropertyType::CritRate, 0.24)
            .with_talent(
                1,
                vec![Buff::new("w1_r1", "Passive").with_in_battle(PropertyType::DamageBonus, 0.10)],
            )
            .with_talent(
                5,
                vec![Buff::new("w1_r5", "Passive").with_in_battle(PropertyType::DamageBonus, 0.20)],
            );

        let r1 = engine.clone().with_refinement(1);
        let buffs = r1.talent_buffs();
        assert_eq!(buffs.len(), 1);
        assert_eq!(buffs[0].id, "w1_r1");

        let r5 = engine.with_refinement(5);
        let buffs = r5.talent_buffs();
        assert_eq!(buffs.len(), 1);
        assert_eq!(buffs[0].id, "w1_r5");
    }

    #[test]
    fn test_refinement_clamps_to_valid_range() {
        let engine = WEngine::new("w1", "Steel Cradle", 714.0, PropertyType::CritRate, 0.24)
            .with_refinement(9);
        assert_eq!(engine.refinement(), 5);

        let engine = engine.with_refinement(0);
        assert_eq!(engine.refinement(), 1);
    }
}
