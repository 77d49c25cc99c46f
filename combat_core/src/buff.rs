//! Buff - Named attribute modifiers with stacking and conversion rules

use crate::property::PropertyCollection;
use crate::types::PropertyType;
use serde::{Deserialize, Serialize};

/// How a buff's contribution scales with stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingRule {
    /// Per-stack contribution × current stacks, plus the full-stack bonus at max
    Linear,
    /// Contribution applies only once the buff reaches max stacks
    FullStacksOnly,
}

/// A named attribute modifier from an agent kit, equipment passive, or team effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    /// Buff identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Where the buff came from (kit, wengine, disk set, team)
    pub source: String,
    /// Whether the buff currently applies
    pub active: bool,
    /// Current stack count
    pub stacks: u32,
    /// Stack ceiling
    pub max_stacks: u32,
    /// Stacking behavior
    pub stacking: StackingRule,
    /// Per-stack attribute deltas
    contribution: PropertyCollection,
    /// Extra deltas granted only at max stacks
    full_stack_bonus: PropertyCollection,
}

impl Buff {
    /// Create a new single-stack buff
    pub fn new(id: &str, name: &str) -> Self {
        Buff {
            id: id.to_string(),
            name: name.to_string(),
            source: String::new(),
            active: true,
            stacks: 1,
            max_stacks: 1,
            stacking: StackingRule::Linear,
            contribution: PropertyCollection::new(),
            full_stack_bonus: PropertyCollection::new(),
        }
    }

    /// Set the source tag
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Add a pre-battle delta per stack
    pub fn with_pre_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.contribution.add_pre_battle(prop, value);
        self
    }

    /// Add an in-battle delta per stack
    pub fn with_in_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.contribution.add_in_battle(prop, value);
        self
    }

    /// Set the stacking rule and ceiling
    pub fn with_stacking(mut self, stacking: StackingRule, max_stacks: u32) -> Self {
        self.stacking = stacking;
        self.max_stacks = max_stacks.max(1);
        self.stacks = self.stacks.min(self.max_stacks);
        self
    }

    /// Set the current stack count (clamped to the ceiling)
    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks.min(self.max_stacks);
        self
    }

    /// Add an in-battle delta granted only at max stacks
    pub fn with_full_stack_bonus(mut self, prop: PropertyType, value: f64) -> Self {
        self.full_stack_bonus.add_in_battle(prop, value);
        self
    }

    /// Mark the buff inactive
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Add a stack up to the ceiling
    pub fn add_stack(&mut self) {
        if self.stacks < self.max_stacks {
            self.stacks += 1;
        }
    }

    /// Remove a stack
    pub fn remove_stack(&mut self) {
        self.stacks = self.stacks.saturating_sub(1);
    }

    /// Whether the buff is at its stack ceiling
    pub fn at_max_stacks(&self) -> bool {
        self.stacks >= self.max_stacks
    }

    /// The buff's current attribute contribution
    ///
    /// Inactive or zero-stack buffs contribute nothing. Linear stacking
    /// scales the per-stack deltas by the stack count and adds the
    /// full-stack bonus at the ceiling; FullStacksOnly is all-or-nothing.
    pub fn collection(&self) -> PropertyCollection {
        if !self.active || self.stacks == 0 {
            return PropertyCollection::new();
        }

        let mut result = PropertyCollection::new();
        match self.stacking {
            StackingRule::Linear => {
                let factor = self.stacks as f64;
                for (prop, value) in self.contribution.iter_pre_battle() {
                    result.add_pre_battle(prop, value * factor);
                }
                for (prop, value) in self.contribution.iter_in_battle() {
                    result.add_in_battle(prop, value * factor);
                }
                if self.at_max_stacks() {
                    result.absorb(&self.full_stack_bonus);
                }
            }
            StackingRule::FullStacksOnly => {
                if self.at_max_stacks() {
                    result.absorb(&self.contribution);
                    result.absorb(&self.full_stack_bonus);
                }
            }
        }
        result
    }
}

/// Converts one attribute's resolved value into a bonus on another
///
/// bonus = min(cap, source_value × ratio), deposited as an in-battle
/// contribution on the target attribute during snapshot resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionBuff {
    /// Conversion identifier
    pub id: String,
    /// Attribute read (primary-base variants read the final value)
    pub source: PropertyType,
    /// Attribute credited
    pub target: PropertyType,
    /// Conversion ratio
    pub ratio: f64,
    /// Optional ceiling on the converted bonus
    pub cap: Option<f64>,
}

impl ConversionBuff {
    /// Create a new conversion
    pub fn new(id: &str, source: PropertyType, target: PropertyType, ratio: f64) -> Self {
        ConversionBuff {
            id: id.to_string(),
            source,
            target,
            ratio,
            cap: None,
        }
    }

    /// Set the bonus ceiling
    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Bonus produced from a source value
    pub fn converted_bonus(&self, source_value: f64) -> f64 {
        let raw = source_value * self.ratio;
        match self.cap {
            Some(cap) => raw.min(cap),
            None => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_stacking_scales_per_stack() {
        let buff = Buff::new("swell", "Swell")
            .with_in_battle(PropertyType::AttackPercent, 0.04)
            .with_stacking(StackingRule::Linear, 5)
            .with_stacks(3);

        // 0.04 × 3 stacks = 0.12
        let collection = buff.collection();
        assert!((collection.in_battle(PropertyType::AttackPercent) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_full_stack_bonus_applies_at_ceiling() {
        let buff = Buff::new("swell", "Swell")
            .with_in_battle(PropertyType::AttackPercent, 0.04)
            .with_stacking(StackingRule::Linear, 5)
            .with_full_stack_bonus(PropertyType::CritRate, 0.10)
            .with_stacks(5);

        let collection = buff.collection();
        assert!((collection.in_battle(PropertyType::AttackPercent) - 0.20).abs() < 1e-12);
        assert!((collection.in_battle(PropertyType::CritRate) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_full_stacks_only_below_ceiling_is_empty() {
        let buff = Buff::new("charge", "Charge")
            .with_in_battle(PropertyType::DamageBonus, 0.25)
            .with_stacking(StackingRule::FullStacksOnly, 3)
            .with_stacks(2);

        assert!(buff.collection().is_empty());

        let full = buff.with_stacks(3);
        assert!((full.collection().in_battle(PropertyType::DamageBonus) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_inactive_buff_contributes_nothing() {
        let buff = Buff::new("idle", "Idle")
            .with_pre_battle(PropertyType::AttackPercent, 0.10)
            .deactivated();

        assert!(buff.collection().is_empty());
    }

    #[test]
    fn test_conversion_cap() {
        let conversion = ConversionBuff::new(
            "hp_to_sheer",
            PropertyType::HpBase,
            PropertyType::SheerForce,
            0.10,
        )
        .with_cap(500.0);

        assert!((conversion.converted_bonus(3000.0) - 300.0).abs() < f64::EPSILON);
        assert!((conversion.converted_bonus(9000.0) - 500.0).abs() < f64::EPSILON);
    }
}
