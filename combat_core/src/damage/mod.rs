//! Damage pipeline - skill parameters, anomaly effects, zone evaluation,
//! and the structured calculation result

mod calculation;
mod collection;
mod effect;
mod params;
mod result;

pub use calculation::calculate_skill_damage;
pub use collection::{DamageTriple, ZoneCollection};
pub use effect::{AnomalyEffect, AnomalyRegistry};
pub use params::{RatioSet, SkillDamageParams};
pub use result::{DamageResult, RolledHit};
