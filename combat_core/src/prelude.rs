//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::property::{CombatStats, PropertyCollection};
pub use crate::types::{DecayProfile, DiskSlot, Element, PropertyType, Rarity};

// Combatants and buffs
pub use crate::agent::Agent;
pub use crate::buff::{Buff, ConversionBuff};
pub use crate::enemy::{ActiveAnomaly, EnemyStats};

// Damage pipeline
pub use crate::damage::{
    calculate_skill_damage, AnomalyEffect, AnomalyRegistry, DamageResult, DamageTriple, RatioSet,
    SkillDamageParams,
};

// Equipment
pub use crate::equipment::{ContributionSource, DriveDisk, DriveDiskSet, SubStat, WEngine};

// Optimization
pub use crate::estimator::{compute_marginal_weights, DamageShares, StatUnitValues};
pub use crate::optimize::{
    optimize_equipment, CancelToken, DiskPools, OptimizationResult, OptimizeError, OptimizeRequest,
};

// Battle session
pub use crate::session::{BattleSession, BattleState, SessionError};

// Config
pub use crate::config::default_enemies;
