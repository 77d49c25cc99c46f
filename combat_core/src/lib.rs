//! combat_core - Combat damage calculation and equipment optimization
//!
//! This library provides:
//! - PropertyCollection: Layered attribute contributions from gear and buffs
//! - CombatStats: Pre-battle to in-battle snapshot resolution
//! - Damage pipeline: Multiplicative zone evaluation with anomaly payouts
//! - Equipment optimizer: Pruned parallel search over weapon and disk loadouts
//! - BattleSession: Lifecycle gating around per-call damage evaluation

pub mod agent;
pub mod buff;
pub mod config;
pub mod damage;
pub mod enemy;
pub mod equipment;
pub mod estimator;
pub mod optimize;
pub mod prelude;
pub mod property;
pub mod session;
pub mod types;
pub mod zones;

// Re-export core types for convenience
pub use agent::{resolve_combat_stats, resolve_combat_stats_with, Agent};
pub use buff::{Buff, ConversionBuff};
pub use config::{default_enemies, ConfigError};
pub use damage::{
    calculate_skill_damage, AnomalyEffect, AnomalyRegistry, DamageResult, DamageTriple, RatioSet,
    RolledHit, SkillDamageParams, ZoneCollection,
};
pub use enemy::{ActiveAnomaly, EnemyStats};
pub use equipment::{
    ContributionSource, DiskError, DriveDisk, DriveDiskSet, RefinementTier, SubStat, WEngine,
};
pub use estimator::{
    compute_marginal_weights, score_collection, score_disk_rolls, DamageShares, StatUnitValues,
};
pub use optimize::{
    optimize_equipment, CancelToken, DiskPools, OptimizationResult, OptimizeError, OptimizeRequest,
};
pub use property::{CombatStats, PropertyCollection};
pub use session::{BattleSession, BattleState, SessionError};
pub use types::{DecayProfile, DiskSlot, Element, PropertyType, Rarity};
