//! Property aggregation - collections of attribute contributions and the
//! resolved combat snapshot built from them

mod collection;
mod snapshot;

pub use collection::PropertyCollection;
pub use snapshot::CombatStats;
