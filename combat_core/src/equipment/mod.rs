//! Equipment - Trait and concrete models for attribute providers

mod drive_disk;
mod wengine;

pub use drive_disk::{DiskError, DriveDisk, DriveDiskSet, SubStat, AVAILABLE_SUB_STATS};
pub use drive_disk::{main_stat_max, max_level, slot_main_stats, sub_stat_base};
pub use wengine::{RefinementTier, WEngine};

use crate::buff::Buff;
use crate::property::PropertyCollection;

/// Trait for anything that contributes attributes to a combat snapshot
pub trait ContributionSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// The attribute contribution this source provides right now
    fn collection(&self) -> PropertyCollection;

    /// Buffs this source grants while equipped
    ///
    /// Default is none. Inactive buffs resolve to empty collections, so
    /// implementations may return them unfiltered.
    fn active_buffs(&self) -> Vec<Buff> {
        Vec::new()
    }
}
