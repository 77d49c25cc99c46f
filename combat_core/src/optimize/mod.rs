//! Optimizer - Combinatorial equipment search pruned by marginal value

mod search;

pub use search::{optimize_equipment, OptimizeRequest};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::damage::DamageResult;
use crate::equipment::{DriveDisk, WEngine};
use crate::types::DiskSlot;

/// Search failures
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("no weapon engine candidates available")]
    EmptyWEnginePool,

    #[error("no disk candidates available for slot {0:?}")]
    EmptySlot(DiskSlot),

    #[error("no skills to evaluate")]
    NoSolution,

    #[error("search cancelled")]
    Cancelled,
}

/// Candidate disks partitioned by slot
#[derive(Debug, Clone, Default)]
pub struct DiskPools {
    slots: [Vec<DriveDisk>; 6],
}

impl DiskPools {
    pub fn new() -> Self {
        DiskPools::default()
    }

    /// Route a candidate into the pool for its slot
    pub fn add(&mut self, disk: DriveDisk) {
        self.slots[disk.slot.index()].push(disk);
    }

    /// Candidates for one slot
    pub fn slot(&self, slot: DiskSlot) -> &[DriveDisk] {
        &self.slots[slot.index()]
    }

    /// First slot with no candidates, if any
    pub fn first_empty_slot(&self) -> Option<DiskSlot> {
        DiskSlot::all()
            .iter()
            .copied()
            .find(|slot| self.slots[slot.index()].is_empty())
    }

    /// Total candidates across all slots
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<DriveDisk> for DiskPools {
    fn from_iter<I: IntoIterator<Item = DriveDisk>>(iter: I) -> Self {
        let mut pools = DiskPools::new();
        for disk in iter {
            pools.add(disk);
        }
        pools
    }
}

/// Cooperative cancellation flag, checked between combinations
///
/// Clones share the flag, so a token handed to another thread can stop a
/// running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Ask the search to stop at the next combination boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Outcome of a completed search
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Winning weapon engine
    pub best_wengine: WEngine,
    /// Winning disks in slot order
    pub best_disks: [DriveDisk; 6],
    /// Summed expected damage of the winning combination
    pub max_damage: f64,
    /// Per-skill damage breakdowns for the winning combination
    pub best_results: Vec<DamageResult>,
    /// Combinations fully evaluated
    pub combinations_evaluated: u64,
    /// Wall time spent searching
    pub elapsed: Duration,
}
