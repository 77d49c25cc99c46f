//! PropertyCollection - Layered attribute contributions from one source

use crate::types::PropertyType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute contributions from a single source (agent kit, equipment piece,
/// buff), split into a pre-battle layer and an in-battle layer
///
/// Pre-battle values feed the out-of-combat attribute panel; in-battle values
/// apply on top of the converted panel once combat starts. Absent keys read
/// as 0. Merging collections sums same-key values per layer, so merge order
/// never matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollection {
    #[serde(default)]
    pre_battle: BTreeMap<PropertyType, f64>,
    #[serde(default)]
    in_battle: BTreeMap<PropertyType, f64>,
}

impl PropertyCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the pre-battle layer
    pub fn add_pre_battle(&mut self, prop: PropertyType, value: f64) {
        *self.pre_battle.entry(prop).or_insert(0.0) += value;
    }

    /// Add to the in-battle layer
    pub fn add_in_battle(&mut self, prop: PropertyType, value: f64) {
        *self.in_battle.entry(prop).or_insert(0.0) += value;
    }

    /// Builder-style pre-battle add
    pub fn with_pre_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.add_pre_battle(prop, value);
        self
    }

    /// Builder-style in-battle add
    pub fn with_in_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.add_in_battle(prop, value);
        self
    }

    /// Pre-battle value for a property (0 if absent)
    pub fn pre_battle(&self, prop: PropertyType) -> f64 {
        self.pre_battle.get(&prop).copied().unwrap_or(0.0)
    }

    /// In-battle value for a property (0 if absent)
    pub fn in_battle(&self, prop: PropertyType) -> f64 {
        self.in_battle.get(&prop).copied().unwrap_or(0.0)
    }

    /// Sum of both layers for a property
    pub fn total(&self, prop: PropertyType) -> f64 {
        self.pre_battle(prop) + self.in_battle(prop)
    }

    /// Whether both layers are empty
    pub fn is_empty(&self) -> bool {
        self.pre_battle.is_empty() && self.in_battle.is_empty()
    }

    /// Fold another collection into this one
    pub fn absorb(&mut self, other: &PropertyCollection) {
        for (&prop, &value) in &other.pre_battle {
            self.add_pre_battle(prop, value);
        }
        for (&prop, &value) in &other.in_battle {
            self.add_in_battle(prop, value);
        }
    }

    /// Merge a list of collections into one by summing per layer
    pub fn merge(collections: &[PropertyCollection]) -> PropertyCollection {
        let mut merged = PropertyCollection::new();
        for collection in collections {
            merged.absorb(collection);
        }
        merged
    }

    /// Iterate the pre-battle layer
    pub fn iter_pre_battle(&self) -> impl Iterator<Item = (PropertyType, f64)> + '_ {
        self.pre_battle.iter().map(|(&p, &v)| (p, v))
    }

    /// Iterate the in-battle layer
    pub fn iter_in_battle(&self) -> impl Iterator<Item = (PropertyType, f64)> + '_ {
        self.in_battle.iter().map(|(&p, &v)| (p, v))
    }
}
