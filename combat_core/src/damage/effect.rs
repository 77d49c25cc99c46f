//! AnomalyEffect - What an element's anomaly pays out when triggered

use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A triggered anomaly's payout shape
///
/// One-shot anomalies (tick_interval 0) pay the base ratio once; ticking
/// anomalies pay it once per whole tick over their duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEffect {
    /// Effect name (shatter, burn, shock...)
    pub name: String,
    /// Element whose buildup threshold gates the trigger
    pub element: Element,
    /// Payout ratio per shot or per tick
    pub ratio: f64,
    /// Seconds between ticks; 0 for one-shot effects
    #[serde(default)]
    pub tick_interval: f64,
    /// Total effect duration in seconds
    #[serde(default)]
    pub duration: f64,
}

impl AnomalyEffect {
    /// Create a one-shot anomaly effect
    pub fn new(name: &str, element: Element, ratio: f64) -> Self {
        AnomalyEffect {
            name: name.to_string(),
            element,
            ratio,
            tick_interval: 0.0,
            duration: 0.0,
        }
    }

    /// Make the effect tick over a duration
    pub fn with_ticks(mut self, tick_interval: f64, duration: f64) -> Self {
        self.tick_interval = tick_interval;
        self.duration = duration;
        self
    }

    /// Ratio summed over the effect's lifetime
    pub fn total_ratio(&self) -> f64 {
        if self.tick_interval <= 0.0 {
            return self.ratio;
        }
        let ticks = (self.duration / self.tick_interval).floor();
        self.ratio * ticks
    }
}

/// Registry of anomaly effects keyed by name
#[derive(Debug, Clone, Default)]
pub struct AnomalyRegistry {
    effects: BTreeMap<String, AnomalyEffect>,
}

impl AnomalyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        AnomalyRegistry {
            effects: BTreeMap::new(),
        }
    }

    /// Register an effect under its name
    pub fn register(&mut self, effect: AnomalyEffect) {
        self.effects.insert(effect.name.clone(), effect);
    }

    /// Get an effect by name
    pub fn get(&self, name: &str) -> Option<&AnomalyEffect> {
        self.effects.get(name)
    }

    /// Get the first registered effect of an element
    pub fn for_element(&self, element: Element) -> Option<&AnomalyEffect> {
        self.effects.values().find(|effect| effect.element == element)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Load the standard anomaly effects
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Shatter - one-shot ice payout
        registry.register(AnomalyEffect {
            name: "ice_shatter".to_string(),
            element: Element::Ice,
            ratio: 5.0, // 500% once
            tick_interval: 0.0,
            duration: 10.0,
        });

        // Shock - electric tick every second
        registry.register(AnomalyEffect {
            name: "shock".to_string(),
            element: Element::Electric,
            ratio: 1.25, // 125% per tick
            tick_interval: 1.0,
            duration: 10.0,
        });

        // Burn - fire tick every half second
        registry.register(AnomalyEffect {
            name: "burn".to_string(),
            element: Element::Fire,
            ratio: 0.5, // 50% per tick
            tick_interval: 0.5,
            duration: 10.0,
        });

        // Corruption - ether tick every half second
        registry.register(AnomalyEffect {
            name: "corruption".to_string(),
            element: Element::Ether,
            ratio: 0.625, // 62.5% per tick
            tick_interval: 0.5,
            duration: 10.0,
        });

        // Assault - one-shot physical payout
        registry.register(AnomalyEffect {
            name: "assault".to_string(),
            element: Element::Physical,
            ratio: 7.13, // 713% once
            tick_interval: 0.0,
            duration: 0.0,
        });

        registry
    }
}
