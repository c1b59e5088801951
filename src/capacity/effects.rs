//! Inbound queries the engine makes of its collaborators
//!
//! The status-effect registry and the survival-stat tracker belong to the
//! owning actor. The engine only reads them, through these traits.

use crate::core::types::Capacity;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Read-only view of an actor's active status effects
pub trait EffectModifierSource {
    /// Body-wide additive modifier for a capacity (-0.2 = 20% reduction)
    fn capacity_modifier(&self, capacity: Capacity) -> f32;

    /// Modifier that applies only to one region's contribution
    fn part_capacity_modifier(&self, capacity: Capacity, region: &str) -> f32;

    fn has_effect(&self, name: &str) -> bool;

    /// Severity of a named effect, 0.0 when absent
    fn severity(&self, name: &str) -> f32;
}

/// Survival stats as percentages (0-100)
pub trait SurvivalStatSource {
    fn calorie_percent(&self) -> f32;
    fn hydration_percent(&self) -> f32;
    fn energy_percent(&self) -> f32;
}

/// An actor with no active effects
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl EffectModifierSource for NoEffects {
    fn capacity_modifier(&self, _capacity: Capacity) -> f32 {
        0.0
    }

    fn part_capacity_modifier(&self, _capacity: Capacity, _region: &str) -> f32 {
        0.0
    }

    fn has_effect(&self, _name: &str) -> bool {
        false
    }

    fn severity(&self, _name: &str) -> f32 {
        0.0
    }
}

/// Fixed table of effects, for tests, tools and scripted scenarios
#[derive(Debug, Clone, Default)]
pub struct StaticEffects {
    modifiers: AHashMap<Capacity, f32>,
    part_modifiers: AHashMap<(String, Capacity), f32>,
    severities: AHashMap<String, f32>,
}

impl StaticEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modifier(mut self, capacity: Capacity, modifier: f32) -> Self {
        *self.modifiers.entry(capacity).or_insert(0.0) += modifier;
        self
    }

    pub fn with_part_modifier(mut self, region: &str, capacity: Capacity, modifier: f32) -> Self {
        let key = (region.to_ascii_lowercase(), capacity);
        *self.part_modifiers.entry(key).or_insert(0.0) += modifier;
        self
    }

    pub fn with_effect(mut self, name: &str, severity: f32) -> Self {
        self.severities.insert(name.to_ascii_lowercase(), severity);
        self
    }
}

impl EffectModifierSource for StaticEffects {
    fn capacity_modifier(&self, capacity: Capacity) -> f32 {
        self.modifiers.get(&capacity).copied().unwrap_or(0.0)
    }

    fn part_capacity_modifier(&self, capacity: Capacity, region: &str) -> f32 {
        self.part_modifiers
            .get(&(region.to_ascii_lowercase(), capacity))
            .copied()
            .unwrap_or(0.0)
    }

    fn has_effect(&self, name: &str) -> bool {
        self.severities.contains_key(&name.to_ascii_lowercase())
    }

    fn severity(&self, name: &str) -> f32 {
        self.severities
            .get(&name.to_ascii_lowercase())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Plain survival stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalStats {
    pub calories: f32,
    pub hydration: f32,
    pub energy: f32,
}

impl SurvivalStats {
    /// Fed, watered and rested
    pub const SATED: SurvivalStats = SurvivalStats {
        calories: 100.0,
        hydration: 100.0,
        energy: 100.0,
    };

    pub fn new(calories: f32, hydration: f32, energy: f32) -> Self {
        Self {
            calories,
            hydration,
            energy,
        }
    }
}

impl Default for SurvivalStats {
    fn default() -> Self {
        Self::SATED
    }
}

impl SurvivalStatSource for SurvivalStats {
    fn calorie_percent(&self) -> f32 {
        self.calories
    }

    fn hydration_percent(&self) -> f32 {
        self.hydration
    }

    fn energy_percent(&self) -> f32 {
        self.energy
    }
}

/// Everything outside the body that shapes its capacities
#[derive(Clone, Copy)]
pub struct Influences<'a> {
    pub effects: &'a dyn EffectModifierSource,
    pub survival: &'a dyn SurvivalStatSource,
}

impl<'a> Influences<'a> {
    pub fn new(
        effects: &'a dyn EffectModifierSource,
        survival: &'a dyn SurvivalStatSource,
    ) -> Self {
        Self { effects, survival }
    }

    /// No effects, fully sated
    pub fn none() -> Influences<'static> {
        Influences {
            effects: &NoEffects,
            survival: &SurvivalStats::SATED,
        }
    }
}

impl std::fmt::Debug for Influences<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Influences")
            .field("calories", &self.survival.calorie_percent())
            .field("hydration", &self.survival.hydration_percent())
            .field("energy", &self.survival.energy_percent())
            .finish_non_exhaustive()
    }
}
