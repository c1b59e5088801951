//! Engine configuration with documented constants
//!
//! Every tunable number the damage, capacity and death systems use lives here.
//! Defaults reproduce the reference balance; a TOML file may override any subset.

use crate::core::error::{AnatomyError, Result};
use crate::core::types::{Capacity, CapacityModifierContainer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One penalty step of a survival stat
///
/// Applies when the stat (0-100) is strictly below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalTier {
    pub below: f32,
    #[serde(default)]
    pub moving: f32,
    #[serde(default)]
    pub manipulation: f32,
    #[serde(default)]
    pub consciousness: f32,
}

impl SurvivalTier {
    pub const fn new(below: f32, moving: f32, manipulation: f32, consciousness: f32) -> Self {
        Self {
            below,
            moving,
            manipulation,
            consciousness,
        }
    }

    pub fn modifiers(&self) -> CapacityModifierContainer {
        CapacityModifierContainer::none()
            .with(Capacity::Moving, self.moving)
            .with(Capacity::Manipulation, self.manipulation)
            .with(Capacity::Consciousness, self.consciousness)
    }
}

/// Penalty tables for the three survival stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalPenalties {
    pub calories: Vec<SurvivalTier>,
    pub hydration: Vec<SurvivalTier>,
    pub energy: Vec<SurvivalTier>,
}

impl Default for SurvivalPenalties {
    fn default() -> Self {
        Self {
            // Hunger mostly saps the body, the mind holds out longer
            calories: vec![
                SurvivalTier::new(1.0, -0.30, -0.20, -0.20),
                SurvivalTier::new(20.0, -0.10, -0.05, -0.05),
            ],
            // Dehydration hits consciousness as hard as movement
            hydration: vec![
                SurvivalTier::new(1.0, -0.40, -0.30, -0.40),
                SurvivalTier::new(20.0, -0.10, -0.05, -0.10),
            ],
            energy: vec![
                SurvivalTier::new(1.0, -0.40, -0.30, -0.50),
                SurvivalTier::new(20.0, -0.15, -0.10, -0.15),
            ],
        }
    }
}

/// Configuration for the anatomy engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === PENETRATION ===
    /// Largest share of the incoming damage one layer can absorb
    ///
    /// At 0.7 a layer always lets at least 30% through unless it stops the blow
    /// outright (protection >= incoming).
    pub layer_absorption_fraction: f32,

    /// Remaining damage an internal organ needs before it can be hit
    ///
    /// External organs (eyes, ears) are eligible for any positive remainder.
    pub internal_organ_threshold: f32,

    /// Share of the remainder the region's muscle takes when no organ is hit
    pub deep_tissue_fraction: f32,

    /// Condition every structural tissue of a region loses when one of its
    /// vital organs is destroyed
    pub vital_cascade_fraction: f32,

    // === CASCADES ===
    /// Blood condition at which circulation collapses completely
    pub blood_collapse_threshold: f32,

    /// Breathing below this starves consciousness proportionally
    pub breathing_threshold: f32,

    /// Consciousness below this disables motor control
    pub unconscious_threshold: f32,

    /// Factor applied to Moving and Manipulation while unconscious
    pub unconscious_motor_factor: f32,

    // === SURVIVAL ===
    pub survival: SurvivalPenalties,

    // === DEATH ===
    /// BloodPumping or Breathing at or below this is fatal
    pub fatal_capacity_threshold: f32,

    /// Two of the vital capacities at or below this means dying
    pub dying_capacity_threshold: f32,

    /// BloodPumping at or below this alone means dying
    pub dying_blood_pumping_threshold: f32,

    /// Pain severity above which weak circulation becomes dying
    pub dying_pain_threshold: f32,

    /// BloodPumping at or below this counts as weak circulation under severe pain
    pub dying_pain_blood_pumping: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layer_absorption_fraction: 0.7,
            internal_organ_threshold: 5.0,
            deep_tissue_fraction: 0.5,
            vital_cascade_fraction: 0.5,

            blood_collapse_threshold: 0.5,
            breathing_threshold: 0.3,
            unconscious_threshold: 0.1,
            unconscious_motor_factor: 0.1,

            survival: SurvivalPenalties::default(),

            fatal_capacity_threshold: 0.05,
            dying_capacity_threshold: 0.15,
            dying_blood_pumping_threshold: 0.10,
            dying_pain_threshold: 0.8,
            dying_pain_blood_pumping: 0.30,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(AnatomyError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let fractions = [
            ("layer_absorption_fraction", self.layer_absorption_fraction),
            ("deep_tissue_fraction", self.deep_tissue_fraction),
            ("vital_cascade_fraction", self.vital_cascade_fraction),
            ("blood_collapse_threshold", self.blood_collapse_threshold),
            ("unconscious_motor_factor", self.unconscious_motor_factor),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within [0, 1]", name, value));
            }
        }

        if self.internal_organ_threshold < 0.0 {
            return Err("internal_organ_threshold must not be negative".into());
        }

        if self.breathing_threshold <= 0.0 {
            return Err("breathing_threshold must be positive".into());
        }

        if self.fatal_capacity_threshold >= self.dying_capacity_threshold {
            return Err(format!(
                "fatal_capacity_threshold ({}) should be < dying_capacity_threshold ({})",
                self.fatal_capacity_threshold, self.dying_capacity_threshold
            ));
        }

        let tables = [
            ("calories", &self.survival.calories),
            ("hydration", &self.survival.hydration),
            ("energy", &self.survival.energy),
        ];
        for (name, tiers) in tables {
            for tier in tiers.iter() {
                let mods = [tier.moving, tier.manipulation, tier.consciousness];
                if mods.iter().any(|m| !(-1.0..=0.0).contains(m)) {
                    return Err(format!(
                        "{} tier below {} has a modifier outside [-1, 0]",
                        name, tier.below
                    ));
                }
            }
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
