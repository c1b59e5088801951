//! Blood: the systemic tissue tracked by volume rather than by region

use crate::anatomy::tissue::sanitize;
use serde::{Deserialize, Serialize};

/// Nominal adult blood volume
pub const NOMINAL_BLOOD_VOLUME_ML: f32 = 5000.0;

/// Damage units needed to drain the full volume
pub const BLOOD_PROTECTION: f32 = 100.0;

/// Condition below which circulation collapses
pub const BLOOD_FATAL_CONDITION: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blood {
    condition: f32,
    pub total_volume_ml: f32,
}

impl Default for Blood {
    fn default() -> Self {
        Self::new(NOMINAL_BLOOD_VOLUME_ML)
    }
}

impl Blood {
    pub fn new(total_volume_ml: f32) -> Self {
        Self {
            condition: 1.0,
            total_volume_ml: sanitize(total_volume_ml),
        }
    }

    pub fn condition(&self) -> f32 {
        self.condition
    }

    pub fn set_condition(&mut self, condition: f32) {
        self.condition = sanitize(condition).min(1.0);
    }

    pub fn volume_ml(&self) -> f32 {
        self.condition * self.total_volume_ml
    }

    pub fn volume_lost_ml(&self) -> f32 {
        (1.0 - self.condition) * self.total_volume_ml
    }

    /// Constant protection; blood has no layering and no toughness curve
    pub fn protection(&self) -> f32 {
        BLOOD_PROTECTION
    }

    pub fn is_fatal(&self) -> bool {
        self.condition < BLOOD_FATAL_CONDITION
    }

    /// Drain blood; returns the condition removed
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.condition;
        self.condition = (self.condition - sanitize(amount) / self.protection()).max(0.0);
        before - self.condition
    }

    /// Restore blood, capped at full volume; returns the condition restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.condition;
        self.condition = (self.condition + sanitize(amount)).min(1.0);
        self.condition - before
    }
}
