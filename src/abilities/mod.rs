//! Abilities: gameplay stats derived from capacities and body composition
//!
//! Capacities say what the body can still do; composition says how well it
//! was built to do it. Each ability combines the two and is floored at zero.

pub mod curves;

use crate::anatomy::body::Body;
use crate::core::types::{Capacity, CapacityContainer};
use curves::{
    fat_speed_penalty, insulation, lean_penalty, muscle_curve, size_modifier, weight_penalty,
    BASELINE_MUSCLE,
};
use serde::{Deserialize, Serialize};

/// Cold resistance never reaches full immunity
pub const MAX_COLD_RESISTANCE: f32 = 0.95;

/// Snapshot of all derived abilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Abilities {
    pub strength: f32,
    pub speed: f32,
    pub vitality: f32,
    pub perception: f32,
    pub cold_resistance: f32,
}

impl Abilities {
    pub fn derive(body: &Body, caps: &CapacityContainer) -> Self {
        Self {
            strength: strength(body, caps),
            speed: speed(body, caps),
            vitality: vitality(caps),
            perception: perception(caps),
            cold_resistance: cold_resistance(body),
        }
    }
}

pub fn strength(body: &Body, caps: &CapacityContainer) -> f32 {
    let composition = body.composition();
    let muscle = composition.muscle_percent();
    let fat = composition.fat_percent();

    let build = 0.30 + muscle_curve(muscle) + composition.muscle_mass() / 100.0 + fat * 0.3
        - lean_penalty(fat);

    let grip = 0.8 + 0.2 * caps[Capacity::Manipulation];
    let stance = 0.5 + 0.5 * caps[Capacity::Moving];

    (build * grip * stance * caps[Capacity::BloodPumping]).max(0.0)
}

pub fn speed(body: &Body, caps: &CapacityContainer) -> f32 {
    let composition = body.composition();
    let weight = composition.weight();
    let muscle = composition.muscle_percent();
    let fat = composition.fat_percent();

    let build = 1.0 + (muscle - BASELINE_MUSCLE) / 1.5 + composition.muscle_mass() / 2000.0
        - fat_speed_penalty(fat)
        - weight_penalty(weight, composition.base_mass());

    (caps[Capacity::Moving] * build * size_modifier(weight)).max(0.0)
}

/// The weakest link among the life-support capacities
pub fn vitality(caps: &CapacityContainer) -> f32 {
    caps[Capacity::Breathing]
        .min(caps[Capacity::BloodPumping])
        .min(caps[Capacity::Consciousness])
}

pub fn perception(caps: &CapacityContainer) -> f32 {
    (caps[Capacity::Sight] + caps[Capacity::Hearing]) / 2.0
}

pub fn cold_resistance(body: &Body) -> f32 {
    let fat = body.composition().fat_percent();
    (body.base_cold_resistance + insulation(fat)).clamp(0.0, MAX_COLD_RESISTANCE)
}
