//! Stateless death classification
//!
//! Rules are checked in order and the first match wins: destroyed vital
//! organs, then failed life-support capacities, then the dying thresholds.

use crate::anatomy::body::Body;
use crate::anatomy::tissue::OrganKind;
use crate::capacity::{compute_capacities, Influences};
use crate::core::config::EngineConfig;
use crate::core::types::{Capacity, CapacityContainer};
use crate::damage::result::EffectKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyState {
    Healthy,
    /// Not produced by any rule yet
    Injured,
    /// Not produced by any rule yet
    Critical,
    Dying,
    Dead,
}

impl BodyState {
    pub fn is_alive(self) -> bool {
        self != BodyState::Dead
    }
}

impl std::fmt::Display for BodyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BodyState::Healthy => "Healthy",
            BodyState::Injured => "Injured",
            BodyState::Critical => "Critical",
            BodyState::Dying => "Dying",
            BodyState::Dead => "Dead",
        };
        write!(f, "{}", name)
    }
}

/// Every organ of this kind is destroyed; false when the body has none
fn all_destroyed(body: &Body, kind: OrganKind) -> bool {
    let mut organs = body.organs_of(kind).peekable();
    organs.peek().is_some() && organs.all(|o| o.is_destroyed())
}

fn organ_failure(body: &Body) -> bool {
    all_destroyed(body, OrganKind::Brain)
        || all_destroyed(body, OrganKind::Heart)
        || all_destroyed(body, OrganKind::Lung)
}

fn is_dead(caps: &CapacityContainer, config: &EngineConfig) -> bool {
    caps[Capacity::BloodPumping] <= config.fatal_capacity_threshold
        || caps[Capacity::Breathing] <= config.fatal_capacity_threshold
        || caps[Capacity::Consciousness] <= 0.0
}

fn is_dying(caps: &CapacityContainer, pain: f32, config: &EngineConfig) -> bool {
    let pumping = caps[Capacity::BloodPumping];
    let failing = [Capacity::BloodPumping, Capacity::Breathing, Capacity::Consciousness]
        .iter()
        .filter(|&&c| caps[c] <= config.dying_capacity_threshold)
        .count();

    failing >= 2
        || pumping <= config.dying_blood_pumping_threshold
        || (pain > config.dying_pain_threshold && pumping <= config.dying_pain_blood_pumping)
}

/// Classify from an already computed capacity snapshot
pub fn classify_with(
    body: &Body,
    caps: &CapacityContainer,
    pain: f32,
    config: &EngineConfig,
) -> BodyState {
    if organ_failure(body) || is_dead(caps, config) {
        BodyState::Dead
    } else if is_dying(caps, pain, config) {
        BodyState::Dying
    } else {
        BodyState::Healthy
    }
}

pub fn classify(body: &Body, influences: &Influences, config: &EngineConfig) -> BodyState {
    let caps = compute_capacities(body, influences, config);
    let pain = influences.effects.severity(EffectKind::Pain.name());
    classify_with(body, &caps, pain, config)
}
