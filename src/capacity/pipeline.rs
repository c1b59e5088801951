//! The capacity pipeline
//!
//! Regions -> body totals -> status effects -> survival penalties -> blood
//! coupling -> cascades -> floor at zero. Pure over the body's current state.

use crate::anatomy::body::Body;
use crate::capacity::cascade::apply_cascades;
use crate::capacity::effects::Influences;
use crate::capacity::survival::survival_modifiers;
use crate::core::config::EngineConfig;
use crate::core::types::{Capacity, CapacityContainer, CapacityModifierContainer};

/// Body-wide capacities before any outside influence
pub fn raw_capacities(body: &Body, influences: &Influences) -> CapacityContainer {
    body.regions()
        .iter()
        .map(|region| {
            let local = region.local_capacities();
            local.map(|capacity, value| {
                let modifier = influences
                    .effects
                    .part_capacity_modifier(capacity, &region.name);
                value * (1.0 + modifier).max(0.0)
            })
        })
        .sum()
}

fn effect_modifiers(influences: &Influences) -> CapacityModifierContainer {
    Capacity::all()
        .into_iter()
        .fold(CapacityModifierContainer::none(), |acc, capacity| {
            acc.with(capacity, influences.effects.capacity_modifier(capacity))
        })
}

/// Full capacity computation
pub fn compute_capacities(
    body: &Body,
    influences: &Influences,
    config: &EngineConfig,
) -> CapacityContainer {
    let mut caps = raw_capacities(body, influences);

    caps = caps.apply_modifiers(&effect_modifiers(influences));
    caps = caps.apply_modifiers(&survival_modifiers(influences.survival, &config.survival));

    let blood = body.blood().condition();
    caps[Capacity::BloodPumping] *= blood;

    apply_cascades(&mut caps, blood, config);

    let caps = caps.clamp_non_negative();
    tracing::trace!("Capacities for {}: {:?}", body.species, caps);
    caps
}
