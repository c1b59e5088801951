//! Survival-stat penalties: hunger, thirst and exhaustion
//!
//! Each stat maps to at most one tier (the deepest it has fallen below).
//! The three stats are independent sources and combine multiplicatively.

use crate::capacity::effects::SurvivalStatSource;
use crate::core::config::{SurvivalPenalties, SurvivalTier};
use crate::core::types::CapacityModifierContainer;

/// Deepest tier the value is strictly below
pub fn active_tier(value: f32, tiers: &[SurvivalTier]) -> Option<&SurvivalTier> {
    tiers
        .iter()
        .filter(|tier| value < tier.below)
        .min_by(|a, b| a.below.total_cmp(&b.below))
}

fn tier_modifiers(value: f32, tiers: &[SurvivalTier]) -> CapacityModifierContainer {
    active_tier(value, tiers)
        .map(SurvivalTier::modifiers)
        .unwrap_or_else(CapacityModifierContainer::none)
}

/// Combined survival modifier over Moving, Manipulation and Consciousness
pub fn survival_modifiers(
    stats: &dyn SurvivalStatSource,
    penalties: &SurvivalPenalties,
) -> CapacityModifierContainer {
    let hunger = tier_modifiers(stats.calorie_percent(), &penalties.calories);
    let thirst = tier_modifiers(stats.hydration_percent(), &penalties.hydration);
    let exhaustion = tier_modifiers(stats.energy_percent(), &penalties.energy);
    hunger.combine(&thirst).combine(&exhaustion)
}
