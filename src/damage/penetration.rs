//! Layered penetration: Skin -> Muscle -> Bone
//!
//! Each layer soaks its natural absorption, then absorbs up to a fixed share
//! of what is left, bounded by its current protection. A layer at least as
//! protective as the blow reaching it stops the blow outright.

use crate::anatomy::region::{Layer, Region};
use crate::anatomy::tissue::Tissue;
use crate::core::config::EngineConfig;
use crate::damage::info::DamageType;
use crate::damage::result::DamageResult;

/// What one layer did to a blow passing through it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOutcome {
    pub absorbed: f32,
    pub condition_lost: f32,
    pub destroyed: bool,
    pub remaining: f32,
}

/// Drive `incoming` damage through a single layer
pub fn penetrate_layer(
    tissue: &mut Tissue,
    incoming: f32,
    damage_type: DamageType,
    config: &EngineConfig,
) -> LayerOutcome {
    let mut outcome = LayerOutcome {
        absorbed: 0.0,
        condition_lost: 0.0,
        destroyed: false,
        remaining: incoming,
    };
    if incoming <= 0.0 {
        return outcome;
    }

    let protection = tissue.effective_protection(damage_type);
    let remaining = (incoming - tissue.natural_absorption(damage_type)).max(0.0);
    if remaining <= 0.0 || protection <= 0.0 {
        outcome.remaining = remaining;
        return outcome;
    }

    let absorbed = (remaining * config.layer_absorption_fraction).min(protection);
    let was_destroyed = tissue.is_destroyed();
    outcome.absorbed = absorbed;
    outcome.condition_lost = tissue.lose_condition(absorbed / protection);
    outcome.destroyed = !was_destroyed && tissue.is_destroyed();
    outcome.remaining = if protection >= incoming {
        0.0
    } else {
        remaining - absorbed
    };
    outcome
}

/// Drive damage through every present layer of a region in order
///
/// Returns the damage left after the last layer.
pub fn penetrate_region(
    region: &mut Region,
    amount: f32,
    damage_type: DamageType,
    config: &EngineConfig,
    result: &mut DamageResult,
) -> f32 {
    let mut remaining = amount;
    for layer in Layer::ORDER {
        if remaining <= 0.0 {
            break;
        }
        let Some(tissue) = region.layer_mut(layer) else {
            continue;
        };
        let outcome = penetrate_layer(tissue, remaining, damage_type, config);
        result.record(&tissue.name, outcome.absorbed, outcome.condition_lost);
        if outcome.destroyed {
            result.mark_destroyed(&tissue.name);
        }
        remaining = outcome.remaining;
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anatomy::region::RegionKind;
    use crate::core::types::{Capacity, CapacityContainer};

    fn limb(skin: f32, muscle: f32, bone: f32) -> Region {
        let structure = CapacityContainer::zero().with(Capacity::Moving, 0.5);
        Region::new("Leg", RegionKind::Leg, 14.0)
            .with_skin(Tissue::skin(skin))
            .with_muscle(Tissue::muscle(muscle, structure))
            .with_bone(Tissue::bone(bone, structure))
    }

    #[test]
    fn test_weak_skin_destroyed_by_sharp() {
        let config = EngineConfig::default();
        let mut region = limb(0.3, 1.0, 1.5);
        let mut result = DamageResult::hit("Leg", 1.0);
        penetrate_region(&mut region, 2.0, DamageType::Sharp, &config, &mut result);
        assert_eq!(region.skin.as_ref().unwrap().condition(), 0.0);
        assert!(result.destroyed.contains(&"Skin".to_string()));
        assert!(result.damage_to("Muscle").is_some());
    }

    #[test]
    fn test_tough_skin_stops_blunt() {
        let config = EngineConfig::default();
        let mut region = limb(2.0, 1.0, 1.5);
        let mut result = DamageResult::hit("Leg", 1.0);
        let left = penetrate_region(&mut region, 1.5, DamageType::Blunt, &config, &mut result);
        assert_eq!(left, 0.0);
        assert_eq!(region.muscle.as_ref().unwrap().condition(), 1.0);
        assert_eq!(region.bone.as_ref().unwrap().condition(), 1.0);
    }

    #[test]
    fn test_zero_protection_layer_passes_blow_through() {
        let config = EngineConfig::default();
        let mut skin = Tissue::skin(0.0);
        let outcome = penetrate_layer(&mut skin, 1.0, DamageType::Sharp, &config);
        assert_eq!(outcome.absorbed, 0.0);
        assert_eq!(skin.condition(), 1.0);
        assert!((outcome.remaining - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_destroyed_layer_offers_no_protection() {
        let config = EngineConfig::default();
        let mut skin = Tissue::skin(0.3);
        skin.set_condition(0.0);
        let outcome = penetrate_layer(&mut skin, 1.0, DamageType::Sharp, &config);
        assert_eq!(outcome.absorbed, 0.0);
        assert!(!outcome.destroyed);
    }

    #[test]
    fn test_absorption_bounded_by_share_of_blow() {
        let config = EngineConfig::default();
        let mut muscle = Tissue::muscle(10.0, CapacityContainer::zero());
        // 10 protection vs 12 incoming: at most 70% of what gets past natural absorption
        let outcome = penetrate_layer(&mut muscle, 12.0, DamageType::Sharp, &config);
        assert!((outcome.absorbed - (12.0 - 0.03) * 0.7).abs() < 1e-4);
        assert!(outcome.remaining > 0.0);
    }
}
