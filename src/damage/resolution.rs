//! Damage resolution: from a damage event to mutated tissue condition
//!
//! Resolution never fails. Unknown targets fall back to a random strike and
//! a blow that does nothing still produces a result.

use crate::anatomy::body::Body;
use crate::anatomy::region::{Layer, Region};
use crate::core::config::EngineConfig;
use crate::damage::effects::triggered_effects;
use crate::damage::info::{DamageInfo, DamageType};
use crate::damage::penetration::penetrate_region;
use crate::damage::result::DamageResult;
use crate::damage::targeting::{resolve_strike, Strike};
use rand::Rng;

/// Secondary draw for an organ beneath the layers
///
/// External organs are exposed to any blow that got through; internal organs
/// only to blows above the deep threshold.
pub fn draw_organ<R: Rng + ?Sized>(
    region: &Region,
    remaining: f32,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<usize> {
    if remaining <= 0.0 || region.organs.is_empty() {
        return None;
    }
    let deep = remaining > config.internal_organ_threshold;
    let roll = rng.gen_range(0.0..100.0_f32);

    let mut cumulative = 0.0;
    for (i, organ) in region.organs.iter().enumerate() {
        if !organ.is_external && !deep {
            continue;
        }
        cumulative += organ.hit_weight;
        if roll < cumulative {
            return Some(i);
        }
    }
    None
}

/// Structural layers of a region lose a fixed share when a vital organ fails
fn vital_cascade(region: &mut Region, config: &EngineConfig, result: &mut DamageResult) {
    for layer in Layer::ORDER {
        if let Some(tissue) = region.layer_mut(layer) {
            let was_destroyed = tissue.is_destroyed();
            let lost = tissue.lose_condition(config.vital_cascade_fraction);
            result.record(&tissue.name, 0.0, lost);
            if !was_destroyed && tissue.is_destroyed() {
                result.mark_destroyed(&tissue.name);
            }
        }
    }
}

fn hit_organ(
    region: &mut Region,
    index: usize,
    amount: f32,
    damage_type: DamageType,
    config: &EngineConfig,
    result: &mut DamageResult,
) {
    let organ = &mut region.organs[index];
    let hit = organ.take_damage(amount, damage_type);
    let name = organ.name.clone();
    let vital = organ.is_vital;

    result.organ_hit = Some(name.clone());
    result.record(&name, hit.damage, hit.condition_lost);
    if hit.destroyed {
        result.mark_destroyed(&name);
        if vital {
            tracing::debug!("Vital organ {} destroyed in {}", name, region.name);
            vital_cascade(region, config, result);
        }
    }
}

/// Organ draw, falling back to deep muscle when no organ is struck
fn strike_beneath<R: Rng + ?Sized>(
    region: &mut Region,
    remaining: f32,
    damage_type: DamageType,
    config: &EngineConfig,
    rng: &mut R,
    result: &mut DamageResult,
) {
    if remaining <= 0.0 {
        return;
    }
    if let Some(index) = draw_organ(region, remaining, config, rng) {
        hit_organ(region, index, remaining, damage_type, config, result);
        return;
    }
    if let Some(muscle) = region.muscle.as_mut() {
        let hit = muscle.take_damage(remaining * config.deep_tissue_fraction, damage_type);
        result.record(&muscle.name, hit.damage, hit.condition_lost);
        if hit.destroyed {
            result.mark_destroyed(&muscle.name);
        }
    }
}

fn damage_blood(body: &mut Body, info: &DamageInfo) -> DamageResult {
    let blood = body.blood_mut();
    let mut result = DamageResult::hit("Blood", blood.condition());
    let lost = blood.take_damage(info.amount());
    result.record("Blood", info.amount(), lost);
    result.health_after = blood.condition();
    result
}

fn damage_organ_directly(
    region: &mut Region,
    organ: usize,
    info: &DamageInfo,
    config: &EngineConfig,
) -> DamageResult {
    let mut result = DamageResult::hit(region.name.clone(), region.health());
    result.penetrated = info.amount();
    hit_organ(region, organ, info.amount(), info.damage_type, config, &mut result);
    result.health_after = region.health();
    result.triggered_effects = triggered_effects(info, &region.name, region.kind, &result);
    result
}

fn damage_region<R: Rng + ?Sized>(
    region: &mut Region,
    info: &DamageInfo,
    config: &EngineConfig,
    rng: &mut R,
) -> DamageResult {
    let mut result = DamageResult::hit(region.name.clone(), region.health());
    let damage_type = info.damage_type;

    let remaining = if damage_type == DamageType::Internal {
        info.amount()
    } else {
        penetrate_region(region, info.amount(), damage_type, config, &mut result)
    };
    result.penetrated = remaining;

    strike_beneath(region, remaining, damage_type, config, rng, &mut result);

    result.health_after = region.health();
    result.triggered_effects = triggered_effects(info, &region.name, region.kind, &result);
    result
}

/// Resolve one damage event against a body
pub fn apply_damage<R: Rng + ?Sized>(
    body: &mut Body,
    info: &DamageInfo,
    config: &EngineConfig,
    rng: &mut R,
) -> DamageResult {
    let Some(strike) = resolve_strike(body, info, rng) else {
        tracing::debug!("{} has no regions to damage", body.species);
        return DamageResult::default();
    };

    let result = match strike {
        Strike::Blood => damage_blood(body, info),
        Strike::Organ { region, organ } => {
            damage_organ_directly(&mut body.regions_mut()[region], organ, info, config)
        }
        Strike::Region(index) => damage_region(&mut body.regions_mut()[index], info, config, rng),
    };

    tracing::debug!(
        "{:.2} {:?} to {} {:?}: health {:.3} -> {:.3}, {} parts damaged, organ {:?}",
        info.amount(),
        info.damage_type,
        body.species,
        result.hit_part,
        result.health_before,
        result.health_after,
        result.tissue_damage.len(),
        result.organ_hit
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::info::BodyTarget;
    use crate::damage::result::EffectKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn hit(body: &mut Body, info: DamageInfo) -> DamageResult {
        apply_damage(body, &info, &EngineConfig::default(), &mut rng())
    }

    #[test]
    fn test_sharp_to_head() {
        let mut body = Body::human();
        let result = hit(&mut body, DamageInfo::new(2.0, DamageType::Sharp).at_region("Head"));
        assert_eq!(result.hit_part.as_deref(), Some("Head"));
        assert!(result.damage_to("Skin").unwrap().condition_lost > 0.0);
        assert!(result.has_effect(EffectKind::Bleeding));
        assert!(result.has_effect(EffectKind::Pain));
        assert!(result.health_after < result.health_before);
    }

    #[test]
    fn test_internal_blood_bypasses_regions() {
        let mut body = Body::human();
        let before = body.clone();
        let result = hit(
            &mut body,
            DamageInfo::new(50.0, DamageType::Internal).targeting(BodyTarget::Blood),
        );
        assert_eq!(result.hit_part.as_deref(), Some("Blood"));
        assert!((body.blood().condition() - 0.5).abs() < 1e-6);
        assert_eq!(body.regions(), before.regions());
    }

    #[test]
    fn test_internal_organ_takes_full_amount() {
        let mut body = Body::human();
        let result = hit(&mut body, DamageInfo::new(3.0, DamageType::Internal).at_organ("Liver"));
        assert_eq!(result.organ_hit.as_deref(), Some("Liver"));
        // 3.0 minus 0.01 absorption over toughness 6
        assert!((body.organ("Liver").unwrap().condition() - (1.0 - 2.99 / 6.0)).abs() < 1e-5);
        assert_eq!(body.region("Abdomen").unwrap().skin.as_ref().unwrap().condition(), 1.0);
    }

    #[test]
    fn test_destroyed_heart_cascades_to_chest() {
        let mut body = Body::human();
        let result = hit(&mut body, DamageInfo::new(20.0, DamageType::Internal).at_organ("Heart"));
        assert!(result.destroyed.contains(&"Heart".to_string()));
        let chest = body.region("Chest").unwrap();
        for layer in Layer::ORDER {
            assert!((chest.layer(layer).unwrap().condition() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stopped_blow_never_reaches_organs() {
        let mut body = Body::human();
        let result = hit(&mut body, DamageInfo::new(0.4, DamageType::Blunt).at_region("Chest"));
        assert_eq!(result.penetrated, 0.0);
        assert!(result.organ_hit.is_none());
        assert!(body.region("Chest").unwrap().organs.iter().all(|o| o.condition() == 1.0));
    }

    #[test]
    fn test_zero_damage_still_returns_result() {
        let mut body = Body::human();
        let result = hit(&mut body, DamageInfo::new(-3.0, DamageType::Sharp).at_region("LeftArm"));
        assert_eq!(result.hit_part.as_deref(), Some("LeftArm"));
        assert!(result.is_no_effect());
        assert!(result.triggered_effects.is_empty());
    }

    #[test]
    fn test_draw_organ_respects_depth() {
        let body = Body::human();
        let head = body.region("Head").unwrap();
        let config = EngineConfig::default();
        let mut rng = rng();
        for _ in 0..200 {
            if let Some(i) = draw_organ(head, 1.0, &config, &mut rng) {
                assert!(head.organs[i].is_external);
            }
        }
        let chest = body.region("Chest").unwrap();
        for _ in 0..200 {
            assert_eq!(draw_organ(chest, 4.0, &config, &mut rng), None);
        }
    }

    #[test]
    fn test_unmatched_blow_lands_in_muscle() {
        let mut body = Body::human();
        // Arms carry no organs; Internal skips the layers
        let result = hit(
            &mut body,
            DamageInfo::new(1.0, DamageType::Internal).at_region("LeftArm"),
        );
        let muscle = body.region("LeftArm").unwrap().muscle.as_ref().unwrap();
        // 50% of 1.0, minus 0.006 absorption, over toughness 0.8
        assert!((muscle.condition() - (1.0 - 0.494 / 0.8)).abs() < 1e-5);
        assert!(result.damage_to("Muscle").is_some());
    }
}
