//! Where a damage event lands
//!
//! Named targets resolve directly; everything else falls back to a
//! coverage-weighted draw over a flat list of regions.

use crate::anatomy::body::Body;
use crate::anatomy::region::{Region, RegionKind};
use crate::damage::info::{BodyTarget, DamageInfo, DamageType};
use rand::seq::SliceRandom;
use rand::Rng;

/// A concrete place on the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Systemic blood pool, bypassing every region
    Blood,
    /// A region index, struck from the outside in
    Region(usize),
    /// An organ reached directly, skipping its region's layers
    Organ { region: usize, organ: usize },
}

/// Coverage-weighted region pick
///
/// Destroyed regions are skipped unless every region is destroyed. Falls back
/// to the first candidate when no candidate has any coverage.
pub fn coverage_draw<R: Rng + ?Sized>(regions: &[Region], rng: &mut R) -> Option<usize> {
    let mut candidates: Vec<usize> = (0..regions.len())
        .filter(|&i| !regions[i].is_destroyed())
        .collect();
    if candidates.is_empty() {
        candidates = (0..regions.len()).collect();
    }
    let first = *candidates.first()?;

    let total: f32 = candidates.iter().map(|&i| regions[i].coverage()).sum();
    if total <= 0.0 {
        return Some(first);
    }

    let mut roll = rng.gen_range(0.0..total);
    for &i in &candidates {
        let coverage = regions[i].coverage();
        if roll < coverage {
            return Some(i);
        }
        roll -= coverage;
    }
    // Float slack at the top of the range
    candidates
        .iter()
        .rev()
        .copied()
        .find(|&i| regions[i].coverage() > 0.0)
}

fn any_of_kind<R: Rng + ?Sized>(body: &Body, kind: RegionKind, rng: &mut R) -> Option<usize> {
    let matching: Vec<usize> = body
        .regions()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.kind == kind)
        .map(|(i, _)| i)
        .collect();
    matching.choose(rng).copied()
}

fn internal_organ(body: &Body, name: &str) -> Option<Strike> {
    let region = body.organ_region_index(name)?;
    let organ = body.regions()[region]
        .organs
        .iter()
        .position(|o| o.name.eq_ignore_ascii_case(name))?;
    Some(Strike::Organ { region, organ })
}

/// Resolve a damage event's target to a concrete strike
///
/// Returns None only for a body with no regions hit by non-systemic damage.
pub fn resolve_strike<R: Rng + ?Sized>(
    body: &Body,
    info: &DamageInfo,
    rng: &mut R,
) -> Option<Strike> {
    let systemic = matches!(info.damage_type, DamageType::Bleed | DamageType::Internal);

    let direct = match &info.target {
        BodyTarget::Blood if systemic => return Some(Strike::Blood),
        BodyTarget::Organ(name) if info.damage_type == DamageType::Internal => {
            internal_organ(body, name).or_else(|| {
                tracing::warn!("Unknown organ {}, striking at random", name);
                None
            })
        }
        BodyTarget::Organ(name) => body.organ_region_index(name).map(Strike::Region),
        BodyTarget::Region(name) => body.region_index(name).map(Strike::Region).or_else(|| {
            tracing::warn!("Unknown region {}, striking at random", name);
            None
        }),
        BodyTarget::AnyArm => any_of_kind(body, RegionKind::Arm, rng).map(Strike::Region),
        BodyTarget::AnyLeg => any_of_kind(body, RegionKind::Leg, rng).map(Strike::Region),
        BodyTarget::Random | BodyTarget::Blood => None,
    };

    direct.or_else(|| coverage_draw(body.regions(), rng).map(Strike::Region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_named_region_resolves_case_insensitive() {
        let body = Body::human();
        let info = DamageInfo::new(1.0, DamageType::Sharp).at_region("head");
        assert_eq!(
            resolve_strike(&body, &info, &mut rng()),
            Some(Strike::Region(0))
        );
    }

    #[test]
    fn test_unknown_region_falls_back_to_draw() {
        let body = Body::human();
        let info = DamageInfo::new(1.0, DamageType::Sharp).at_region("Wing");
        assert!(matches!(
            resolve_strike(&body, &info, &mut rng()),
            Some(Strike::Region(_))
        ));
    }

    #[test]
    fn test_only_internal_reaches_organ_directly() {
        let body = Body::human();
        let chest = body.region_index("Chest").unwrap();

        let internal = DamageInfo::new(1.0, DamageType::Internal).at_organ("Heart");
        assert_eq!(
            resolve_strike(&body, &internal, &mut rng()),
            Some(Strike::Organ { region: chest, organ: 0 })
        );

        let sharp = DamageInfo::new(1.0, DamageType::Sharp).at_organ("Heart");
        assert_eq!(
            resolve_strike(&body, &sharp, &mut rng()),
            Some(Strike::Region(chest))
        );
    }

    #[test]
    fn test_blood_only_for_systemic_types() {
        let body = Body::human();
        let bleed = DamageInfo::new(5.0, DamageType::Bleed).targeting(BodyTarget::Blood);
        assert_eq!(resolve_strike(&body, &bleed, &mut rng()), Some(Strike::Blood));

        let blunt = DamageInfo::new(5.0, DamageType::Blunt).targeting(BodyTarget::Blood);
        assert!(matches!(
            resolve_strike(&body, &blunt, &mut rng()),
            Some(Strike::Region(_))
        ));
    }

    #[test]
    fn test_any_leg_picks_a_leg() {
        let body = Body::human();
        let info = DamageInfo::new(1.0, DamageType::Blunt).targeting(BodyTarget::AnyLeg);
        let mut rng = rng();
        for _ in 0..50 {
            match resolve_strike(&body, &info, &mut rng) {
                Some(Strike::Region(i)) => assert_eq!(body.regions()[i].kind, RegionKind::Leg),
                other => panic!("unexpected strike {:?}", other),
            }
        }
    }

    #[test]
    fn test_draw_skips_destroyed_regions() {
        let mut body = Body::human();
        for region in body.regions_mut().iter_mut().skip(1) {
            for part in region.parts_mut() {
                part.set_condition(0.0);
            }
        }
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(coverage_draw(body.regions(), &mut rng), Some(0));
        }
    }

    #[test]
    fn test_zero_coverage_picks_first() {
        let regions = vec![
            Region::new("A", RegionKind::Other, 0.0),
            Region::new("B", RegionKind::Other, 0.0),
        ];
        assert_eq!(coverage_draw(&regions, &mut rng()), Some(0));
        assert_eq!(coverage_draw(&[], &mut rng()), None);
    }
}
