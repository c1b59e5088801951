//! Death classification through real damage events

use arc_anatomy::anatomy::Body;
use arc_anatomy::capacity::{Influences, StaticEffects, SurvivalStats};
use arc_anatomy::damage::{BodyTarget, DamageInfo, DamageType};
use arc_anatomy::death::BodyState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(99)
}

#[test]
fn test_heart_failure_kills() {
    let mut body = Body::human();
    let result = body.apply_damage(
        &DamageInfo::new(20.0, DamageType::Internal).at_organ("Heart"),
        &mut rng(),
    );
    assert!(result.destroyed.iter().any(|p| p == "Heart"));
    assert_eq!(body.classify(&Influences::none()), BodyState::Dead);
}

#[test]
fn test_exsanguination_kills() {
    let mut body = Body::human();
    let bleed = DamageInfo::new(15.0, DamageType::Bleed).targeting(BodyTarget::Blood);
    let mut rng = rng();

    let mut states = Vec::new();
    for _ in 0..5 {
        body.apply_damage(&bleed, &mut rng);
        states.push(body.classify(&Influences::none()));
    }
    // 15% of volume per bleed: alive through 30% and 45% loss, dead past half
    assert_eq!(states[0], BodyState::Healthy);
    assert_ne!(states[2], BodyState::Dead);
    assert_eq!(states[3], BodyState::Dead);
    assert!(body.blood().is_fatal());
}

#[test]
fn test_one_lung_then_both() {
    let mut body = Body::human();
    let mut rng = rng();
    body.apply_damage(
        &DamageInfo::new(20.0, DamageType::Internal).at_organ("LeftLung"),
        &mut rng,
    );
    assert_ne!(body.classify(&Influences::none()), BodyState::Dead);

    body.apply_damage(
        &DamageInfo::new(20.0, DamageType::Internal).at_organ("RightLung"),
        &mut rng,
    );
    assert_eq!(body.classify(&Influences::none()), BodyState::Dead);
}

#[test]
fn test_pain_and_weak_pulse_is_dying() {
    let body = Body::human();
    let effects = StaticEffects::new()
        .with_modifier(arc_anatomy::Capacity::BloodPumping, -0.8)
        .with_effect("Pain", 0.85);
    let influences = Influences::new(&effects, &SurvivalStats::SATED);
    assert_eq!(body.classify(&influences), BodyState::Dying);
}

#[test]
fn test_flesh_wounds_are_survivable() {
    let mut body = Body::human();
    let mut rng = rng();
    for _ in 0..3 {
        body.apply_damage(
            &DamageInfo::new(1.0, DamageType::Sharp).targeting(BodyTarget::AnyArm),
            &mut rng,
        );
    }
    assert!(body.overall_health() < 1.0);
    assert_eq!(body.classify(&Influences::none()), BodyState::Healthy);
}
