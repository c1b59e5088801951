//! Effects a damage event triggers
//!
//! Returned as descriptors; the caller hands them to its effect registry.

use crate::anatomy::region::RegionKind;
use crate::damage::info::{DamageInfo, DamageType};
use crate::damage::result::{DamageResult, EffectKind, TriggeredEffect};

/// Skin condition a cut must remove before it bleeds
pub const BLEED_SKIN_LOSS: f32 = 0.05;
/// Damage needed before a blow registers as pain
pub const PAIN_THRESHOLD: f32 = 0.01;
/// Damage needed before a blow to the head dazes
pub const DAZE_THRESHOLD: f32 = 0.05;

pub fn bleeding_severity(total: f32) -> f32 {
    (total * 0.05).clamp(0.1, 0.6)
}

pub fn pain_severity(total: f32) -> f32 {
    (total * 0.08).clamp(0.1, 0.8)
}

pub fn daze_severity(total: f32) -> f32 {
    (total * 0.15).clamp(0.2, 0.8)
}

/// Effects triggered by a resolved hit on a region
pub fn triggered_effects(
    info: &DamageInfo,
    region_name: &str,
    region_kind: RegionKind,
    result: &DamageResult,
) -> Vec<TriggeredEffect> {
    let total = result.total_damage();
    let skin_loss = result
        .damage_to("Skin")
        .map(|t| t.condition_lost)
        .unwrap_or(0.0);

    let effect = |kind: EffectKind, severity: f32| TriggeredEffect {
        kind,
        severity,
        region: region_name.to_string(),
        source: info.source.clone(),
    };

    let mut effects = Vec::new();
    if info.damage_type.is_cutting() && skin_loss > BLEED_SKIN_LOSS {
        effects.push(effect(EffectKind::Bleeding, bleeding_severity(total)));
    }
    if info.damage_type.is_external() && total > PAIN_THRESHOLD {
        effects.push(effect(EffectKind::Pain, pain_severity(total)));
    }
    if info.damage_type == DamageType::Blunt
        && region_kind == RegionKind::Head
        && total > DAZE_THRESHOLD
    {
        effects.push(effect(EffectKind::Dazed, daze_severity(total)));
    }
    effects
}
