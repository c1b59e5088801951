//! Healing distribution
//!
//! Healing prefers damaged parts: a named part heals directly, a named region
//! spreads across its damaged parts, and untargeted healing picks damaged
//! regions at random until the amount is spent.

use crate::anatomy::body::Body;
use crate::anatomy::region::Region;
use crate::anatomy::tissue::sanitize;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Amounts below this are treated as spent
const HEAL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingInfo {
    pub amount: f32,
    /// Treatment quality multiplier (1.0 = ordinary rest)
    pub quality: f32,
    /// Region, tissue/organ name, or "Blood"
    pub target: Option<String>,
}

impl HealingInfo {
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            quality: 1.0,
            target: None,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn targeting(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Condition this healing can restore in total
    pub fn effective_amount(&self) -> f32 {
        sanitize(sanitize(self.amount) * sanitize(self.quality))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealingResult {
    /// Condition restored per part, in application order
    pub restored: Vec<(String, f32)>,
}

impl HealingResult {
    pub fn total(&self) -> f32 {
        self.restored.iter().map(|(_, v)| v).sum()
    }

    fn record(&mut self, name: &str, amount: f32) {
        if amount > 0.0 {
            self.restored.push((name.to_string(), amount));
        }
    }
}

pub fn heal<R: Rng + ?Sized>(body: &mut Body, info: &HealingInfo, rng: &mut R) -> HealingResult {
    let mut result = HealingResult::default();
    let amount = info.effective_amount();
    if amount <= 0.0 {
        return result;
    }

    match info.target.as_deref() {
        Some(name) if name.eq_ignore_ascii_case("Blood") => {
            let restored = body.blood_mut().heal(amount);
            result.record("Blood", restored);
        }
        Some(name) => {
            if let Some(idx) = body.region_index(name) {
                heal_region(&mut body.regions_mut()[idx], amount, &mut result);
            } else if let Some(part) = body.part_mut(name) {
                let restored = part.heal(amount);
                let part_name = part.name.clone();
                result.record(&part_name, restored);
            } else {
                tracing::warn!("Heal target {} not found, distributing at random", name);
                heal_random(body, amount, rng, &mut result);
            }
        }
        None => heal_random(body, amount, rng, &mut result),
    }

    tracing::debug!(
        "Healed {:.3} of {:.3} across {} parts",
        result.total(),
        amount,
        result.restored.len()
    );
    result
}

/// Spread `amount` evenly over damaged parts, redistributing what capped parts
/// could not use. Returns what is left.
fn heal_region(region: &mut Region, mut amount: f32, result: &mut HealingResult) -> f32 {
    loop {
        let damaged = region.parts().filter(|t| t.is_damaged()).count();
        if damaged == 0 || amount <= HEAL_EPSILON {
            return amount;
        }
        let share = amount / damaged as f32;
        let before = amount;
        for part in region.parts_mut().filter(|t| t.is_damaged()) {
            let restored = part.heal(share);
            amount -= restored;
            result.record(&part.name, restored);
        }
        if amount.is_nan() || amount >= before {
            return amount;
        }
    }
}

fn heal_random<R: Rng + ?Sized>(
    body: &mut Body,
    mut amount: f32,
    rng: &mut R,
    result: &mut HealingResult,
) {
    while amount > HEAL_EPSILON {
        let damaged: Vec<usize> = body
            .regions()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_damaged())
            .map(|(i, _)| i)
            .collect();
        if damaged.is_empty() {
            break;
        }
        let idx = damaged[rng.gen_range(0..damaged.len())];
        amount = heal_region(&mut body.regions_mut()[idx], amount, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wounded() -> Body {
        let mut body = Body::human();
        let arm = body.region_mut("LeftArm").unwrap();
        arm.skin.as_mut().unwrap().set_condition(0.5);
        arm.muscle.as_mut().unwrap().set_condition(0.9);
        body
    }

    #[test]
    fn test_effective_amount_uses_quality() {
        let info = HealingInfo::new(0.4).with_quality(0.5);
        assert!((info.effective_amount() - 0.2).abs() < 1e-6);
        assert_eq!(HealingInfo::new(-1.0).effective_amount(), 0.0);
    }

    #[test]
    fn test_named_part_heals_exact_amount() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut body = wounded();
        let result = heal(&mut body, &HealingInfo::new(0.2).targeting("Skin"), &mut rng);
        assert!((result.total() - 0.2).abs() < 1e-6);
        let skin = body.region("LeftArm").unwrap().skin.as_ref().unwrap();
        assert!((skin.condition() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_region_heal_redistributes_overflow() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut body = wounded();
        // 0.4 split two ways; muscle caps at 0.1, skin takes the rest
        let result = heal(&mut body, &HealingInfo::new(0.4).targeting("LeftArm"), &mut rng);
        assert!((result.total() - 0.4).abs() < 1e-5);
        let arm = body.region("LeftArm").unwrap();
        assert_eq!(arm.muscle.as_ref().unwrap().condition(), 1.0);
        assert!((arm.skin.as_ref().unwrap().condition() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_random_heal_finds_damaged_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut body = wounded();
        let result = heal(&mut body, &HealingInfo::new(5.0), &mut rng);
        assert!((result.total() - 0.6).abs() < 1e-5);
        assert!(!body.region("LeftArm").unwrap().is_damaged());
    }

    #[test]
    fn test_heal_on_pristine_body_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut body = Body::human();
        let result = heal(&mut body, &HealingInfo::new(1.0), &mut rng);
        assert!(result.restored.is_empty());
        assert_eq!(body, Body::human());
    }

    #[test]
    fn test_non_finite_heal_terminates() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut body = Body::human();
        body.part_mut("LeftLung").unwrap().set_condition(0.5);

        let info = HealingInfo::new(f32::INFINITY).with_quality(0.0).targeting("Chest");
        assert_eq!(info.effective_amount(), 0.0);
        let result = heal(&mut body, &info, &mut rng);
        assert!(result.restored.is_empty());
        assert_eq!(body.organ("LeftLung").unwrap().condition(), 0.5);

        let unbounded = HealingInfo::new(f32::INFINITY).targeting("Chest");
        let restored = heal(&mut body, &unbounded, &mut rng);
        assert!((restored.total() - 0.5).abs() < 1e-6);
        assert_eq!(body.organ("LeftLung").unwrap().condition(), 1.0);
    }

    #[test]
    fn test_blood_heal() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut body = Body::human();
        body.blood_mut().set_condition(0.6);
        heal(&mut body, &HealingInfo::new(0.3).targeting("Blood"), &mut rng);
        assert!((body.blood().condition() - 0.9).abs() < 1e-6);
    }
}
