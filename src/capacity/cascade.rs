//! Cascading failures between capacities
//!
//! Applied in a fixed order after every other stage: blood loss starves
//! circulation, weak breathing starves consciousness, and unconsciousness
//! shuts down motor control. Each rule reads the output of the one before.

use crate::core::config::EngineConfig;
use crate::core::types::{Capacity, CapacityContainer};

/// Circulation multiplier for a blood condition
///
/// 1.0 at full blood, falling linearly to 0.0 at the collapse threshold.
pub fn circulation_factor(blood_condition: f32, config: &EngineConfig) -> f32 {
    if blood_condition >= 1.0 {
        return 1.0;
    }
    let collapse = config.blood_collapse_threshold;
    let span = 1.0 - collapse;
    if span <= 0.0 {
        return if blood_condition > collapse { 1.0 } else { 0.0 };
    }
    ((blood_condition - collapse) / span).clamp(0.0, 1.0)
}

pub fn apply_blood_loss(caps: &mut CapacityContainer, blood_condition: f32, config: &EngineConfig) {
    let factor = circulation_factor(blood_condition, config);
    if factor < 1.0 {
        for capacity in Capacity::all().into_iter().filter(|c| c.is_motor_or_mind()) {
            caps[capacity] *= factor;
        }
    }
}

pub fn apply_breathing_starvation(caps: &mut CapacityContainer, config: &EngineConfig) {
    let breathing = caps[Capacity::Breathing].max(0.0);
    if breathing < config.breathing_threshold {
        caps[Capacity::Consciousness] *= breathing / config.breathing_threshold;
    }
}

pub fn apply_unconsciousness(caps: &mut CapacityContainer, config: &EngineConfig) {
    if caps[Capacity::Consciousness] < config.unconscious_threshold {
        caps[Capacity::Moving] *= config.unconscious_motor_factor;
        caps[Capacity::Manipulation] *= config.unconscious_motor_factor;
    }
}

/// Every cascade rule in order
pub fn apply_cascades(caps: &mut CapacityContainer, blood_condition: f32, config: &EngineConfig) {
    apply_blood_loss(caps, blood_condition, config);
    apply_breathing_starvation(caps, config);
    apply_unconsciousness(caps, config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circulation_factor_curve() {
        let config = EngineConfig::default();
        assert_eq!(circulation_factor(1.0, &config), 1.0);
        assert!((circulation_factor(0.75, &config) - 0.5).abs() < 1e-6);
        assert_eq!(circulation_factor(0.5, &config), 0.0);
        assert_eq!(circulation_factor(0.3, &config), 0.0);
        let near = circulation_factor(0.51, &config);
        assert!(near > 0.0 && near < 0.05);
    }

    #[test]
    fn test_blood_loss_drains_motor_and_mind_only() {
        let config = EngineConfig::default();
        let mut caps = CapacityContainer::splat(1.0);
        apply_blood_loss(&mut caps, 0.75, &config);
        for capacity in Capacity::all() {
            let expected = if capacity.is_motor_or_mind() { 0.5 } else { 1.0 };
            assert!((caps[capacity] - expected).abs() < 1e-6, "{}", capacity);
        }
    }

    #[test]
    fn test_breathing_starves_consciousness() {
        let config = EngineConfig::default();
        let mut caps = CapacityContainer::splat(1.0).with(Capacity::Breathing, 0.15);
        apply_breathing_starvation(&mut caps, &config);
        assert!((caps[Capacity::Consciousness] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unconscious_disables_motor() {
        let config = EngineConfig::default();
        let mut caps = CapacityContainer::splat(1.0).with(Capacity::Consciousness, 0.05);
        apply_unconsciousness(&mut caps, &config);
        assert!((caps[Capacity::Moving] - 0.1).abs() < 1e-6);
        assert!((caps[Capacity::Manipulation] - 0.1).abs() < 1e-6);
        assert_eq!(caps[Capacity::Sight], 1.0);
    }

    #[test]
    fn test_cascade_order_suffocation_knocks_out() {
        // Breathing failure drops consciousness, which then disables motor control
        let config = EngineConfig::default();
        let mut caps = CapacityContainer::splat(1.0).with(Capacity::Breathing, 0.02);
        apply_cascades(&mut caps, 1.0, &config);
        assert!(caps[Capacity::Consciousness] < 0.1);
        assert!((caps[Capacity::Moving] - 0.1).abs() < 1e-6);
    }
}
