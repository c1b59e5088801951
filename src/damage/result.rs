//! Structured outcome of one damage event

use serde::{Deserialize, Serialize};

/// Condition lost by one part during a damage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueDamage {
    pub part: String,
    /// Damage units the part took after natural absorption
    pub damage: f32,
    pub condition_lost: f32,
}

/// Status effects a damage event asks the caller to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Bleeding,
    Pain,
    Dazed,
}

impl EffectKind {
    /// Registry name the effect is known by
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Bleeding => "Bleeding",
            EffectKind::Pain => "Pain",
            EffectKind::Dazed => "Dazed",
        }
    }
}

/// Pending effect descriptor, data only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredEffect {
    pub kind: EffectKind,
    pub severity: f32,
    pub region: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageResult {
    /// Region struck, or "Blood" for systemic damage; None on a body with no regions
    pub hit_part: Option<String>,
    pub health_before: f32,
    pub health_after: f32,
    pub tissue_damage: Vec<TissueDamage>,
    pub organ_hit: Option<String>,
    /// Damage left after the last structural layer
    pub penetrated: f32,
    pub destroyed: Vec<String>,
    pub triggered_effects: Vec<TriggeredEffect>,
}

impl DamageResult {
    pub fn hit(part: impl Into<String>, health_before: f32) -> Self {
        Self {
            hit_part: Some(part.into()),
            health_before,
            health_after: health_before,
            ..Default::default()
        }
    }

    /// Sum of damage units taken by every part
    pub fn total_damage(&self) -> f32 {
        self.tissue_damage.iter().map(|t| t.damage).sum()
    }

    pub fn damage_to(&self, part: &str) -> Option<&TissueDamage> {
        self.tissue_damage
            .iter()
            .find(|t| t.part.eq_ignore_ascii_case(part))
    }

    pub fn effect(&self, kind: EffectKind) -> Option<&TriggeredEffect> {
        self.triggered_effects.iter().find(|e| e.kind == kind)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effect(kind).is_some()
    }

    /// Nothing on the body changed
    pub fn is_no_effect(&self) -> bool {
        self.tissue_damage.iter().all(|t| t.condition_lost <= 0.0)
            && (self.health_before - self.health_after).abs() <= f32::EPSILON
    }

    /// Record a part's loss, folding repeated hits on the same part together
    pub(crate) fn record(&mut self, part: &str, damage: f32, condition_lost: f32) {
        if damage <= 0.0 && condition_lost <= 0.0 {
            return;
        }
        match self.tissue_damage.iter_mut().find(|t| t.part == part) {
            Some(entry) => {
                entry.damage += damage;
                entry.condition_lost += condition_lost;
            }
            None => self.tissue_damage.push(TissueDamage {
                part: part.to_string(),
                damage,
                condition_lost,
            }),
        }
    }

    pub(crate) fn mark_destroyed(&mut self, part: &str) {
        if !self.destroyed.iter().any(|p| p == part) {
            self.destroyed.push(part.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_merges_same_part() {
        let mut result = DamageResult::hit("LeftLeg", 1.0);
        result.record("Muscle", 0.3, 0.3);
        result.record("Muscle", 0.2, 0.2);
        result.record("Bone", 0.0, 0.0);
        assert_eq!(result.tissue_damage.len(), 1);
        assert!((result.total_damage() - 0.5).abs() < 1e-6);
        assert!(result.damage_to("muscle").is_some());
    }

    #[test]
    fn test_default_result_has_no_effect() {
        let result = DamageResult::hit("Head", 1.0);
        assert!(result.is_no_effect());
        assert!(!result.has_effect(EffectKind::Pain));
    }
}
