//! Tissues and organs: the condition-bearing leaves of a body
//!
//! Every variant exposes the same three pure functions (base capacities,
//! condition multipliers, protection) so regions never need to know which
//! kind of material they hold.

use crate::core::types::{Capacity, CapacityContainer};
use crate::damage::info::DamageType;
use serde::{Deserialize, Serialize};

/// Share of a region's structural capacities carried by its muscle
pub const MUSCLE_STRUCTURAL_SHARE: f32 = 0.6;
/// Share of a region's structural capacities carried by its bone
pub const BONE_STRUCTURAL_SHARE: f32 = 0.4;

/// Organ identities with a fixed capacity output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganKind {
    Brain,
    Heart,
    Lung,
    Eye,
    Ear,
    Stomach,
    Liver,
    Intestines,
    Kidney,
    Other,
}

impl OrganKind {
    /// Capacity contribution of one healthy organ
    pub fn base_capacities(self) -> CapacityContainer {
        let zero = CapacityContainer::zero();
        match self {
            OrganKind::Brain => zero.with(Capacity::Consciousness, 1.0),
            OrganKind::Heart => zero.with(Capacity::BloodPumping, 1.0),
            // Paired organs each carry half
            OrganKind::Lung => zero.with(Capacity::Breathing, 0.5),
            OrganKind::Eye => zero.with(Capacity::Sight, 0.5),
            OrganKind::Ear => zero.with(Capacity::Hearing, 0.5),
            OrganKind::Stomach => zero.with(Capacity::Digestion, 0.5),
            OrganKind::Intestines => zero.with(Capacity::Digestion, 0.3),
            OrganKind::Liver => zero.with(Capacity::Digestion, 0.2),
            OrganKind::Kidney | OrganKind::Other => zero,
        }
    }

    /// Losing this organ is immediately life-threatening
    pub fn is_vital(self) -> bool {
        matches!(self, OrganKind::Brain | OrganKind::Heart | OrganKind::Lung)
    }

    /// Sits on the surface and can be struck by glancing blows
    pub fn is_external(self) -> bool {
        matches!(self, OrganKind::Eye | OrganKind::Ear)
    }

    pub fn default_toughness(self) -> f32 {
        match self {
            OrganKind::Brain | OrganKind::Heart => 8.0,
            OrganKind::Lung | OrganKind::Liver => 6.0,
            OrganKind::Stomach | OrganKind::Intestines => 5.0,
            OrganKind::Kidney | OrganKind::Other => 4.0,
            OrganKind::Eye | OrganKind::Ear => 1.0,
        }
    }
}

/// What a piece of tissue is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TissueKind {
    Skin,
    Muscle,
    Bone,
    Organ(OrganKind),
}

impl TissueKind {
    pub fn is_organ(&self) -> bool {
        matches!(self, TissueKind::Organ(_))
    }

    /// Default protection multiplier per damage type (higher = tougher)
    pub fn default_multipliers(&self) -> DamageMultipliers {
        match self {
            TissueKind::Skin => DamageMultipliers {
                blunt: 1.0,
                sharp: 1.0,
                pierce: 0.8,
                poison: 0.5,
                bleed: 0.5,
                internal: 1.0,
                burn: 0.6,
            },
            TissueKind::Muscle => DamageMultipliers {
                blunt: 1.2,
                sharp: 1.0,
                pierce: 0.8,
                poison: 0.6,
                bleed: 0.8,
                internal: 1.0,
                burn: 1.0,
            },
            // Bones shatter under impact but turn edges
            TissueKind::Bone => DamageMultipliers {
                blunt: 0.8,
                sharp: 1.5,
                pierce: 1.2,
                poison: 2.0,
                bleed: 2.0,
                internal: 1.0,
                burn: 1.5,
            },
            TissueKind::Organ(_) => DamageMultipliers::uniform(1.0),
        }
    }

    /// Damage units soaked before any condition is lost
    fn base_natural_absorption(&self, is_vital: bool) -> f32 {
        match self {
            TissueKind::Skin => 0.02,
            TissueKind::Muscle => 0.03,
            TissueKind::Bone => 0.05,
            TissueKind::Organ(_) if is_vital => 0.25,
            TissueKind::Organ(_) => 0.05,
        }
    }
}

/// Per-damage-type protection scalars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageMultipliers {
    pub blunt: f32,
    pub sharp: f32,
    pub pierce: f32,
    pub poison: f32,
    pub bleed: f32,
    pub internal: f32,
    pub burn: f32,
}

impl DamageMultipliers {
    pub fn uniform(value: f32) -> Self {
        Self {
            blunt: value,
            sharp: value,
            pierce: value,
            poison: value,
            bleed: value,
            internal: value,
            burn: value,
        }
    }

    pub fn get(&self, damage_type: DamageType) -> f32 {
        match damage_type {
            DamageType::Blunt => self.blunt,
            DamageType::Sharp => self.sharp,
            DamageType::Pierce => self.pierce,
            DamageType::Poison => self.poison,
            DamageType::Bleed => self.bleed,
            DamageType::Internal => self.internal,
            DamageType::Burn => self.burn,
        }
    }

    pub fn set(&mut self, damage_type: DamageType, value: f32) {
        let slot = match damage_type {
            DamageType::Blunt => &mut self.blunt,
            DamageType::Sharp => &mut self.sharp,
            DamageType::Pierce => &mut self.pierce,
            DamageType::Poison => &mut self.poison,
            DamageType::Bleed => &mut self.bleed,
            DamageType::Internal => &mut self.internal,
            DamageType::Burn => &mut self.burn,
        };
        *slot = value.max(0.0);
    }
}

/// Outcome of damage landing on one tissue
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TissueHit {
    /// Damage units that got past natural absorption
    pub damage: f32,
    /// Condition actually removed
    pub condition_lost: f32,
    /// Tissue reached zero on this hit
    pub destroyed: bool,
}

/// A damageable piece of a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tissue {
    pub name: String,
    pub kind: TissueKind,
    condition: f32,
    pub toughness: f32,
    pub multipliers: DamageMultipliers,
    pub is_external: bool,
    pub is_vital: bool,
    /// Percentage of the region an organ occupies for the organ draw
    pub hit_weight: f32,
    /// Capacities of the owning region that skin/muscle/bone derive from
    structural: CapacityContainer,
}

impl Tissue {
    fn new(name: impl Into<String>, kind: TissueKind, toughness: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            condition: 1.0,
            toughness: toughness.max(0.0),
            multipliers: kind.default_multipliers(),
            is_external: false,
            is_vital: false,
            hit_weight: 0.0,
            structural: CapacityContainer::zero(),
        }
    }

    pub fn skin(toughness: f32) -> Self {
        let mut tissue = Self::new("Skin", TissueKind::Skin, toughness);
        tissue.is_external = true;
        tissue
    }

    pub fn muscle(toughness: f32, structural: CapacityContainer) -> Self {
        let mut tissue = Self::new("Muscle", TissueKind::Muscle, toughness);
        tissue.structural = structural;
        tissue
    }

    pub fn bone(toughness: f32, structural: CapacityContainer) -> Self {
        let mut tissue = Self::new("Bone", TissueKind::Bone, toughness);
        tissue.structural = structural;
        tissue
    }

    /// An organ with the kind's default toughness, vitality and externality
    pub fn organ(name: impl Into<String>, organ: OrganKind, hit_weight: f32) -> Self {
        let mut tissue = Self::new(name, TissueKind::Organ(organ), organ.default_toughness());
        tissue.is_external = organ.is_external();
        tissue.is_vital = organ.is_vital();
        tissue.hit_weight = hit_weight.clamp(0.0, 100.0);
        tissue
    }

    pub fn with_toughness(mut self, toughness: f32) -> Self {
        self.toughness = toughness.max(0.0);
        self
    }

    pub fn organ_kind(&self) -> Option<OrganKind> {
        match self.kind {
            TissueKind::Organ(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn condition(&self) -> f32 {
        self.condition
    }

    pub fn is_destroyed(&self) -> bool {
        self.condition <= 0.0
    }

    pub fn is_damaged(&self) -> bool {
        self.condition < 1.0
    }

    /// Capacity contribution at full condition
    pub fn base_capacities(&self) -> CapacityContainer {
        match self.kind {
            TissueKind::Skin => CapacityContainer::zero(),
            TissueKind::Muscle => self.structural * MUSCLE_STRUCTURAL_SHARE,
            TissueKind::Bone => self.structural * BONE_STRUCTURAL_SHARE,
            TissueKind::Organ(kind) => kind.base_capacities(),
        }
    }

    /// How the current condition scales each capacity
    pub fn condition_multipliers(&self) -> CapacityContainer {
        let c = self.condition;
        match self.kind {
            TissueKind::Skin => CapacityContainer::splat(1.0),
            TissueKind::Muscle => CapacityContainer::splat(0.9 + 0.1 * c)
                .with(Capacity::Moving, c)
                .with(Capacity::Manipulation, c),
            TissueKind::Bone => CapacityContainer::splat(1.0)
                .with(Capacity::Moving, c * c)
                .with(Capacity::Manipulation, c),
            TissueKind::Organ(kind) => {
                let base = kind.base_capacities();
                CapacityContainer::splat(1.0).map(|cap, v| if base[cap] > 0.0 { c } else { v })
            }
        }
    }

    /// Protection against a damage type, independent of condition
    pub fn protection(&self, damage_type: DamageType) -> f32 {
        self.toughness * self.multipliers.get(damage_type)
    }

    /// Protection a layer currently offers to a penetrating blow
    pub fn effective_protection(&self, damage_type: DamageType) -> f32 {
        self.protection(damage_type) * self.condition
    }

    /// Damage units soaked before condition is touched
    pub fn natural_absorption(&self, damage_type: DamageType) -> f32 {
        let type_factor = match damage_type {
            DamageType::Blunt | DamageType::Sharp => 1.0,
            DamageType::Pierce => 0.8,
            DamageType::Burn => 0.6,
            DamageType::Poison | DamageType::Bleed | DamageType::Internal => 0.2,
        };
        self.kind.base_natural_absorption(self.is_vital) * type_factor
    }

    /// Land `amount` damage units directly on this tissue
    pub fn take_damage(&mut self, amount: f32, damage_type: DamageType) -> TissueHit {
        let amount = sanitize(amount);
        let after_absorption = (amount - self.natural_absorption(damage_type)).max(0.0);
        if after_absorption <= 0.0 {
            return TissueHit::default();
        }

        let protection = self.protection(damage_type);
        let protection = if protection > 0.0 { protection } else { 1.0 };
        let was_destroyed = self.is_destroyed();
        let condition_lost = self.lose_condition(after_absorption / protection);

        TissueHit {
            damage: after_absorption,
            condition_lost,
            destroyed: !was_destroyed && self.is_destroyed(),
        }
    }

    /// Remove condition directly, returning how much was actually removed
    pub fn lose_condition(&mut self, loss: f32) -> f32 {
        let before = self.condition;
        self.condition = (self.condition - sanitize(loss)).max(0.0);
        before - self.condition
    }

    /// Restore condition, capped at 1.0; returns the amount restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.condition;
        self.condition = (self.condition + sanitize(amount)).min(1.0);
        self.condition - before
    }

    /// Set condition directly (clamped), for loading saved state
    pub fn set_condition(&mut self, condition: f32) {
        self.condition = sanitize(condition).min(1.0);
    }
}

/// Negative and NaN inputs count as zero
pub(crate) fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}
