//! Damage events as handed to the engine

use crate::anatomy::tissue::sanitize;
use serde::{Deserialize, Serialize};

/// What kind of harm a damage event does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Blunt,
    Sharp,
    Pierce,
    Poison,
    Bleed,
    /// Starvation, dehydration, disease: bypasses every layer
    Internal,
    Burn,
}

impl DamageType {
    pub fn all() -> [DamageType; 7] {
        [
            DamageType::Blunt,
            DamageType::Sharp,
            DamageType::Pierce,
            DamageType::Poison,
            DamageType::Bleed,
            DamageType::Internal,
            DamageType::Burn,
        ]
    }

    /// Arrives from outside the body (and hurts on the way in)
    pub fn is_external(self) -> bool {
        matches!(
            self,
            DamageType::Blunt | DamageType::Sharp | DamageType::Pierce | DamageType::Burn
        )
    }

    /// Opens the skin enough to bleed
    pub fn is_cutting(self) -> bool {
        matches!(self, DamageType::Sharp | DamageType::Pierce)
    }
}

/// Where a damage event is aimed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyTarget {
    /// Coverage-weighted draw over the whole body
    #[default]
    Random,
    /// A region by name
    Region(String),
    /// Uniform pick among arm regions
    AnyArm,
    /// Uniform pick among leg regions
    AnyLeg,
    /// An organ by name; only Internal damage reaches it directly
    Organ(String),
    /// The systemic blood pool
    Blood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    amount: f32,
    pub damage_type: DamageType,
    pub source: Option<String>,
    pub target: BodyTarget,
}

impl DamageInfo {
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount: sanitize(amount),
            damage_type,
            source: None,
            target: BodyTarget::Random,
        }
    }

    pub fn targeting(mut self, target: BodyTarget) -> Self {
        self.target = target;
        self
    }

    pub fn at_region(self, name: impl Into<String>) -> Self {
        self.targeting(BodyTarget::Region(name.into()))
    }

    pub fn at_organ(self, name: impl Into<String>) -> Self {
        self.targeting(BodyTarget::Organ(name.into()))
    }

    pub fn from_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Damage units, never negative
    pub fn amount(&self) -> f32 {
        self.amount
    }
}
