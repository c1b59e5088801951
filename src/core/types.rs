//! Capacity definitions shared by every layer of the engine
//!
//! A capacity is a bounded functional output of the body. The set is fixed at
//! eight slots so containers are plain arrays indexed by the enum.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul};

/// Functional outputs of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capacity {
    Moving,
    Manipulation,
    Breathing,
    BloodPumping,
    Consciousness,
    Sight,
    Hearing,
    Digestion,
}

impl Capacity {
    pub const COUNT: usize = 8;

    /// Returns all capacities in slot order
    pub fn all() -> [Capacity; Capacity::COUNT] {
        [
            Capacity::Moving,
            Capacity::Manipulation,
            Capacity::Breathing,
            Capacity::BloodPumping,
            Capacity::Consciousness,
            Capacity::Sight,
            Capacity::Hearing,
            Capacity::Digestion,
        ]
    }

    /// Slot index inside a container
    pub fn index(self) -> usize {
        self as usize
    }

    /// Moving, Manipulation and Consciousness: what circulation loss and survival stats drain
    pub fn is_motor_or_mind(self) -> bool {
        matches!(
            self,
            Capacity::Moving | Capacity::Manipulation | Capacity::Consciousness
        )
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capacity::Moving => "Moving",
            Capacity::Manipulation => "Manipulation",
            Capacity::Breathing => "Breathing",
            Capacity::BloodPumping => "BloodPumping",
            Capacity::Consciousness => "Consciousness",
            Capacity::Sight => "Sight",
            Capacity::Hearing => "Hearing",
            Capacity::Digestion => "Digestion",
        };
        f.write_str(name)
    }
}

/// One value per capacity
///
/// Intermediate arithmetic may leave [0, 1]; the pipeline clamps at the end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityContainer {
    values: [f32; Capacity::COUNT],
}

impl CapacityContainer {
    /// All capacities at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// All capacities at the same value
    pub fn splat(value: f32) -> Self {
        Self {
            values: [value; Capacity::COUNT],
        }
    }

    /// Builder-style setter
    pub fn with(mut self, capacity: Capacity, value: f32) -> Self {
        self[capacity] = value;
        self
    }

    pub fn get(&self, capacity: Capacity) -> f32 {
        self.values[capacity.index()]
    }

    pub fn set(&mut self, capacity: Capacity, value: f32) {
        self.values[capacity.index()] = value;
    }

    /// Iterate `(capacity, value)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Capacity, f32)> + '_ {
        Capacity::all().into_iter().map(move |c| (c, self.get(c)))
    }

    /// Apply `f` to every slot
    pub fn map(mut self, f: impl Fn(Capacity, f32) -> f32) -> Self {
        for capacity in Capacity::all() {
            self[capacity] = f(capacity, self[capacity]);
        }
        self
    }

    /// Floor every slot at zero; NaN becomes zero
    pub fn clamp_non_negative(self) -> Self {
        self.map(|_, v| if v.is_nan() { 0.0 } else { v.max(0.0) })
    }

    /// Apply additive modifiers as `value *= 1 + modifier`
    pub fn apply_modifiers(self, modifiers: &CapacityModifierContainer) -> Self {
        self.map(|c, v| v * modifiers.factor(c))
    }
}

impl Index<Capacity> for CapacityContainer {
    type Output = f32;
    fn index(&self, capacity: Capacity) -> &f32 {
        &self.values[capacity.index()]
    }
}

impl IndexMut<Capacity> for CapacityContainer {
    fn index_mut(&mut self, capacity: Capacity) -> &mut f32 {
        &mut self.values[capacity.index()]
    }
}

impl Add for CapacityContainer {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.map(|c, v| v + rhs[c])
    }
}

impl Mul for CapacityContainer {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.map(|c, v| v * rhs[c])
    }
}

impl Mul<f32> for CapacityContainer {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.map(|_, v| v * rhs)
    }
}

impl std::iter::Sum for CapacityContainer {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, c| acc + c)
    }
}

/// Additive percentage modifiers (-0.20 = 20% reduction)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityModifierContainer {
    values: [f32; Capacity::COUNT],
}

impl CapacityModifierContainer {
    /// No modification
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, capacity: Capacity, modifier: f32) -> Self {
        self.values[capacity.index()] = modifier;
        self
    }

    pub fn get(&self, capacity: Capacity) -> f32 {
        self.values[capacity.index()]
    }

    /// Multiplier this modifier applies; never negative
    pub fn factor(&self, capacity: Capacity) -> f32 {
        (1.0 + self.get(capacity)).max(0.0)
    }

    /// Combine two independent sources multiplicatively
    ///
    /// -0.20 combined with -0.15 yields -0.32 (0.80 × 0.85), not -0.35.
    pub fn combine(&self, other: &Self) -> Self {
        let mut out = Self::none();
        for capacity in Capacity::all() {
            out.values[capacity.index()] = self.factor(capacity) * other.factor(capacity) - 1.0;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_count() {
        assert_eq!(Capacity::all().len(), Capacity::COUNT);
        for (i, c) in Capacity::all().iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_elementwise_add_and_mul() {
        let a = CapacityContainer::splat(0.5).with(Capacity::Sight, 1.0);
        let b = CapacityContainer::splat(0.25);
        assert_eq!((a + b)[Capacity::Moving], 0.75);
        assert_eq!((a * b)[Capacity::Sight], 0.25);
        assert_eq!((a * 2.0)[Capacity::Hearing], 1.0);
    }

    #[test]
    fn test_clamp_removes_negatives_and_nan() {
        let c = CapacityContainer::zero()
            .with(Capacity::Moving, -0.3)
            .with(Capacity::Breathing, f32::NAN)
            .with(Capacity::Sight, 0.7)
            .clamp_non_negative();
        assert_eq!(c[Capacity::Moving], 0.0);
        assert_eq!(c[Capacity::Breathing], 0.0);
        assert_eq!(c[Capacity::Sight], 0.7);
    }

    #[test]
    fn test_modifiers_combine_multiplicatively() {
        let hunger = CapacityModifierContainer::none().with(Capacity::Moving, -0.20);
        let thirst = CapacityModifierContainer::none().with(Capacity::Moving, -0.15);
        let combined = hunger.combine(&thirst);
        assert!((combined.factor(Capacity::Moving) - 0.68).abs() < 1e-6);
        assert_eq!(combined.factor(Capacity::Sight), 1.0);
    }

    #[test]
    fn test_modifier_factor_never_negative() {
        let m = CapacityModifierContainer::none().with(Capacity::Moving, -3.0);
        assert_eq!(m.factor(Capacity::Moving), 0.0);
    }
}
