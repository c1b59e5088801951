//! Damage: targeting, layered penetration, organ strikes and triggered effects

pub mod effects;
pub mod info;
pub mod penetration;
pub mod resolution;
pub mod result;
pub mod targeting;

pub use info::{BodyTarget, DamageInfo, DamageType};
pub use resolution::apply_damage;
pub use result::{DamageResult, EffectKind, TissueDamage, TriggeredEffect};
