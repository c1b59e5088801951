//! Capacity derivation from tissue condition and outside influences

pub mod cascade;
pub mod effects;
pub mod pipeline;
pub mod survival;

pub use effects::{
    EffectModifierSource, Influences, NoEffects, StaticEffects, SurvivalStatSource, SurvivalStats,
};
pub use pipeline::compute_capacities;
