//! Arc Anatomy - layered body simulation
//!
//! Regions hold tissues and organs; tissue condition drives capacities;
//! capacities and composition drive abilities; capacities and organs decide
//! whether a body lives.

pub mod abilities;
pub mod anatomy;
pub mod capacity;
pub mod core;
pub mod damage;
pub mod death;
pub mod report;

pub use anatomy::{Body, BodyTemplate, HealingInfo};
pub use capacity::Influences;
pub use crate::core::types::{Capacity, CapacityContainer};
pub use damage::{BodyTarget, DamageInfo, DamageResult, DamageType};
pub use death::BodyState;
