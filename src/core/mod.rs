pub mod config;
pub mod error;
pub mod types;

pub use config::{config, EngineConfig};
pub use error::{AnatomyError, Result};
pub use types::{Capacity, CapacityContainer, CapacityModifierContainer};
