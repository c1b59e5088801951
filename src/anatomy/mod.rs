//! Body structure: regions, tissues, organs, blood and the templates that build them

pub mod blood;
pub mod body;
pub mod healing;
pub mod region;
pub mod template;
pub mod tissue;

pub use blood::Blood;
pub use body::{Body, Composition};
pub use healing::{HealingInfo, HealingResult};
pub use region::{Layer, Region, RegionKind};
pub use template::BodyTemplate;
pub use tissue::{OrganKind, Tissue, TissueKind};
