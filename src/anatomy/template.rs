//! Body templates: the factory that builds a creature's regions, tissues and organs
//!
//! The human layout is built in; other creatures load from TOML in
//! `data/templates/`. A template is validated before any body is built from it.

use crate::anatomy::blood::{Blood, NOMINAL_BLOOD_VOLUME_ML};
use crate::anatomy::body::{Body, Composition};
use crate::anatomy::region::{Region, RegionKind};
use crate::anatomy::tissue::{OrganKind, Tissue};
use crate::core::error::{AnatomyError, Result};
use crate::core::types::{Capacity, CapacityContainer};
use crate::damage::info::DamageType;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slack allowed when checking that coverages sum to at most 100
const COVERAGE_EPSILON: f32 = 0.01;

/// One skin, muscle or bone layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub toughness: f32,
    #[serde(default)]
    pub multipliers: AHashMap<DamageType, f32>,
}

impl LayerSpec {
    pub fn new(toughness: f32) -> Self {
        Self {
            toughness,
            multipliers: AHashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganSpec {
    pub name: String,
    pub kind: OrganKind,
    pub hit_weight: f32,
    #[serde(default)]
    pub toughness: Option<f32>,
    #[serde(default)]
    pub external: Option<bool>,
    #[serde(default)]
    pub vital: Option<bool>,
    #[serde(default)]
    pub multipliers: AHashMap<DamageType, f32>,
}

impl OrganSpec {
    pub fn new(name: &str, kind: OrganKind, hit_weight: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            hit_weight,
            toughness: None,
            external: None,
            vital: None,
            multipliers: AHashMap::new(),
        }
    }

    fn build(&self) -> Tissue {
        let mut organ = Tissue::organ(self.name.clone(), self.kind, self.hit_weight);
        if let Some(toughness) = self.toughness {
            organ = organ.with_toughness(toughness);
        }
        if let Some(external) = self.external {
            organ.is_external = external;
        }
        if let Some(vital) = self.vital {
            organ.is_vital = vital;
        }
        apply_overrides(&mut organ, &self.multipliers);
        organ
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTemplate {
    pub name: String,
    pub kind: RegionKind,
    pub coverage: f32,
    /// Capacities carried by the region's muscle and bone
    #[serde(default)]
    pub capacities: AHashMap<Capacity, f32>,
    #[serde(default)]
    pub skin: Option<LayerSpec>,
    #[serde(default)]
    pub muscle: Option<LayerSpec>,
    #[serde(default)]
    pub bone: Option<LayerSpec>,
    #[serde(default)]
    pub organs: Vec<OrganSpec>,
}

impl RegionTemplate {
    fn new(name: &str, kind: RegionKind, coverage: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            coverage,
            capacities: AHashMap::new(),
            skin: None,
            muscle: None,
            bone: None,
            organs: Vec::new(),
        }
    }

    fn layers(mut self, skin: f32, muscle: f32, bone: Option<f32>) -> Self {
        self.skin = Some(LayerSpec::new(skin));
        self.muscle = Some(LayerSpec::new(muscle));
        self.bone = bone.map(LayerSpec::new);
        self
    }

    fn capacity(mut self, capacity: Capacity, value: f32) -> Self {
        self.capacities.insert(capacity, value);
        self
    }

    fn organ(mut self, name: &str, kind: OrganKind, hit_weight: f32) -> Self {
        self.organs.push(OrganSpec::new(name, kind, hit_weight));
        self
    }

    fn structural(&self) -> CapacityContainer {
        self.capacities
            .iter()
            .fold(CapacityContainer::zero(), |acc, (c, v)| acc.with(*c, *v))
    }

    fn build(&self) -> Region {
        let structural = self.structural();
        let mut region = Region::new(self.name.clone(), self.kind, self.coverage);
        if let Some(spec) = &self.skin {
            let mut skin = Tissue::skin(spec.toughness);
            apply_overrides(&mut skin, &spec.multipliers);
            region = region.with_skin(skin);
        }
        if let Some(spec) = &self.muscle {
            let mut muscle = Tissue::muscle(spec.toughness, structural);
            apply_overrides(&mut muscle, &spec.multipliers);
            region = region.with_muscle(muscle);
        }
        if let Some(spec) = &self.bone {
            let mut bone = Tissue::bone(spec.toughness, structural);
            apply_overrides(&mut bone, &spec.multipliers);
            region = region.with_bone(bone);
        }
        for organ in &self.organs {
            region = region.with_organ(organ.build());
        }
        region
    }
}

fn apply_overrides(tissue: &mut Tissue, overrides: &AHashMap<DamageType, f32>) {
    for (damage_type, value) in overrides {
        tissue.multipliers.set(*damage_type, *value);
    }
}

/// Complete description of a creature's body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub species: String,
    /// Skeleton, organs and everything that is neither fat nor muscle (kg)
    pub base_mass: f32,
    pub fat_mass: f32,
    pub muscle_mass: f32,
    #[serde(default)]
    pub base_cold_resistance: f32,
    #[serde(default = "default_blood_volume")]
    pub blood_volume_ml: f32,
    pub regions: Vec<RegionTemplate>,
}

fn default_blood_volume() -> f32 {
    NOMINAL_BLOOD_VOLUME_ML
}

impl BodyTemplate {
    /// Adult human, 70 kg
    pub fn human() -> Self {
        use Capacity::*;
        use OrganKind::*;
        use RegionKind::*;

        Self {
            species: "Human".to_string(),
            base_mass: 39.0,
            fat_mass: 10.0,
            muscle_mass: 21.0,
            base_cold_resistance: 0.0,
            blood_volume_ml: NOMINAL_BLOOD_VOLUME_ML,
            regions: vec![
                RegionTemplate::new("Head", RegionKind::Head, 8.0)
                    .layers(0.3, 0.3, Some(1.5))
                    .organ("Brain", Brain, 60.0)
                    .organ("LeftEye", Eye, 4.0)
                    .organ("RightEye", Eye, 4.0)
                    .organ("LeftEar", Ear, 3.0)
                    .organ("RightEar", Ear, 3.0),
                RegionTemplate::new("Chest", Torso, 22.0)
                    .layers(0.4, 1.0, Some(1.5))
                    .organ("Heart", Heart, 15.0)
                    .organ("LeftLung", Lung, 25.0)
                    .organ("RightLung", Lung, 25.0),
                RegionTemplate::new("Abdomen", RegionKind::Abdomen, 18.0)
                    .layers(0.4, 0.8, None)
                    .organ("Stomach", Stomach, 20.0)
                    .organ("Liver", Liver, 20.0)
                    .organ("Intestines", Intestines, 30.0)
                    .organ("LeftKidney", Kidney, 8.0)
                    .organ("RightKidney", Kidney, 8.0),
                RegionTemplate::new("LeftArm", Arm, 12.0)
                    .layers(0.3, 0.8, Some(1.2))
                    .capacity(Manipulation, 0.5),
                RegionTemplate::new("RightArm", Arm, 12.0)
                    .layers(0.3, 0.8, Some(1.2))
                    .capacity(Manipulation, 0.5),
                RegionTemplate::new("LeftLeg", Leg, 14.0)
                    .layers(0.3, 1.0, Some(1.5))
                    .capacity(Moving, 0.5),
                RegionTemplate::new("RightLeg", Leg, 14.0)
                    .layers(0.3, 1.0, Some(1.5))
                    .capacity(Moving, 0.5),
            ],
        }
    }

    /// Parse and validate a template from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let template: BodyTemplate = toml::from_str(content)?;
        template.validate()?;
        Ok(template)
    }

    /// Load a template file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AnatomyError::InvalidTemplate(msg));

        if self.regions.is_empty() {
            return invalid(format!("{} has no regions", self.species));
        }

        let masses = [self.base_mass, self.fat_mass, self.muscle_mass];
        if masses.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return invalid(format!("{} has a negative or non-finite mass", self.species));
        }

        let mut seen = Vec::with_capacity(self.regions.len());
        let mut organs_seen: Vec<&str> = Vec::new();
        let mut total_coverage = 0.0;
        for region in &self.regions {
            if !(0.0..=100.0).contains(&region.coverage) {
                return invalid(format!(
                    "region {} coverage {} outside [0, 100]",
                    region.name, region.coverage
                ));
            }
            if seen.iter().any(|n: &&str| n.eq_ignore_ascii_case(&region.name)) {
                return invalid(format!("duplicate region {}", region.name));
            }
            seen.push(region.name.as_str());
            total_coverage += region.coverage;

            for organ in &region.organs {
                if organs_seen.iter().any(|n| n.eq_ignore_ascii_case(&organ.name)) {
                    return invalid(format!("duplicate organ {} in {}", organ.name, region.name));
                }
                organs_seen.push(organ.name.as_str());
            }

            let organ_weight: f32 = region.organs.iter().map(|o| o.hit_weight).sum();
            if organ_weight > 100.0 + COVERAGE_EPSILON {
                return invalid(format!(
                    "organs of {} claim {}% of the region",
                    region.name, organ_weight
                ));
            }
        }

        if total_coverage <= 0.0 || total_coverage > 100.0 + COVERAGE_EPSILON {
            return invalid(format!(
                "{} region coverage sums to {}, expected (0, 100]",
                self.species, total_coverage
            ));
        }

        Ok(())
    }

    /// Build a fresh, undamaged body
    pub fn build(&self) -> Body {
        let regions = self.regions.iter().map(RegionTemplate::build).collect();
        let composition = Composition::new(self.base_mass, self.fat_mass, self.muscle_mass);
        Body::new(
            self.species.clone(),
            regions,
            Blood::new(self.blood_volume_ml),
            composition,
            self.base_cold_resistance,
        )
    }
}
