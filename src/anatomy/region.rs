//! Body regions: coverage-weighted containers of tissue layers and organs

use crate::anatomy::tissue::{OrganKind, Tissue, TissueKind};
use crate::core::types::CapacityContainer;
use serde::{Deserialize, Serialize};

/// Gross anatomical role of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    Head,
    Torso,
    Abdomen,
    Arm,
    Leg,
    Other,
}

/// The three penetration layers, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Skin,
    Muscle,
    Bone,
}

impl Layer {
    pub const ORDER: [Layer; 3] = [Layer::Skin, Layer::Muscle, Layer::Bone];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub kind: RegionKind,
    /// Percentage of the body's hit probability this region claims
    coverage: f32,
    pub skin: Option<Tissue>,
    pub muscle: Option<Tissue>,
    pub bone: Option<Tissue>,
    pub organs: Vec<Tissue>,
}

impl Region {
    pub fn new(name: impl Into<String>, kind: RegionKind, coverage: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            coverage: clamp_coverage(coverage),
            skin: None,
            muscle: None,
            bone: None,
            organs: Vec::new(),
        }
    }

    pub fn with_skin(mut self, skin: Tissue) -> Self {
        self.skin = Some(skin);
        self
    }

    pub fn with_muscle(mut self, muscle: Tissue) -> Self {
        self.muscle = Some(muscle);
        self
    }

    pub fn with_bone(mut self, bone: Tissue) -> Self {
        self.bone = Some(bone);
        self
    }

    pub fn with_organ(mut self, organ: Tissue) -> Self {
        self.organs.push(organ);
        self
    }

    pub fn coverage(&self) -> f32 {
        self.coverage
    }

    pub fn layer(&self, layer: Layer) -> Option<&Tissue> {
        match layer {
            Layer::Skin => self.skin.as_ref(),
            Layer::Muscle => self.muscle.as_ref(),
            Layer::Bone => self.bone.as_ref(),
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> Option<&mut Tissue> {
        match layer {
            Layer::Skin => self.skin.as_mut(),
            Layer::Muscle => self.muscle.as_mut(),
            Layer::Bone => self.bone.as_mut(),
        }
    }

    /// Structural layers followed by organs
    pub fn parts(&self) -> impl Iterator<Item = &Tissue> {
        self.skin
            .iter()
            .chain(self.muscle.iter())
            .chain(self.bone.iter())
            .chain(self.organs.iter())
    }

    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut Tissue> {
        self.skin
            .iter_mut()
            .chain(self.muscle.iter_mut())
            .chain(self.bone.iter_mut())
            .chain(self.organs.iter_mut())
    }

    pub fn part_count(&self) -> usize {
        self.parts().count()
    }

    pub fn part(&self, name: &str) -> Option<&Tissue> {
        self.parts().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn part_mut(&mut self, name: &str) -> Option<&mut Tissue> {
        self.parts_mut().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn organ(&self, name: &str) -> Option<&Tissue> {
        self.organs.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn has_organ(&self, name: &str) -> bool {
        self.organ(name).is_some()
    }

    pub fn organs_of(&self, kind: OrganKind) -> impl Iterator<Item = &Tissue> {
        self.organs
            .iter()
            .filter(move |t| t.kind == TissueKind::Organ(kind))
    }

    /// Mean condition of every part; an empty region counts as whole
    pub fn health(&self) -> f32 {
        let count = self.part_count();
        if count == 0 {
            return 1.0;
        }
        self.parts().map(|t| t.condition()).sum::<f32>() / count as f32
    }

    pub fn is_damaged(&self) -> bool {
        self.parts().any(|t| t.is_damaged())
    }

    /// Every part is at zero condition
    pub fn is_destroyed(&self) -> bool {
        self.part_count() > 0 && self.parts().all(|t| t.is_destroyed())
    }

    /// Summed base output scaled by the mean condition multiplier of all parts
    ///
    /// Averaging keeps one ruined organ from zeroing what healthy neighbours provide.
    pub fn local_capacities(&self) -> CapacityContainer {
        let count = self.part_count();
        if count == 0 {
            return CapacityContainer::zero();
        }
        let base: CapacityContainer = self.parts().map(|t| t.base_capacities()).sum();
        let multipliers: CapacityContainer = self.parts().map(|t| t.condition_multipliers()).sum();
        base * (multipliers * (1.0 / count as f32))
    }
}

fn clamp_coverage(coverage: f32) -> f32 {
    if coverage.is_nan() {
        0.0
    } else {
        coverage.clamp(0.0, 100.0)
    }
}
