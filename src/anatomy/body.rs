//! The body: aggregate root owning regions, blood and composition
//!
//! A body is built once from a template and mutated in place for its owner's
//! lifetime. Nothing derived from it is cached; every query recomputes from
//! current tissue condition.

use crate::abilities::{self, Abilities};
use crate::anatomy::blood::Blood;
use crate::anatomy::healing::{self, HealingInfo, HealingResult};
use crate::anatomy::region::{Region, RegionKind};
use crate::anatomy::template::BodyTemplate;
use crate::anatomy::tissue::{sanitize, OrganKind, Tissue, TissueKind};
use crate::capacity::{compute_capacities, Influences};
use crate::core::config::config;
use crate::core::types::CapacityContainer;
use crate::damage::{self, DamageInfo, DamageResult};
use crate::death::{classify, BodyState};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mass breakdown of a body (kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    base_mass: f32,
    fat_mass: f32,
    muscle_mass: f32,
}

impl Composition {
    pub fn new(base_mass: f32, fat_mass: f32, muscle_mass: f32) -> Self {
        Self {
            base_mass: sanitize(base_mass),
            fat_mass: sanitize(fat_mass),
            muscle_mass: sanitize(muscle_mass),
        }
    }

    pub fn base_mass(&self) -> f32 {
        self.base_mass
    }

    pub fn fat_mass(&self) -> f32 {
        self.fat_mass
    }

    pub fn muscle_mass(&self) -> f32 {
        self.muscle_mass
    }

    pub fn weight(&self) -> f32 {
        self.base_mass + self.fat_mass + self.muscle_mass
    }

    /// Fat as a fraction of weight (0.0-1.0)
    pub fn fat_percent(&self) -> f32 {
        self.fraction(self.fat_mass)
    }

    /// Muscle as a fraction of weight (0.0-1.0)
    pub fn muscle_percent(&self) -> f32 {
        self.fraction(self.muscle_mass)
    }

    fn fraction(&self, mass: f32) -> f32 {
        let weight = self.weight();
        if weight > 0.0 {
            mass / weight
        } else {
            0.0
        }
    }

    /// Gain (positive) or burn (negative) fat; never below zero
    pub fn add_fat(&mut self, kg: f32) {
        if kg.is_finite() {
            self.fat_mass = (self.fat_mass + kg).max(0.0);
        }
    }

    /// Build (positive) or waste (negative) muscle; never below zero
    pub fn add_muscle(&mut self, kg: f32) {
        if kg.is_finite() {
            self.muscle_mass = (self.muscle_mass + kg).max(0.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub species: String,
    regions: Vec<Region>,
    blood: Blood,
    composition: Composition,
    /// Species cold resistance before fat insulation
    pub base_cold_resistance: f32,
}

impl Body {
    pub fn new(
        species: String,
        regions: Vec<Region>,
        blood: Blood,
        composition: Composition,
        base_cold_resistance: f32,
    ) -> Self {
        Self {
            species,
            regions,
            blood,
            composition,
            base_cold_resistance,
        }
    }

    /// Fresh adult human
    pub fn human() -> Self {
        BodyTemplate::human().build()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut [Region] {
        &mut self.regions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn region_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn region_index(&self, name: &str) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Index of the region holding the named organ
    pub fn organ_region_index(&self, organ: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.has_organ(organ))
    }

    pub fn regions_of(&self, kind: RegionKind) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    pub fn organ(&self, name: &str) -> Option<&Tissue> {
        self.regions.iter().find_map(|r| r.organ(name))
    }

    /// Any tissue or organ by name
    ///
    /// Structural names repeat across regions, so a damaged match wins over
    /// the first match in region order.
    pub fn part_mut(&mut self, name: &str) -> Option<&mut Tissue> {
        let idx = self
            .regions
            .iter()
            .position(|r| r.part(name).is_some_and(|t| t.is_damaged()))
            .or_else(|| self.regions.iter().position(|r| r.part(name).is_some()))?;
        self.regions[idx].part_mut(name)
    }

    pub fn organs_of(&self, kind: OrganKind) -> impl Iterator<Item = &Tissue> {
        self.regions
            .iter()
            .flat_map(|r| r.organs.iter())
            .filter(move |t| t.kind == TissueKind::Organ(kind))
    }

    pub fn blood(&self) -> &Blood {
        &self.blood
    }

    pub fn blood_mut(&mut self) -> &mut Blood {
        &mut self.blood
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    pub fn weight(&self) -> f32 {
        self.composition.weight()
    }

    /// Coverage-weighted mean health of all regions
    pub fn overall_health(&self) -> f32 {
        let total: f32 = self.regions.iter().map(|r| r.coverage()).sum();
        if total <= 0.0 {
            return 1.0;
        }
        self.regions
            .iter()
            .map(|r| r.health() * r.coverage())
            .sum::<f32>()
            / total
    }

    // === OUTBOUND CONTRACT ===

    /// Resolve a damage event against this body
    pub fn apply_damage<R: Rng + ?Sized>(
        &mut self,
        info: &DamageInfo,
        rng: &mut R,
    ) -> DamageResult {
        damage::apply_damage(self, info, config(), rng)
    }

    pub fn heal<R: Rng + ?Sized>(&mut self, info: &HealingInfo, rng: &mut R) -> HealingResult {
        healing::heal(self, info, rng)
    }

    /// Fresh capacity snapshot
    pub fn capacities(&self, influences: &Influences) -> CapacityContainer {
        compute_capacities(self, influences, config())
    }

    pub fn calculate_strength(&self, influences: &Influences) -> f32 {
        abilities::strength(self, &self.capacities(influences))
    }

    pub fn calculate_speed(&self, influences: &Influences) -> f32 {
        abilities::speed(self, &self.capacities(influences))
    }

    pub fn calculate_vitality(&self, influences: &Influences) -> f32 {
        abilities::vitality(&self.capacities(influences))
    }

    pub fn calculate_perception(&self, influences: &Influences) -> f32 {
        abilities::perception(&self.capacities(influences))
    }

    pub fn calculate_cold_resistance(&self) -> f32 {
        abilities::cold_resistance(self)
    }

    /// All five abilities from one capacity computation
    pub fn abilities(&self, influences: &Influences) -> Abilities {
        Abilities::derive(self, &self.capacities(influences))
    }

    pub fn classify(&self, influences: &Influences) -> BodyState {
        classify(self, influences, config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_is_sum_of_masses() {
        let body = Body::human();
        let c = body.composition();
        assert_eq!(body.weight(), c.base_mass() + c.fat_mass() + c.muscle_mass());
    }

    #[test]
    fn test_masses_never_negative() {
        let mut body = Body::human();
        body.composition_mut().add_fat(-500.0);
        body.composition_mut().add_muscle(-500.0);
        assert_eq!(body.composition().fat_mass(), 0.0);
        assert_eq!(body.composition().muscle_mass(), 0.0);
        assert_eq!(body.weight(), body.composition().base_mass());
    }

    #[test]
    fn test_zero_weight_percentages() {
        let c = Composition::new(0.0, 0.0, 0.0);
        assert_eq!(c.fat_percent(), 0.0);
        assert_eq!(c.muscle_percent(), 0.0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let body = Body::human();
        assert!(body.region("head").is_some());
        assert!(body.organ("HEART").is_some());
        assert_eq!(body.organ_region_index("Heart"), body.region_index("Chest"));
    }

    #[test]
    fn test_organs_of_kind() {
        let body = Body::human();
        assert_eq!(body.organs_of(OrganKind::Lung).count(), 2);
        assert_eq!(body.organs_of(OrganKind::Brain).count(), 1);
    }

    #[test]
    fn test_overall_health_pristine() {
        assert!((Body::human().overall_health() - 1.0).abs() < 1e-6);
    }
}
