//! Serializable snapshot of a body's state

use crate::abilities::Abilities;
use crate::anatomy::body::Body;
use crate::capacity::Influences;
use crate::core::error::Result;
use crate::core::types::Capacity;
use crate::damage::DamageResult;
use crate::death::BodyState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartReport {
    pub name: String,
    pub condition: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionReport {
    pub name: String,
    pub coverage: f32,
    pub health: f32,
    pub parts: Vec<PartReport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapacityReading {
    pub capacity: Capacity,
    pub value: f32,
}

/// Complete state of one body, plus the hits that led to it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyReport {
    pub species: String,
    pub state: BodyState,
    pub weight: f32,
    pub overall_health: f32,
    pub blood_condition: f32,
    pub blood_lost_ml: f32,
    pub capacities: Vec<CapacityReading>,
    pub abilities: Abilities,
    pub regions: Vec<RegionReport>,
    pub hits: Vec<DamageResult>,
}

impl BodyReport {
    pub fn new(body: &Body, influences: &Influences, hits: Vec<DamageResult>) -> Self {
        let caps = body.capacities(influences);
        let regions = body
            .regions()
            .iter()
            .map(|region| RegionReport {
                name: region.name.clone(),
                coverage: region.coverage(),
                health: region.health(),
                parts: region
                    .parts()
                    .map(|t| PartReport {
                        name: t.name.clone(),
                        condition: t.condition(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            species: body.species.clone(),
            state: body.classify(influences),
            weight: body.weight(),
            overall_health: body.overall_health(),
            blood_condition: body.blood().condition(),
            blood_lost_ml: body.blood().volume_lost_ml(),
            capacities: caps
                .iter()
                .map(|(capacity, value)| CapacityReading { capacity, value })
                .collect(),
            abilities: Abilities::derive(body, &caps),
            regions,
            hits,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} ({:.1} kg): {}\nhealth {:.0}%, blood {:.0}% ({:.0} ml lost)\n",
            self.species,
            self.weight,
            self.state,
            self.overall_health * 100.0,
            self.blood_condition * 100.0,
            self.blood_lost_ml,
        );

        out.push_str("\nCapacities:\n");
        for reading in &self.capacities {
            out.push_str(&format!("  {:<14} {:.2}\n", reading.capacity.to_string(), reading.value));
        }

        let a = &self.abilities;
        out.push_str(&format!(
            "\nStrength {:.2}  Speed {:.2}  Vitality {:.2}  Perception {:.2}  Cold {:.2}\n",
            a.strength, a.speed, a.vitality, a.perception, a.cold_resistance
        ));

        let damaged: Vec<_> = self.regions.iter().filter(|r| r.health < 1.0).collect();
        if !damaged.is_empty() {
            out.push_str("\nInjuries:\n");
            for region in damaged {
                let parts: Vec<String> = region
                    .parts
                    .iter()
                    .filter(|p| p.condition < 1.0)
                    .map(|p| format!("{} {:.0}%", p.name, p.condition * 100.0))
                    .collect();
                out.push_str(&format!("  {}: {}\n", region.name, parts.join(", ")));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_of_fresh_body() {
        let body = Body::human();
        let report = BodyReport::new(&body, &Influences::none(), Vec::new());
        assert_eq!(report.state, BodyState::Healthy);
        assert_eq!(report.capacities.len(), Capacity::COUNT);
        assert_eq!(report.regions.len(), 7);
        assert!(!report.summary().contains("Injuries"));
    }

    #[test]
    fn test_report_json_round_trips_state() {
        let mut body = Body::human();
        body.part_mut("LeftEye").unwrap().set_condition(0.0);
        let report = BodyReport::new(&body, &Influences::none(), Vec::new());
        let json = report.to_json().unwrap();
        let back: BodyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.regions[0].parts.len(), report.regions[0].parts.len());
        assert!(report.summary().contains("LeftEye 0%"));
    }
}
