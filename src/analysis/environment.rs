//! Environmental risk adjustment.
//!
//! Maps space-weather signal severities to a collision-risk multiplier plus
//! advisory strings. Triggers are checked in a fixed order and the
//! multiplier is assigned, not compounded: when several trigger at once the
//! last one wins. The multiplier applies to the collision-risk percentage
//! only, re-clamped to [0, 100] afterwards.

use std::collections::HashMap;

use crate::analysis::scaling::clamp_percentage;

/// Geomagnetic storm severity above this raises drag concerns
const GEOMAGNETIC_STORM_THRESHOLD: f64 = 5.0;

/// Solar radiation level above this threatens satellite electronics
const SOLAR_RADIATION_THRESHOLD: f64 = 7.0;

/// Near-Earth-object count above this calls for extra conjunction monitoring
const NEO_COUNT_THRESHOLD: f64 = 3.0;

/// Result of the environmental assessment.
#[derive(Debug, Clone)]
pub struct EnvironmentalImpact {
    /// Multiplier applied to the collision-risk percentage
    pub risk_multiplier: f64,

    /// Advisory strings appended to the recommendation list
    pub advisories: Vec<String>,
}

impl Default for EnvironmentalImpact {
    fn default() -> Self {
        Self {
            risk_multiplier: 1.0,
            advisories: Vec::new(),
        }
    }
}

/// Assess environmental factors by name.
///
/// Recognized keys: `geomagnetic_storm_severity`, `solar_radiation_level`,
/// `near_earth_objects`. Unknown keys are ignored.
pub fn assess_environmental_impact(factors: &HashMap<String, f64>) -> EnvironmentalImpact {
    let mut impact = EnvironmentalImpact::default();
    let level = |key: &str| factors.get(key).copied().unwrap_or(0.0);

    if level("geomagnetic_storm_severity") > GEOMAGNETIC_STORM_THRESHOLD {
        impact.risk_multiplier = 1.3;
        impact.advisories.push(
            "Geomagnetic storm detected: Increased atmospheric drag may affect LEO satellites."
                .to_string(),
        );
        impact.advisories.push(
            "Geomagnetic storm detected: Consider temporary altitude adjustments for LEO assets."
                .to_string(),
        );
    }

    if level("solar_radiation_level") > SOLAR_RADIATION_THRESHOLD {
        impact.risk_multiplier = 1.1;
        impact.advisories.push(
            "High solar radiation: Monitor satellite electronics for potential anomalies."
                .to_string(),
        );
    }

    if level("near_earth_objects") > NEO_COUNT_THRESHOLD {
        impact.risk_multiplier = 1.2;
        impact.advisories.push(
            "Increased NEO activity: Enhanced conjunction monitoring recommended.".to_string(),
        );
    }

    impact
}

/// Apply the multiplier to a collision-risk percentage and re-clamp.
pub fn apply_to_collision_risk(collision_pct: f64, impact: &EnvironmentalImpact) -> f64 {
    clamp_percentage(collision_pct * impact.risk_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_no_factors_is_identity() {
        let impact = assess_environmental_impact(&HashMap::new());
        assert_eq!(impact.risk_multiplier, 1.0);
        assert!(impact.advisories.is_empty());
        assert_eq!(apply_to_collision_risk(42.0, &impact), 42.0);
    }

    #[test]
    fn test_geomagnetic_storm_trigger() {
        let impact = assess_environmental_impact(&factors(&[("geomagnetic_storm_severity", 6.0)]));
        assert_eq!(impact.risk_multiplier, 1.3);
        assert_eq!(impact.advisories.len(), 2);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let impact = assess_environmental_impact(&factors(&[
            ("geomagnetic_storm_severity", 5.0),
            ("solar_radiation_level", 7.0),
            ("near_earth_objects", 3.0),
        ]));
        assert_eq!(impact.risk_multiplier, 1.0);
        assert!(impact.advisories.is_empty());
    }

    // Simultaneous triggers do not compound: the last trigger in evaluation
    // order (geomagnetic -> solar -> NEO) determines the multiplier.
    #[test]
    fn test_last_trigger_wins_over_earlier_ones() {
        let impact = assess_environmental_impact(&factors(&[
            ("geomagnetic_storm_severity", 9.0),
            ("near_earth_objects", 10.0),
        ]));
        assert_eq!(impact.risk_multiplier, 1.2);
        // Advisories from both triggers are still present
        assert_eq!(impact.advisories.len(), 3);
    }

    #[test]
    fn test_all_triggers_yield_neo_multiplier() {
        let impact = assess_environmental_impact(&factors(&[
            ("geomagnetic_storm_severity", 9.0),
            ("solar_radiation_level", 9.0),
            ("near_earth_objects", 10.0),
        ]));
        assert_eq!(impact.risk_multiplier, 1.2);
        assert_eq!(impact.advisories.len(), 4);
    }

    #[test]
    fn test_multiplier_never_escapes_percentage_bounds() {
        let impact = assess_environmental_impact(&factors(&[("geomagnetic_storm_severity", 9.0)]));
        assert_eq!(apply_to_collision_risk(95.0, &impact), 100.0);
        assert_eq!(apply_to_collision_risk(0.0, &impact), 0.0);
    }
}
