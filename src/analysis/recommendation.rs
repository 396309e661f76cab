//! Actionable recommendation synthesis and risk factor identification.
//!
//! Same ordered rule-table structure as the explanation generator. The
//! recommendation list is never empty: when no rule fires, three generic
//! monitoring recommendations stand in.

use crate::models::{FactorSeverity, RiskFactor, RiskVector, SimulationParameters};

/// Inputs visible to every recommendation rule.
pub struct RecommendationContext<'a> {
    pub risk: &'a RiskVector,
    pub params: &'a SimulationParameters,
}

struct RecommendationRule {
    apply: fn(&RecommendationContext) -> Vec<String>,
}

/// Evaluated top to bottom; output order is the table order.
const RULES: &[RecommendationRule] = &[
    RecommendationRule {
        apply: |ctx| {
            if ctx.risk.collision > 0.6 {
                vec![
                    "Consider adjusting altitude by 20-50km to reduce object density.".to_string(),
                    "Modify inclination by 3-5 degrees to avoid peak congestion zones.".to_string(),
                ]
            } else {
                Vec::new()
            }
        },
    },
    RecommendationRule {
        apply: |ctx| {
            if ctx.risk.congestion > 0.2 {
                vec![
                    "Schedule launch during a less congested orbital slot.".to_string(),
                    "Consider coordinated maneuvers with nearby satellites.".to_string(),
                ]
            } else {
                Vec::new()
            }
        },
    },
    RecommendationRule {
        apply: |ctx| {
            if ctx.params.altitude < 400.0 {
                vec!["Plan for more frequent orbit maintenance due to atmospheric drag.".to_string()]
            } else {
                Vec::new()
            }
        },
    },
    RecommendationRule {
        apply: |ctx| {
            if ctx.params.mass > 2000.0 {
                vec!["Implement enhanced debris mitigation measures during end-of-life.".to_string()]
            } else {
                Vec::new()
            }
        },
    },
];

/// Fallback recommendations when no rule fires
fn generic_recommendations() -> Vec<String> {
    vec![
        "Monitor orbital environment regularly for conjunctions.".to_string(),
        "Maintain up-to-date orbital data for collision avoidance.".to_string(),
        "Follow international space sustainability guidelines.".to_string(),
    ]
}

/// Generate the recommendation list for a fused prediction. Never empty.
pub fn generate_recommendations(risk: &RiskVector, params: &SimulationParameters) -> Vec<String> {
    let ctx = RecommendationContext { risk, params };
    let recommendations: Vec<String> = RULES
        .iter()
        .flat_map(|rule| (rule.apply)(&ctx))
        .collect();

    if recommendations.is_empty() {
        generic_recommendations()
    } else {
        recommendations
    }
}

/// Identify parameter-driven risk factors for the risk assessment surface.
pub fn identify_risk_factors(params: &SimulationParameters) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if params.altitude < 400.0 {
        factors.push(RiskFactor {
            factor: "Low altitude".to_string(),
            severity: if params.altitude < 300.0 {
                FactorSeverity::High
            } else {
                FactorSeverity::Medium
            },
            description: format!("{:.0}km altitude increases atmospheric drag", params.altitude),
        });
    }

    if params.mass > 2000.0 {
        factors.push(RiskFactor {
            factor: "High mass".to_string(),
            severity: FactorSeverity::High,
            description: format!(
                "{:.0}kg satellite poses greater fragmentation risk",
                params.mass
            ),
        });
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_collision_adds_two_mitigations() {
        let params = SimulationParameters::baseline();
        let recs = generate_recommendations(&RiskVector::new(0.7, 0.0, 0.0), &params);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("adjusting altitude by 20-50km"));
        assert!(recs[1].contains("inclination by 3-5 degrees"));
    }

    #[test]
    fn test_generic_fallback_when_nothing_fires() {
        let params = SimulationParameters::baseline();
        let recs = generate_recommendations(&RiskVector::new(0.1, 0.05, 0.1), &params);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("Monitor orbital environment"));
    }

    #[test]
    fn test_list_never_empty() {
        for collision in [0.0, 0.5, 0.9] {
            for altitude in [200.0, 500.0, 1500.0] {
                let params = SimulationParameters::new(altitude, 45.0, 7.8, 500.0);
                let recs =
                    generate_recommendations(&RiskVector::new(collision, 0.0, 0.0), &params);
                assert!(!recs.is_empty());
            }
        }
    }

    #[test]
    fn test_parameter_rules() {
        let params = SimulationParameters::new(350.0, 45.0, 7.8, 2500.0);
        let recs = generate_recommendations(&RiskVector::new(0.0, 0.0, 0.0), &params);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("orbit maintenance"));
        assert!(recs[1].contains("end-of-life"));
    }

    #[test]
    fn test_risk_factor_severities() {
        let factors = identify_risk_factors(&SimulationParameters::new(250.0, 45.0, 7.6, 3500.0));
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].factor, "Low altitude");
        assert_eq!(factors[0].severity, FactorSeverity::High);
        assert_eq!(factors[1].factor, "High mass");

        let factors = identify_risk_factors(&SimulationParameters::new(350.0, 45.0, 7.6, 1000.0));
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].severity, FactorSeverity::Medium);
    }

    #[test]
    fn test_no_factors_for_nominal_parameters() {
        let factors = identify_risk_factors(&SimulationParameters::baseline());
        assert!(factors.is_empty());
    }
}
