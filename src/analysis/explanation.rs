//! Natural-language explanation synthesis.
//!
//! Pure function over the fused risk vector and the simulation parameters,
//! driven by an ordered table of (predicate, template) rules. Rules fire
//! independently per signal and concatenate in a fixed sequence, which keeps
//! every threshold band auditable and testable on its own.

use crate::models::{RiskVector, SimulationParameters};

/// Inputs visible to every explanation rule.
pub struct ExplanationContext<'a> {
    pub risk: &'a RiskVector,
    pub params: &'a SimulationParameters,
}

/// One entry of the rule table: fires with a sentence or stays silent.
struct ExplanationRule {
    apply: fn(&ExplanationContext) -> Option<String>,
}

/// Evaluated top to bottom; output order is the table order.
const RULES: &[ExplanationRule] = &[
    ExplanationRule {
        apply: |ctx| {
            let pct = ctx.risk.collision * 100.0;
            Some(if ctx.risk.collision > 0.7 {
                format!("High collision risk ({pct:.1}%) due to proximity to existing satellites.")
            } else if ctx.risk.collision > 0.4 {
                format!("Moderate collision risk ({pct:.1}%) from orbital overlap.")
            } else {
                format!("Low collision risk ({pct:.1}%) - good orbital spacing.")
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            let pct = ctx.risk.congestion * 100.0;
            Some(if ctx.risk.congestion > 0.3 {
                format!("Significant congestion increase ({pct:.1}%) in this orbital band.")
            } else if ctx.risk.congestion > 0.1 {
                format!("Moderate congestion increase ({pct:.1}%).")
            } else {
                format!("Minimal congestion impact ({pct:.1}%).")
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            let pct = ctx.risk.debris * 100.0;
            Some(if ctx.risk.debris > 0.5 {
                format!("High debris generation probability ({pct:.1}%) if fragmentation occurs.")
            } else if ctx.risk.debris > 0.2 {
                format!("Moderate debris risk ({pct:.1}%) from this object.")
            } else {
                format!("Low debris generation risk ({pct:.1}%).")
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            (ctx.params.altitude < 300.0).then(|| {
                "Very low altitude increases atmospheric drag and reentry risk.".to_string()
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            (ctx.params.altitude > 1000.0).then(|| {
                "High altitude reduces drag but increases collision risk with other satellites."
                    .to_string()
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            ctx.params.is_polar().then(|| {
                "Polar orbit inclination increases ground coverage but crosses many orbital planes."
                    .to_string()
            })
        },
    },
    ExplanationRule {
        apply: |ctx| {
            (ctx.params.mass > 3000.0).then(|| {
                format!(
                    "Heavy satellite ({:.0}kg) poses greater risk if fragmented.",
                    ctx.params.mass
                )
            })
        },
    },
];

/// Generate the explanation text for a fused prediction.
pub fn generate_explanation(risk: &RiskVector, params: &SimulationParameters) -> String {
    let ctx = ExplanationContext { risk, params };
    let sentences: Vec<String> = RULES.iter().filter_map(|rule| (rule.apply)(&ctx)).collect();
    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain(risk: RiskVector, params: &SimulationParameters) -> String {
        generate_explanation(&risk, params)
    }

    #[test]
    fn test_collision_bands() {
        let params = SimulationParameters::baseline();
        assert!(explain(RiskVector::new(0.8, 0.0, 0.0), &params).contains("High collision risk"));
        assert!(
            explain(RiskVector::new(0.5, 0.0, 0.0), &params).contains("Moderate collision risk")
        );
        assert!(explain(RiskVector::new(0.1, 0.0, 0.0), &params).contains("Low collision risk"));
    }

    #[test]
    fn test_band_boundaries_are_exclusive() {
        let params = SimulationParameters::baseline();
        // Exactly 0.7 falls into the moderate band, exactly 0.4 into low
        assert!(
            explain(RiskVector::new(0.7, 0.0, 0.0), &params).contains("Moderate collision risk")
        );
        assert!(explain(RiskVector::new(0.4, 0.0, 0.0), &params).contains("Low collision risk"));
    }

    #[test]
    fn test_literal_percentage_in_sentence() {
        let params = SimulationParameters::baseline();
        let text = explain(RiskVector::new(0.755, 0.0, 0.0), &params);
        assert!(text.contains("75.5%"), "{text}");
    }

    #[test]
    fn test_congestion_and_debris_bands() {
        let params = SimulationParameters::baseline();
        let text = explain(RiskVector::new(0.0, 0.35, 0.6), &params);
        assert!(text.contains("Significant congestion increase"));
        assert!(text.contains("High debris generation probability"));

        let text = explain(RiskVector::new(0.0, 0.15, 0.3), &params);
        assert!(text.contains("Moderate congestion increase"));
        assert!(text.contains("Moderate debris risk"));
    }

    #[test]
    fn test_parameter_addenda() {
        let params = SimulationParameters::new(250.0, 95.0, 7.6, 3500.0);
        let text = explain(RiskVector::new(0.1, 0.1, 0.1), &params);
        assert!(text.contains("atmospheric drag and reentry risk"));
        assert!(text.contains("Polar orbit inclination"));
        assert!(text.contains("Heavy satellite (3500kg)"));
        assert!(!text.contains("High altitude"));
    }

    #[test]
    fn test_fixed_sentence_order() {
        let params = SimulationParameters::new(1200.0, 45.0, 7.8, 1000.0);
        let text = explain(RiskVector::new(0.8, 0.35, 0.6), &params);
        let collision = text.find("High collision risk").unwrap();
        let congestion = text.find("Significant congestion").unwrap();
        let debris = text.find("High debris generation").unwrap();
        let altitude = text.find("High altitude").unwrap();
        assert!(collision < congestion && congestion < debris && debris < altitude);
    }
}
