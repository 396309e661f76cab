//! Maps fused risk signals into the output domains.
//!
//! Each signal carries its own multiplier: the synthetic and derived
//! signals have different natural magnitudes, so the asymmetry is
//! intentional. Components take the absolute value before scaling (negative
//! raw scores are magnitude, not direction) and are clamped after scaling.

use serde::{Deserialize, Serialize};

use crate::models::RiskVector;

/// Collision risk → percentage
pub const COLLISION_PCT_SCALE: f64 = 100.0;

/// Congestion increase → percentage
pub const CONGESTION_PCT_SCALE: f64 = 50.0;

/// Debris probability → percentage (fused path)
pub const DEBRIS_PCT_SCALE: f64 = 25.0;

/// Classifier probability → percentage (override path)
pub const DEBRIS_OVERRIDE_PCT_SCALE: f64 = 100.0;

/// Any signal → 1-10 score
pub const SCORE_SCALE: f64 = 10.0;

/// Clamp a scaled value into [0, 100]
pub fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Clamp a scaled value into [1, 10]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(1.0, 10.0)
}

/// Percentage-domain view of a fused prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactScores {
    /// Collision risk percentage [0, 100]
    pub collision_pct: f64,

    /// Congestion increase percentage [0, 100]
    pub congestion_pct: f64,

    /// Debris probability percentage [0, 100]
    pub debris_pct: f64,

    /// Whether the classifier override produced the debris component
    pub classifier_override: bool,
}

/// Scale a fused risk vector into percentages. A classifier probability,
/// when present, replaces the fused debris component at the ×100 scale.
pub fn scale_impact(risk: &RiskVector, classifier_probability: Option<f64>) -> ImpactScores {
    let debris_pct = match classifier_probability {
        Some(prob) => clamp_percentage(prob.abs() * DEBRIS_OVERRIDE_PCT_SCALE),
        None => clamp_percentage(risk.debris.abs() * DEBRIS_PCT_SCALE),
    };

    ImpactScores {
        collision_pct: clamp_percentage(risk.collision.abs() * COLLISION_PCT_SCALE),
        congestion_pct: clamp_percentage(risk.congestion.abs() * CONGESTION_PCT_SCALE),
        debris_pct,
        classifier_override: classifier_probability.is_some(),
    }
}

/// 1-10 score view of a fused prediction for the risk assessment surface:
/// (collision, congestion, long-term impact). The classifier probability,
/// when present, drives the long-term impact score.
pub fn scale_scores(risk: &RiskVector, classifier_probability: Option<f64>) -> (f64, f64, f64) {
    let long_term = match classifier_probability {
        Some(prob) => clamp_score(prob.abs() * SCORE_SCALE),
        None => clamp_score(risk.debris.abs() * SCORE_SCALE),
    };

    (
        clamp_score(risk.collision.abs() * SCORE_SCALE),
        clamp_score(risk.congestion.abs() * SCORE_SCALE),
        long_term,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_signal_multipliers() {
        let scores = scale_impact(&RiskVector::new(0.5, 0.5, 0.5), None);
        assert_eq!(scores.collision_pct, 50.0);
        assert_eq!(scores.congestion_pct, 25.0);
        assert_eq!(scores.debris_pct, 12.5);
        assert!(!scores.classifier_override);
    }

    #[test]
    fn test_classifier_override_uses_full_scale() {
        let scores = scale_impact(&RiskVector::new(0.5, 0.5, 0.5), Some(0.8));
        assert_eq!(scores.debris_pct, 80.0);
        assert!(scores.classifier_override);
    }

    #[test]
    fn test_negative_components_treated_as_magnitude() {
        let scores = scale_impact(&RiskVector::new(-0.4, -0.6, -0.2), None);
        assert_eq!(scores.collision_pct, 40.0);
        assert_eq!(scores.congestion_pct, 30.0);
        assert_eq!(scores.debris_pct, 5.0);
    }

    #[test]
    fn test_percentages_clamped() {
        let scores = scale_impact(&RiskVector::new(3.0, 9.0, 8.0), None);
        assert_eq!(scores.collision_pct, 100.0);
        assert_eq!(scores.congestion_pct, 100.0);
        assert_eq!(scores.debris_pct, 100.0);
    }

    #[test]
    fn test_scores_clamped_to_one_through_ten() {
        let (collision, congestion, long_term) = scale_scores(&RiskVector::new(0.0, 5.0, 0.01), None);
        assert_eq!(collision, 1.0);
        assert_eq!(congestion, 10.0);
        assert_eq!(long_term, 1.0);
    }

    #[test]
    fn test_override_score_clamped() {
        let (_, _, long_term) = scale_scores(&RiskVector::new(0.5, 0.5, 0.5), Some(0.02));
        assert_eq!(long_term, 1.0);

        let (_, _, long_term) = scale_scores(&RiskVector::new(0.5, 0.5, 0.5), Some(1.5));
        assert_eq!(long_term, 10.0);
    }
}
