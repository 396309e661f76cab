use ndarray::Array1;

use crate::models::RiskVector;

/// Fused ensemble output with its agreement-based confidence.
///
/// Confidence is a heuristic: a high baseline degraded by visible
/// disagreement between variants, floored, not a calibrated probability.
#[derive(Debug, Clone, Copy)]
pub struct FusedPrediction {
    /// Averaged {collision, congestion, debris} triple before scaling
    pub risk: RiskVector,

    /// Confidence level in [floor, 100]
    pub confidence: f64,

    /// Pooled population standard deviation across all contributing
    /// point estimates
    pub dispersion: f64,

    /// Whether the tree-ensemble output stood in for the sequence slot
    pub sequence_fallback: bool,
}

/// Fuse the available regression outputs.
///
/// Arithmetic mean over {tree, linear, sequence} per dimension; a missing
/// sequence output is substituted with the tree-ensemble value. The debris
/// classifier never enters fusion; its override happens at scaling time.
pub fn fuse(
    tree: RiskVector,
    linear: RiskVector,
    sequence: Option<RiskVector>,
    confidence_floor: f64,
) -> FusedPrediction {
    let sequence_fallback = sequence.is_none();
    let sequence = sequence.unwrap_or(tree);

    let tree_values = tree.as_array();
    let linear_values = linear.as_array();
    let sequence_values = sequence.as_array();

    let mut fused = [0.0; 3];
    for i in 0..3 {
        fused[i] = (tree_values[i] + linear_values[i] + sequence_values[i]) / 3.0;
    }

    let pooled = Array1::from_iter(
        tree_values
            .into_iter()
            .chain(linear_values)
            .chain(sequence_values),
    );
    let dispersion = pooled.std(0.0);
    let confidence = (100.0 - dispersion * 100.0).max(confidence_floor);

    FusedPrediction {
        risk: RiskVector::from_array(fused),
        confidence,
        dispersion,
        sequence_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: f64 = 70.0;

    #[test]
    fn test_mean_of_three_variants() {
        let tree = RiskVector::new(0.3, 0.6, 0.9);
        let linear = RiskVector::new(0.6, 0.3, 0.0);
        let sequence = RiskVector::new(0.0, 0.0, 0.0);
        let fused = fuse(tree, linear, Some(sequence), FLOOR);

        assert!((fused.risk.collision - 0.3).abs() < 1e-12);
        assert!((fused.risk.congestion - 0.3).abs() < 1e-12);
        assert!((fused.risk.debris - 0.3).abs() < 1e-12);
        assert!(!fused.sequence_fallback);
    }

    #[test]
    fn test_sequence_fallback_substitutes_tree() {
        let tree = RiskVector::new(0.4, 0.2, 0.1);
        let linear = RiskVector::new(0.2, 0.4, 0.3);

        let fallback = fuse(tree, linear, None, FLOOR);
        let explicit = fuse(tree, linear, Some(tree), FLOOR);

        assert_eq!(fallback.risk, explicit.risk);
        assert_eq!(fallback.confidence, explicit.confidence);
        assert!(fallback.sequence_fallback);
        assert!(!explicit.sequence_fallback);
    }

    #[test]
    fn test_perfect_agreement_yields_full_confidence() {
        let v = RiskVector::new(0.5, 0.5, 0.5);
        let fused = fuse(v, v, Some(v), FLOOR);
        assert_eq!(fused.confidence, 100.0);
        assert_eq!(fused.dispersion, 0.0);
    }

    #[test]
    fn test_confidence_floor_holds_under_heavy_disagreement() {
        let tree = RiskVector::new(0.0, 0.0, 0.0);
        let linear = RiskVector::new(1.0, 1.0, 1.0);
        let sequence = RiskVector::new(0.0, 1.0, 0.0);
        let fused = fuse(tree, linear, Some(sequence), FLOOR);
        assert_eq!(fused.confidence, FLOOR);
    }

    #[test]
    fn test_confidence_degrades_with_disagreement() {
        let tight = fuse(
            RiskVector::new(0.50, 0.50, 0.50),
            RiskVector::new(0.52, 0.52, 0.52),
            Some(RiskVector::new(0.48, 0.48, 0.48)),
            FLOOR,
        );
        let loose = fuse(
            RiskVector::new(0.2, 0.2, 0.2),
            RiskVector::new(0.8, 0.8, 0.8),
            Some(RiskVector::new(0.5, 0.5, 0.5)),
            FLOOR,
        );
        assert!(tight.confidence > loose.confidence);
    }
}
