use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::ml::features::FEATURE_COUNT;

/// Risk dimension a retraining run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrainTarget {
    Collision,
    Congestion,
    Debris,
}

impl RetrainTarget {
    /// Parse a caller-supplied target name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "collision" => Ok(Self::Collision),
            "congestion" => Ok(Self::Congestion),
            "debris" => Ok(Self::Debris),
            other => Err(AppError::Validation(format!(
                "Invalid target variable: {other} (expected collision, congestion or debris)"
            ))),
        }
    }

    /// Label field a training row must carry for this target.
    pub fn label_field(&self) -> &'static str {
        match self {
            Self::Collision => "collisionRisk",
            Self::Congestion => "congestionIncrease",
            Self::Debris => "debrisProbability",
        }
    }

    /// Position in the {collision, congestion, debris} ordering
    pub fn index(&self) -> usize {
        match self {
            Self::Collision => 0,
            Self::Congestion => 1,
            Self::Debris => 2,
        }
    }
}

impl std::fmt::Display for RetrainTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collision => write!(f, "collision"),
            Self::Congestion => write!(f, "congestion"),
            Self::Debris => write!(f, "debris"),
        }
    }
}

/// A labeled feature row submitted for retraining. All feature fields are
/// required; the label field matching the requested target is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRow {
    pub altitude: Option<f64>,
    pub inclination: Option<f64>,
    pub velocity: Option<f64>,
    pub mass: Option<f64>,
    #[serde(rename = "objectsInLEO")]
    pub objects_in_leo: Option<f64>,
    pub average_congestion: Option<f64>,
    pub collision_risk: Option<f64>,
    pub congestion_increase: Option<f64>,
    pub debris_probability: Option<f64>,
}

impl TrainingRow {
    fn feature_fields(&self) -> [(&'static str, Option<f64>); FEATURE_COUNT] {
        [
            ("altitude", self.altitude),
            ("inclination", self.inclination),
            ("velocity", self.velocity),
            ("mass", self.mass),
            ("objectsInLEO", self.objects_in_leo),
            ("averageCongestion", self.average_congestion),
        ]
    }

    fn label(&self, target: RetrainTarget) -> Option<f64> {
        match target {
            RetrainTarget::Collision => self.collision_risk,
            RetrainTarget::Congestion => self.congestion_increase,
            RetrainTarget::Debris => self.debris_probability,
        }
    }
}

/// Training data for the full predictor set: a feature matrix plus one
/// target vector per risk dimension.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples × FEATURE_COUNT)
    pub features: Array2<f64>,

    /// Collision risk targets
    pub collision: Array1<f64>,

    /// Congestion increase targets
    pub congestion: Array1<f64>,

    /// Debris probability targets
    pub debris: Array1<f64>,

    pub n_samples: usize,
}

impl TrainingDataset {
    /// Target vector for one risk dimension
    pub fn target(&self, target: RetrainTarget) -> &Array1<f64> {
        match target {
            RetrainTarget::Collision => &self.collision,
            RetrainTarget::Congestion => &self.congestion,
            RetrainTarget::Debris => &self.debris,
        }
    }
}

/// Build a feature matrix and target vector from retrain rows.
///
/// Any missing feature or label field fails with a validation error naming
/// the row and field; the currently served models are not affected.
pub fn from_retrain_rows(
    rows: &[TrainingRow],
    target: RetrainTarget,
) -> Result<(Array2<f64>, Array1<f64>)> {
    if rows.is_empty() {
        return Err(AppError::Validation(
            "Training data must contain at least one sample".to_string(),
        ));
    }

    let mut features = Array2::zeros((rows.len(), FEATURE_COUNT));
    let mut labels = Array1::zeros(rows.len());

    for (i, row) in rows.iter().enumerate() {
        for (j, (name, value)) in row.feature_fields().into_iter().enumerate() {
            features[[i, j]] = value.ok_or_else(|| {
                AppError::Validation(format!("Training sample {i} is missing field '{name}'"))
            })?;
        }
        labels[i] = row.label(target).ok_or_else(|| {
            AppError::Validation(format!(
                "Training sample {i} is missing field '{}'",
                target.label_field()
            ))
        })?;
    }

    Ok((features, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row() -> TrainingRow {
        TrainingRow {
            altitude: Some(550.0),
            inclination: Some(53.0),
            velocity: Some(7.6),
            mass: Some(1200.0),
            objects_in_leo: Some(3100.0),
            average_congestion: Some(0.4),
            collision_risk: Some(0.35),
            congestion_increase: Some(0.2),
            debris_probability: Some(0.15),
        }
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!(
            RetrainTarget::parse("collision").unwrap(),
            RetrainTarget::Collision
        );
        assert_eq!(
            RetrainTarget::parse("debris").unwrap().label_field(),
            "debrisProbability"
        );
        assert!(RetrainTarget::parse("invalid").is_err());
    }

    #[test]
    fn test_rows_to_matrices() {
        let rows = vec![complete_row(), complete_row()];
        let (x, y) = from_retrain_rows(&rows, RetrainTarget::Collision).unwrap();
        assert_eq!(x.shape(), &[2, FEATURE_COUNT]);
        assert_eq!(y.len(), 2);
        assert_eq!(y[0], 0.35);
    }

    #[test]
    fn test_missing_feature_field_is_reported() {
        let mut row = complete_row();
        row.mass = None;
        let err = from_retrain_rows(&[row], RetrainTarget::Collision).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn test_missing_label_field_is_reported() {
        let mut row = complete_row();
        row.debris_probability = None;
        let err = from_retrain_rows(&[row], RetrainTarget::Debris).unwrap_err();
        assert!(err.to_string().contains("debrisProbability"));
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert!(from_retrain_rows(&[], RetrainTarget::Collision).is_err());
    }

    #[test]
    fn test_row_wire_names() {
        let row: TrainingRow = serde_json::from_str(
            r#"{"altitude": 500, "objectsInLEO": 3000, "averageCongestion": 0.5, "collisionRisk": 0.3}"#,
        )
        .unwrap();
        assert_eq!(row.objects_in_leo, Some(3000.0));
        assert_eq!(row.average_congestion, Some(0.5));
        assert_eq!(row.collision_risk, Some(0.3));
    }
}
