use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::ml::dataset::{RetrainTarget, TrainingDataset};
use crate::ml::features::{FeatureVector, FEATURE_COUNT};
use crate::models::RiskVector;

/// History window length expected by the sequence regressor
pub const SEQUENCE_WINDOW: usize = 10;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Linear = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Logistic = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Uniform predict capability shared by the regression variants. Fusion
/// consumes only this contract, oblivious to the concrete model behind it.
pub trait RiskPredictor: Send + Sync {
    /// Predict all three risk signals for one input vector
    fn predict(&self, features: &FeatureVector) -> Result<RiskVector>;

    /// Variant name for logging
    fn name(&self) -> &'static str;
}

fn ndarray_to_densematrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}

fn row_matrix(values: Vec<f64>) -> DenseMatrix<f64> {
    let cols = values.len();
    DenseMatrix::new(1, cols, values, false)
}

fn first_prediction(predictions: Vec<f64>, variant: &str) -> Result<f64> {
    predictions
        .first()
        .copied()
        .ok_or_else(|| AppError::Model(format!("{variant} returned no prediction")))
}

/// Multi-output tree-ensemble regressor: one random forest per risk
/// dimension, sharing the input vector. Primary signal of the ensemble.
#[derive(Clone, Serialize, Deserialize)]
pub struct TreeEnsembleRegressor {
    forests: [Arc<Forest>; 3],
    seed: u64,
}

impl TreeEnsembleRegressor {
    /// Fit all three forests against the dataset.
    pub fn fit(dataset: &TrainingDataset, seed: u64) -> Result<Self> {
        let x = ndarray_to_densematrix(&dataset.features);
        let collision = Self::fit_forest(&x, dataset.collision.to_vec(), seed)?;
        let congestion = Self::fit_forest(&x, dataset.congestion.to_vec(), seed + 1)?;
        let debris = Self::fit_forest(&x, dataset.debris.to_vec(), seed + 2)?;

        Ok(Self {
            forests: [Arc::new(collision), Arc::new(congestion), Arc::new(debris)],
            seed,
        })
    }

    fn fit_forest(x: &DenseMatrix<f64>, y: Vec<f64>, seed: u64) -> Result<Forest> {
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(100)
            .with_max_depth(10)
            .with_min_samples_split(5)
            .with_min_samples_leaf(2)
            .with_seed(seed);

        RandomForestRegressor::fit(x, &y, params)
            .map_err(|e| AppError::Model(format!("Failed to train tree ensemble: {e}")))
    }

    /// Refit a single risk dimension, reusing the other fitted forests.
    pub fn refit_dimension(
        &self,
        target: RetrainTarget,
        features: &Array2<f64>,
        labels: &Array1<f64>,
    ) -> Result<Self> {
        let x = ndarray_to_densematrix(features);
        let refit = Self::fit_forest(&x, labels.to_vec(), self.seed + target.index() as u64)?;

        let mut forests = self.forests.clone();
        forests[target.index()] = Arc::new(refit);

        Ok(Self {
            forests,
            seed: self.seed,
        })
    }
}

impl RiskPredictor for TreeEnsembleRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<RiskVector> {
        let x = row_matrix(features.to_vec());
        let mut out = [0.0; 3];
        for (i, forest) in self.forests.iter().enumerate() {
            let predictions = forest
                .predict(&x)
                .map_err(|e| AppError::Model(format!("Tree ensemble prediction failed: {e}")))?;
            out[i] = first_prediction(predictions, self.name())?;
        }
        Ok(RiskVector::from_array(out))
    }

    fn name(&self) -> &'static str {
        "tree_ensemble"
    }
}

/// Multi-output linear regressor. Stability baseline and disagreement
/// reference for the fusion engine.
#[derive(Clone, Serialize, Deserialize)]
pub struct LinearRiskRegressor {
    models: [Arc<Linear>; 3],
}

impl LinearRiskRegressor {
    pub fn fit(dataset: &TrainingDataset) -> Result<Self> {
        let x = ndarray_to_densematrix(&dataset.features);
        let collision = Self::fit_linear(&x, dataset.collision.to_vec())?;
        let congestion = Self::fit_linear(&x, dataset.congestion.to_vec())?;
        let debris = Self::fit_linear(&x, dataset.debris.to_vec())?;

        Ok(Self {
            models: [Arc::new(collision), Arc::new(congestion), Arc::new(debris)],
        })
    }

    fn fit_linear(x: &DenseMatrix<f64>, y: Vec<f64>) -> Result<Linear> {
        LinearRegression::fit(x, &y, LinearRegressionParameters::default())
            .map_err(|e| AppError::Model(format!("Failed to train linear regressor: {e}")))
    }

    /// Refit a single risk dimension, reusing the other fitted models.
    pub fn refit_dimension(
        &self,
        target: RetrainTarget,
        features: &Array2<f64>,
        labels: &Array1<f64>,
    ) -> Result<Self> {
        let x = ndarray_to_densematrix(features);
        let refit = Self::fit_linear(&x, labels.to_vec())?;

        let mut models = self.models.clone();
        models[target.index()] = Arc::new(refit);

        Ok(Self { models })
    }
}

impl RiskPredictor for LinearRiskRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<RiskVector> {
        let x = row_matrix(features.to_vec());
        let mut out = [0.0; 3];
        for (i, model) in self.models.iter().enumerate() {
            let predictions = model
                .predict(&x)
                .map_err(|e| AppError::Model(format!("Linear prediction failed: {e}")))?;
            out[i] = first_prediction(predictions, self.name())?;
        }
        Ok(RiskVector::from_array(out))
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

/// Windowed regressor over short feature histories.
///
/// Trained on consecutive synthetic rows (window i..i+W predicting row i+W).
/// At inference a single snapshot is replicated across the window, an
/// approximation rather than a real trajectory. The slot is
/// optional: construction failure is tolerated and fusion substitutes the
/// tree-ensemble output.
#[derive(Clone, Serialize, Deserialize)]
pub struct SequenceRegressor {
    models: [Arc<Linear>; 3],
}

impl SequenceRegressor {
    pub fn fit(dataset: &TrainingDataset) -> Result<Self> {
        let n = dataset.n_samples;
        if n <= SEQUENCE_WINDOW {
            return Err(AppError::Model(format!(
                "Sequence regressor needs more than {SEQUENCE_WINDOW} samples, got {n}"
            )));
        }

        let n_windows = n - SEQUENCE_WINDOW;
        let width = SEQUENCE_WINDOW * FEATURE_COUNT;
        let mut windows = Array2::zeros((n_windows, width));
        let mut collision = Vec::with_capacity(n_windows);
        let mut congestion = Vec::with_capacity(n_windows);
        let mut debris = Vec::with_capacity(n_windows);

        for i in 0..n_windows {
            for t in 0..SEQUENCE_WINDOW {
                for j in 0..FEATURE_COUNT {
                    windows[[i, t * FEATURE_COUNT + j]] = dataset.features[[i + t, j]];
                }
            }
            collision.push(dataset.collision[i + SEQUENCE_WINDOW]);
            congestion.push(dataset.congestion[i + SEQUENCE_WINDOW]);
            debris.push(dataset.debris[i + SEQUENCE_WINDOW]);
        }

        let x = ndarray_to_densematrix(&windows);
        let fit = |y: Vec<f64>| {
            LinearRegression::fit(&x, &y, LinearRegressionParameters::default())
                .map_err(|e| AppError::Model(format!("Failed to train sequence regressor: {e}")))
        };

        Ok(Self {
            models: [
                Arc::new(fit(collision)?),
                Arc::new(fit(congestion)?),
                Arc::new(fit(debris)?),
            ],
        })
    }

    /// Replicate one snapshot across the history window
    fn replicate_window(features: &FeatureVector) -> Vec<f64> {
        let mut window = Vec::with_capacity(SEQUENCE_WINDOW * FEATURE_COUNT);
        for _ in 0..SEQUENCE_WINDOW {
            window.extend_from_slice(features.as_slice());
        }
        window
    }
}

impl RiskPredictor for SequenceRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<RiskVector> {
        let x = row_matrix(Self::replicate_window(features));
        let mut out = [0.0; 3];
        for (i, model) in self.models.iter().enumerate() {
            let predictions = model
                .predict(&x)
                .map_err(|e| AppError::Model(format!("Sequence prediction failed: {e}")))?;
            out[i] = first_prediction(predictions, self.name())?;
        }
        Ok(RiskVector::from_array(out))
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Binary debris classifier. Produces the probability that an object
/// generates secondary debris; when present it overrides the fused debris
/// component. Optional slot with the same fallback rule as the sequence
/// regressor.
#[derive(Clone, Serialize, Deserialize)]
pub struct DebrisClassifier {
    model: Arc<Logistic>,
}

impl DebrisClassifier {
    /// Decision threshold splitting the synthetic debris target into classes
    pub const LABEL_THRESHOLD: f64 = 0.5;

    pub fn fit(dataset: &TrainingDataset) -> Result<Self> {
        let x = ndarray_to_densematrix(&dataset.features);
        let y: Vec<i32> = dataset
            .debris
            .iter()
            .map(|&v| i32::from(v > Self::LABEL_THRESHOLD))
            .collect();

        let both_classes = y.contains(&0) && y.contains(&1);
        if !both_classes {
            return Err(AppError::Model(
                "Debris classifier needs both classes in the training data".to_string(),
            ));
        }

        let model = LogisticRegression::fit(&x, &y, LogisticRegressionParameters::default())
            .map_err(|e| AppError::Model(format!("Failed to train debris classifier: {e}")))?;

        Ok(Self {
            model: Arc::new(model),
        })
    }

    /// Probability of debris generation for one input vector
    pub fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        let coefficients = self.model.coefficients();
        let intercept = self.model.intercept();

        let mut logit = *intercept.get((0, 0));
        for (j, value) in features.as_slice().iter().enumerate() {
            logit += *coefficients.get((0, j)) * value;
        }

        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}
