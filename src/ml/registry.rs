use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::error::{AppError, Result};
use crate::ml::dataset::{self, RetrainTarget, TrainingRow};
use crate::ml::persistence::ModelStore;
use crate::ml::predictors::{
    DebrisClassifier, LinearRiskRegressor, SequenceRegressor, TreeEnsembleRegressor,
};
use crate::ml::synthetic;

/// How the currently served predictor set came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelOrigin {
    /// Trained on seeded synthetic data at startup
    Bootstrapped,
    /// Restored from persisted artifacts
    Restored,
    /// Replaced by a retraining run
    Retrained,
}

/// Registry lifecycle, exposed on the info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    Loading,
    Serving,
    Retraining,
}

/// The predictor variants served together as one immutable snapshot.
///
/// Tree-ensemble and linear slots are required; sequence and classifier are
/// optional capabilities whose absence fusion tolerates. A restored set
/// carries only the two persisted variants.
#[derive(Clone)]
pub struct PredictorSet {
    pub tree: TreeEnsembleRegressor,
    pub linear: LinearRiskRegressor,
    pub sequence: Option<SequenceRegressor>,
    pub classifier: Option<DebrisClassifier>,
    pub origin: ModelOrigin,
    pub trained_at: DateTime<Utc>,
}

impl PredictorSet {
    /// Train all variants on seeded synthetic data. Failures of the optional
    /// variants are logged and tolerated.
    pub fn bootstrap(samples: usize, seed: u64) -> Result<Self> {
        info!(samples, seed, "Training models on synthetic data");
        let dataset = synthetic::generate(samples, seed);

        let tree = TreeEnsembleRegressor::fit(&dataset, seed)?;
        let linear = LinearRiskRegressor::fit(&dataset)?;

        let sequence = match SequenceRegressor::fit(&dataset) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("Sequence regressor unavailable: {e}");
                None
            }
        };

        let classifier = match DebrisClassifier::fit(&dataset) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("Debris classifier unavailable: {e}");
                None
            }
        };

        Ok(Self {
            tree,
            linear,
            sequence,
            classifier,
            origin: ModelOrigin::Bootstrapped,
            trained_at: Utc::now(),
        })
    }

    fn restored(tree: TreeEnsembleRegressor, linear: LinearRiskRegressor) -> Self {
        Self {
            tree,
            linear,
            sequence: None,
            classifier: None,
            origin: ModelOrigin::Restored,
            trained_at: Utc::now(),
        }
    }
}

/// Owner of the served predictor snapshot.
///
/// Many concurrent readers, rare writer: readers clone the `Arc` once per
/// request and keep that snapshot for the whole request; retraining builds a
/// complete replacement and publishes it with a single swap. In-flight
/// predictions never observe a half-updated variant.
pub struct ModelRegistry {
    active: RwLock<Arc<PredictorSet>>,
    state: RwLock<ModelState>,
    store: ModelStore,
}

impl ModelRegistry {
    /// Restore persisted models or bootstrap from synthetic data.
    pub fn initialize(config: &ModelConfig) -> Result<Self> {
        let store = ModelStore::new(&config.store_path);

        let set = match store.load() {
            Ok((tree, linear)) => {
                info!(
                    path = %config.store_path.display(),
                    "Loaded saved models successfully"
                );
                PredictorSet::restored(tree, linear)
            }
            Err(e) => {
                info!("Saved models not loadable ({e}), training new models");
                let set = PredictorSet::bootstrap(config.bootstrap_samples, config.bootstrap_seed)?;
                match store.save(&set.tree, &set.linear) {
                    Ok(()) => info!("Models saved successfully"),
                    Err(e) => warn!("Failed to save models: {e}"),
                }
                set
            }
        };

        Ok(Self {
            active: RwLock::new(Arc::new(set)),
            state: RwLock::new(ModelState::Serving),
            store,
        })
    }

    /// Snapshot of the currently served predictor set
    pub async fn snapshot(&self) -> Arc<PredictorSet> {
        self.active.read().await.clone()
    }

    pub async fn state(&self) -> ModelState {
        *self.state.read().await
    }

    /// Refit the tree-ensemble and linear variants for one risk dimension
    /// and publish the result atomically. Returns the number of samples
    /// used. Validation failures leave the served set untouched.
    pub async fn retrain(&self, rows: &[TrainingRow], target: RetrainTarget) -> Result<usize> {
        let (features, labels) = dataset::from_retrain_rows(rows, target)?;

        info!(samples = rows.len(), %target, "Retraining models");
        *self.state.write().await = ModelState::Retraining;

        let current = self.snapshot().await;
        let refit = current
            .tree
            .refit_dimension(target, &features, &labels)
            .and_then(|tree| {
                let linear = current.linear.refit_dimension(target, &features, &labels)?;
                Ok::<_, AppError>((tree, linear))
            });

        let outcome = match refit {
            Ok((tree, linear)) => {
                let next = PredictorSet {
                    tree,
                    linear,
                    sequence: current.sequence.clone(),
                    classifier: current.classifier.clone(),
                    origin: ModelOrigin::Retrained,
                    trained_at: Utc::now(),
                };

                match self.store.save(&next.tree, &next.linear) {
                    Ok(()) => info!("Retrained models saved successfully"),
                    Err(e) => warn!("Failed to save retrained models: {e}"),
                }

                *self.active.write().await = Arc::new(next);
                Ok(rows.len())
            }
            Err(e) => Err(e),
        };

        *self.state.write().await = ModelState::Serving;
        outcome
    }
}
