/// Machine learning core: feature preparation, the predictor variant set,
/// ensemble fusion, synthetic bootstrap data, artifact persistence and the
/// served-model registry.
pub mod dataset;
pub mod ensemble;
pub mod features;
pub mod persistence;
pub mod predictors;
pub mod registry;
pub mod synthetic;

pub use dataset::{RetrainTarget, TrainingDataset, TrainingRow};
pub use ensemble::{fuse, FusedPrediction};
pub use features::{feature_defaults, FeatureVector, FEATURE_COUNT};
pub use persistence::ModelStore;
pub use predictors::{
    DebrisClassifier, LinearRiskRegressor, RiskPredictor, SequenceRegressor, TreeEnsembleRegressor,
    SEQUENCE_WINDOW,
};
pub use registry::{ModelOrigin, ModelRegistry, ModelState, PredictorSet};
