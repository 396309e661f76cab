/// Request orchestration over the prediction pipeline.
pub mod predictor;

pub use predictor::{ModelStatus, PredictionProcessor, RetrainOutcome};
