//! Space Traffic AI: risk prediction for orbital traffic simulations.
//!
//! A multi-model ensemble answers "what is the predicted collision risk,
//! congestion increase, and debris probability, and what should the operator
//! do about it?" over a request/response API.
//!
//! ## Architecture
//!
//! - **ml**: feature preparation, the predictor variant set (tree ensemble,
//!   linear, sequence, debris classifier), fusion with agreement-based
//!   confidence, seeded synthetic bootstrap data, artifact persistence and
//!   the served-model registry
//! - **analysis**: scale/clamp mapping, rule-driven explanation and
//!   recommendation synthesis, environmental and personalization adjustment
//! - **processing**: per-request pipeline orchestration
//! - **api**: HTTP surface (axum)

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod ml;
pub mod models;
pub mod processing;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use ml::{FeatureVector, ModelRegistry, PredictorSet, RetrainTarget, TrainingRow};
pub use models::{
    EventType, ImpactAssessment, RiskAssessment, RiskTolerance, RiskVector, SimulationParameters,
    SimulationState, SkillLevel,
};
pub use processing::PredictionProcessor;
