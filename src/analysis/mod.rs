/// Post-fusion analysis: scale/clamp mapping, rule-driven explanation and
/// recommendation synthesis, and contextual adjustment by environmental and
/// caller-history signals. Everything in this module is pure.
pub mod environment;
pub mod explanation;
pub mod personalization;
pub mod recommendation;
pub mod scaling;

pub use environment::{apply_to_collision_risk, assess_environmental_impact, EnvironmentalImpact};
pub use explanation::generate_explanation;
pub use recommendation::{generate_recommendations, identify_risk_factors};
pub use scaling::{clamp_percentage, clamp_score, scale_impact, scale_scores, ImpactScores};
