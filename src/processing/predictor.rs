use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{
    apply_to_collision_risk, assess_environmental_impact, generate_explanation,
    generate_recommendations, identify_risk_factors, personalization, scale_impact, scale_scores,
};
use crate::config::PredictionConfig;
use crate::error::Result;
use crate::ml::ensemble::{self, FusedPrediction};
use crate::ml::predictors::RiskPredictor;
use crate::ml::registry::{ModelOrigin, ModelRegistry, ModelState, PredictorSet};
use crate::ml::{FeatureVector, RetrainTarget, TrainingRow};
use crate::models::{
    EventType, ImpactAssessment, PersonalizedAdvice, RealTimeAssessment, RiskAssessment,
    RiskTolerance, SimulationParameters, SimulationState, SkillLevel,
};

/// Outcome of a retraining run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrainOutcome {
    pub success: bool,
    pub message: String,
    pub samples_used: usize,
}

/// Serving status summary for the info endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub state: ModelState,
    pub origin: ModelOrigin,
    pub trained_at: chrono::DateTime<Utc>,
    pub sequence_available: bool,
    pub classifier_available: bool,
}

/// Per-request orchestrator of the prediction pipeline:
/// features → variant set → fusion → scaling → synthesis → adjustment.
///
/// Every request takes one snapshot of the served predictor set up front and
/// uses it throughout, so concurrent retraining never tears a prediction.
pub struct PredictionProcessor {
    registry: Arc<ModelRegistry>,
    confidence_floor: f64,
}

impl PredictionProcessor {
    pub fn new(registry: Arc<ModelRegistry>, config: &PredictionConfig) -> Self {
        Self {
            registry,
            confidence_floor: config.confidence_floor,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Run the variant set and fuse its outputs. Optional-variant failures
    /// are recovered locally and never surface to the caller.
    fn run_ensemble(
        &self,
        set: &PredictorSet,
        features: &FeatureVector,
    ) -> Result<(FusedPrediction, Option<f64>)> {
        let tree = set.tree.predict(features)?;
        let linear = set.linear.predict(features)?;

        let sequence = set.sequence.as_ref().and_then(|model| {
            model
                .predict(features)
                .map_err(|e| warn!("Sequence prediction failed: {e}"))
                .ok()
        });

        let fused = ensemble::fuse(tree, linear, sequence, self.confidence_floor);

        let debris_probability = set.classifier.as_ref().and_then(|classifier| {
            classifier
                .predict_probability(features)
                .map_err(|e| warn!("Debris prediction failed: {e}"))
                .ok()
        });

        Ok((fused, debris_probability))
    }

    /// Analyze a finished simulation run and predict its traffic impact.
    ///
    /// The request carries only population state; parameter-driven synthesis
    /// runs against the reference parameters.
    pub async fn assess_impact(
        &self,
        simulation_id: &str,
        after_state: &SimulationState,
    ) -> Result<ImpactAssessment> {
        info!(simulation_id, "Processing simulation impact");

        let set = self.registry.snapshot().await;
        let features = FeatureVector::from_inputs(None, Some(after_state));
        let (fused, debris_probability) = self.run_ensemble(&set, &features)?;
        let scores = scale_impact(&fused.risk, debris_probability);

        let params = SimulationParameters::baseline();
        let explanation = generate_explanation(&fused.risk, &params);
        let recommendations = generate_recommendations(&fused.risk, &params);

        Ok(ImpactAssessment {
            prediction_id: format!("pred_{simulation_id}"),
            collision_risk_percentage: scores.collision_pct,
            orbital_congestion_increase: scores.congestion_pct,
            secondary_debris_probability: scores.debris_pct,
            confidence_level: fused.confidence,
            explanation,
            recommendations,
        })
    }

    /// Score a proposed event on the 1-10 scale with risk factors and
    /// mitigation strategies.
    pub async fn predict_risk(
        &self,
        event_type: EventType,
        params: &SimulationParameters,
    ) -> Result<RiskAssessment> {
        info!(%event_type, "Processing risk prediction");

        let set = self.registry.snapshot().await;
        let features = FeatureVector::from_inputs(Some(params), Some(&SimulationState::baseline()));
        let (fused, debris_probability) = self.run_ensemble(&set, &features)?;

        let (collision_score, congestion_score, long_term_score) =
            scale_scores(&fused.risk, debris_probability);

        Ok(RiskAssessment {
            risk_assessment_id: format!("risk_{}", Uuid::new_v4()),
            collision_risk_score: collision_score,
            congestion_risk_score: congestion_score,
            long_term_impact_score: long_term_score,
            risk_factors: identify_risk_factors(params),
            mitigation_strategies: generate_recommendations(&fused.risk, params),
        })
    }

    /// Immediate prediction over live parameters and state, adjusted by the
    /// caller's history and current environmental factors.
    #[allow(clippy::too_many_arguments)]
    pub async fn predict_realtime(
        &self,
        user_id: &str,
        params: &SimulationParameters,
        current_state: &SimulationState,
        history: &[crate::models::SimulationRecord],
        environmental_factors: &HashMap<String, f64>,
        time_horizon_hours: u32,
    ) -> Result<RealTimeAssessment> {
        info!(user_id, "Processing real-time prediction");

        let set = self.registry.snapshot().await;
        let features = FeatureVector::from_inputs(Some(params), Some(current_state));
        let (fused, debris_probability) = self.run_ensemble(&set, &features)?;
        let scores = scale_impact(&fused.risk, debris_probability);

        let explanation = generate_explanation(&fused.risk, params);
        let mut recommendations = generate_recommendations(&fused.risk, params);

        if !history.is_empty() {
            let profile = personalization::profile_from_history(history);
            recommendations.extend(personalization::tolerance_advisories(profile.risk_tolerance));
        }

        let mut collision_pct = scores.collision_pct;
        if !environmental_factors.is_empty() {
            let impact = assess_environmental_impact(environmental_factors);
            collision_pct = apply_to_collision_risk(collision_pct, &impact);
            recommendations.extend(impact.advisories);
        }

        Ok(RealTimeAssessment {
            prediction_id: format!("realtime_{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            collision_risk_percentage: collision_pct,
            orbital_congestion_increase: scores.congestion_pct,
            secondary_debris_probability: scores.debris_pct,
            confidence_level: fused.confidence,
            explanation,
            recommendations,
            time_horizon_hours,
        })
    }

    /// Personalized guidance from history, scenario, skill level and
    /// declared tolerance. Uses no model inference.
    pub async fn personalized_recommendations(
        &self,
        user_id: &str,
        scenario_event_type: Option<&str>,
        history: &[crate::models::SimulationRecord],
        skill: SkillLevel,
        tolerance: RiskTolerance,
    ) -> Result<PersonalizedAdvice> {
        info!(user_id, "Generating personalized recommendations");

        let (mut recommendations, learning_path) = if history.is_empty() {
            (
                personalization::welcome_recommendations(),
                personalization::starter_learning_path(),
            )
        } else {
            let profile = personalization::profile_from_history(history);
            (
                personalization::personalized_recommendations(&profile.patterns, skill, tolerance),
                personalization::learning_path(skill),
            )
        };

        recommendations.extend(personalization::scenario_advice(
            scenario_event_type.unwrap_or("launch"),
        ));
        recommendations.extend(personalization::skill_tips(skill));

        Ok(PersonalizedAdvice {
            recommendation_id: format!("personalized_{user_id}_{}", Utc::now().timestamp()),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            recommendations,
            learning_path,
            skill_level: skill,
            risk_tolerance: tolerance,
        })
    }

    /// Refit the retrainable variants for one target and publish the result.
    pub async fn retrain(&self, rows: &[TrainingRow], target_name: &str) -> Result<RetrainOutcome> {
        let target = RetrainTarget::parse(target_name)?;
        let samples_used = self.registry.retrain(rows, target).await?;

        Ok(RetrainOutcome {
            success: true,
            message: format!("Models successfully retrained for {target} prediction"),
            samples_used,
        })
    }

    /// Current serving status for the info endpoint.
    pub async fn model_status(&self) -> ModelStatus {
        let set = self.registry.snapshot().await;
        ModelStatus {
            state: self.registry.state().await,
            origin: set.origin,
            trained_at: set.trained_at,
            sequence_available: set.sequence.is_some(),
            classifier_available: set.classifier.is_some(),
        }
    }
}
