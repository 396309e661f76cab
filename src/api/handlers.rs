use crate::api::AppState;
use crate::error::Result;
use crate::ml::TrainingRow;
use crate::models::{
    EventType, ImpactAssessment, PersonalizedAdvice, RealTimeAssessment, RiskAssessment,
    RiskTolerance, SimulationParameters, SimulationRecord, SimulationState, SkillLevel,
};
use crate::processing::{ModelStatus, RetrainOutcome};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Space Traffic Simulator AI Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Service info endpoint
pub async fn service_info(State(state): State<AppState>) -> Result<Json<ServiceInfoResponse>> {
    Ok(Json(ServiceInfoResponse {
        message: "Space Traffic Simulator AI Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "POST /ai/simulate-impact".to_string(),
            "POST /ai/predict-risk".to_string(),
            "POST /ai/retrain".to_string(),
            "POST /ai/real-time-prediction".to_string(),
            "POST /ai/personalized-recommendations".to_string(),
            "GET /health".to_string(),
        ],
        models: state.processor.model_status().await,
    }))
}

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub models: ModelStatus,
}

/// Analyze simulation results and predict impacts on space traffic
pub async fn simulate_impact(
    State(state): State<AppState>,
    Json(request): Json<SimulateImpactRequest>,
) -> Result<Json<ImpactAssessment>> {
    request.validate()?;

    let assessment = state
        .processor
        .assess_impact(&request.simulation_id, &request.after_state)
        .await?;

    Ok(Json(assessment))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulateImpactRequest {
    #[validate(length(min = 1))]
    pub simulation_id: String,
    pub before_state: SimulationState,
    pub after_state: SimulationState,
    /// Change summary forwarded by the simulation front end; informational
    #[serde(default)]
    pub changes: serde_json::Value,
}

/// Detailed risk assessment for a proposed scenario
pub async fn predict_risk(
    State(state): State<AppState>,
    Json(request): Json<RiskPredictionRequest>,
) -> Result<Json<RiskAssessment>> {
    let assessment = state
        .processor
        .predict_risk(request.event_type, &request.parameters)
        .await?;

    Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPredictionRequest {
    pub event_type: EventType,
    pub parameters: SimulationParameters,
}

/// Real-time predictive analytics with personalization and environmental
/// adjustment
pub async fn real_time_prediction(
    State(state): State<AppState>,
    Json(request): Json<RealTimePredictionRequest>,
) -> Result<Json<RealTimeAssessment>> {
    request.validate()?;

    let assessment = state
        .processor
        .predict_realtime(
            &request.user_id,
            &request.parameters,
            &request.current_state,
            &request.user_history,
            &request.environmental_factors,
            request.time_horizon,
        )
        .await?;

    Ok(Json(assessment))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RealTimePredictionRequest {
    pub parameters: SimulationParameters,
    pub current_state: SimulationState,
    #[validate(length(min = 1))]
    pub user_id: String,
    /// Previous simulation data for personalization
    #[serde(default)]
    pub user_history: Vec<SimulationRecord>,
    /// Real-time space weather, debris activity, etc.
    #[serde(default)]
    pub environmental_factors: HashMap<String, f64>,
    /// Hours into the future to predict
    #[serde(default = "default_time_horizon")]
    pub time_horizon: u32,
}

fn default_time_horizon() -> u32 {
    24
}

/// Personalized recommendations from history and preferences
pub async fn personalized_recommendations(
    State(state): State<AppState>,
    Json(request): Json<PersonalizedRecommendationRequest>,
) -> Result<Json<PersonalizedAdvice>> {
    request.validate()?;

    let advice = state
        .processor
        .personalized_recommendations(
            &request.user_id,
            request.current_scenario.event_type.as_deref(),
            &request.simulation_history,
            request.skill_level,
            request.risk_tolerance,
        )
        .await?;

    Ok(Json(advice))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedRecommendationRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub current_scenario: ScenarioContext,
    /// Caller preference blob; echoed to the personalization layer as-is
    #[serde(default)]
    pub user_preferences: serde_json::Value,
    #[serde(default)]
    pub simulation_history: Vec<SimulationRecord>,
    pub skill_level: SkillLevel,
    pub risk_tolerance: RiskTolerance,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioContext {
    #[serde(default)]
    pub event_type: Option<String>,
}

/// Retrain models with new labeled data
pub async fn retrain(
    State(state): State<AppState>,
    Json(request): Json<RetrainRequest>,
) -> Result<Json<RetrainOutcome>> {
    let outcome = state
        .processor
        .retrain(&request.training_data, &request.target_variable)
        .await?;

    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrainRequest {
    pub training_data: Vec<TrainingRow>,
    /// Which target to train for: collision, congestion or debris
    pub target_variable: String,
}
