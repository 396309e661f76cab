use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health and service info
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::service_info))
        // Prediction endpoints
        .route("/ai/simulate-impact", post(handlers::simulate_impact))
        .route("/ai/predict-risk", post(handlers::predict_risk))
        .route("/ai/real-time-prediction", post(handlers::real_time_prediction))
        .route(
            "/ai/personalized-recommendations",
            post(handlers::personalized_recommendations),
        )
        // Retraining
        .route("/ai/retrain", post(handlers::retrain))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
