use space_traffic_ai::{
    api::{build_router, AppState},
    config::Config,
    ml::ModelRegistry,
    processing::PredictionProcessor,
};
use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "space_traffic_ai=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    tracing::info!("Starting Space Traffic AI v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Model store: {}", config.models.store_path.display());

    // Restore persisted models or bootstrap from synthetic data. Training
    // runs on a blocking thread so the runtime stays responsive.
    let model_config = config.models.clone();
    let registry =
        tokio::task::spawn_blocking(move || ModelRegistry::initialize(&model_config)).await??;
    let registry = Arc::new(registry);
    tracing::info!("✅ Model registry initialized");

    // Create the prediction processor
    let processor = Arc::new(PredictionProcessor::new(
        registry.clone(),
        &config.prediction,
    ));
    tracing::info!("✅ Prediction processor initialized");

    // Create application state and build the HTTP router
    let app_state = AppState::new(processor);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("🚀 HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Impact analysis: http://{}/ai/simulate-impact", http_addr);
    tracing::info!("   Risk prediction: http://{}/ai/predict-risk", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tracing::info!("✅ Server started successfully");
    tracing::info!("Press Ctrl+C to shutdown");

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
