//! House price prediction server.
//!
//! Serves `/health`, `/predict` and `/batch-predict`. The process starts even
//! when the model artifacts are missing; they are loaded on first use and
//! picked up as soon as they appear on disk.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/trained/house_price_model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `BIND_ADDRESS` - Interface to listen on (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `CORS_ENABLED` - Allow cross-origin browser clients (default: true)
//! - `MODEL_PATH` / `PREPROCESSOR_PATH` - Artifact locations

use anyhow::{Context, Result};
use house_price_api::application::ml::InferenceService;
use house_price_api::config::Config;
use house_price_api::infrastructure::ml::FileArtifactSource;
use house_price_api::interfaces::http;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("House Price Prediction API {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: model={:?}, preprocessor={:?}",
        config.artifacts.model_path, config.artifacts.preprocessor_path
    );

    let service = Arc::new(InferenceService::new(Box::new(
        FileArtifactSource::from_config(&config.artifacts),
    )));

    // Warm-up only; a missing artifact must not stop the server.
    let warmup = Arc::clone(&service);
    let health = tokio::task::spawn_blocking(move || warmup.health_check()).await?;
    if health.model_loaded {
        info!("Model artifacts ready.");
    } else {
        warn!("Starting without model artifacts; /predict will return 503 until they are available.");
    }

    let addr = config.server.socket_addr()?;
    let app = http::router(service, config.server.cors_enabled);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server ready on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
