//! Marlin - maritime alert & recommendation inference service
//!
//! Turns a trained multi-label classifier's probabilities into operational
//! maritime alerts and human-readable guidance.
//!
//! # Architecture
//!
//! ```text
//! request ──> FeatureVector Builder ──> Normalizer ──> Inference Adapter
//!                                                            │
//! response <── Recommendation Synthesizer <── Alert Thresholder
//! ```
//!
//! Artifacts (model, scaler, thresholds, normalization params) are loaded
//! once at startup into an immutable bundle shared by every request.

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::artifacts::ArtifactBundle;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marlin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Marlin inference service starting...");

    // One-time artifact load; the bundle is immutable from here on.
    let bundle = ArtifactBundle::load(&config.paths, config.mode, config.policy)
        .map_err(|e| anyhow::anyhow!("artifact load failed: {e}"))?;

    let state = AppState {
        bundle: Arc::new(bundle),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub bundle: Arc<ArtifactBundle>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/reco/predict", post(handlers::predict::predict))
        .route("/reco/predict/batch", post(handlers::predict::predict_batch))
        .route("/predict-window", post(handlers::predict::predict_window))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
