//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// Reports which artifacts are live. Diagnostic only; the pipeline never
/// consults this.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let bundle = &state.bundle;
    Json(HealthResponse {
        ok: true,
        model: bundle.model_name().to_string(),
        labels: bundle.schema.labels.iter().map(|s| s.to_string()).collect(),
        feats: bundle
            .schema
            .features
            .iter()
            .map(|s| s.to_string())
            .collect(),
        has_scaler: bundle.scaler_active,
        thresholds_loaded: bundle.thresholds_loaded,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
