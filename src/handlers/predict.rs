//! Prediction handlers
//!
//! Thin adapters over the pipeline: deserialize, run, serialize. All shape
//! policy lives in the pipeline itself.

use axum::{extract::State, Json};

use crate::logic::observation::Observation;
use crate::logic::pipeline::{self, PredictionResult};
use crate::models::{BatchRequest, BatchResponse, WindowRequest};
use crate::{AppResult, AppState};

/// One observation through the single-row pipeline.
pub async fn predict(
    State(state): State<AppState>,
    Json(obs): Json<Observation>,
) -> AppResult<Json<PredictionResult>> {
    let result = pipeline::predict_row(&state.bundle, &obs)?;
    Ok(Json(result))
}

/// Ordered rows, processed independently, results in input order.
pub async fn predict_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> AppResult<Json<BatchResponse>> {
    let results = pipeline::predict_batch(&state.bundle, &req.rows)?;
    Ok(Json(BatchResponse { results }))
}

/// Exactly `WINDOW` consecutive steps through the windowed pipeline; any
/// other length comes back as a 400 with the shape detail.
pub async fn predict_window(
    State(state): State<AppState>,
    Json(req): Json<WindowRequest>,
) -> AppResult<Json<PredictionResult>> {
    let result = pipeline::predict_window(&state.bundle, &req.steps)?;
    Ok(Json(result))
}
