//! Wire types for the HTTP surface

use serde::{Deserialize, Serialize};

use crate::logic::observation::Observation;
use crate::logic::pipeline::PredictionResult;

/// Ordered rows for the batch endpoint; each row is processed independently
/// through the single-row pipeline.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub rows: Vec<Observation>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<PredictionResult>,
}

/// Ordered window of exactly `WINDOW` consecutive time steps.
#[derive(Debug, Deserialize)]
pub struct WindowRequest {
    pub steps: Vec<Observation>,
}

/// Diagnostic snapshot; not part of the decision logic.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
    pub labels: Vec<String>,
    pub feats: Vec<String>,
    pub has_scaler: bool,
    pub thresholds_loaded: bool,
    pub timestamp: i64,
}
