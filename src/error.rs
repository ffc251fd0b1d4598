//! Error handling
//!
//! Client input problems (bad window, missing feature) and server-side
//! model/label-table skew must stay distinguishable in the payload; the
//! `kind` field carries that distinction.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::PipelineError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request shape: wrong window length or missing feature.
    #[error("{0}")]
    Shape(String),

    /// Model output disagrees with the label table. Server-side; signals a
    /// deployment skew, never truncated away.
    #[error("{0}")]
    ModelSkew(String),

    /// The inference backend failed.
    #[error("{0}")]
    Inference(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Shape(_) => "shape",
            AppError::ModelSkew(_) => "model_skew",
            AppError::Inference(_) => "inference",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Shape(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ModelSkew(msg) => {
                tracing::error!("model skew: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Inference(msg) => {
                tracing::error!("inference error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "inference failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::WindowLength { .. } | PipelineError::MissingFeature(_) => {
                AppError::Shape(err.to_string())
            }
            PipelineError::OutputBatch(_) | PipelineError::LabelCount { .. } => {
                AppError::ModelSkew(err.to_string())
            }
            PipelineError::Inference(msg) => AppError::Inference(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_and_server_kinds_distinguishable() {
        let shape: AppError = PipelineError::WindowLength {
            expected: 8,
            got: 3,
        }
        .into();
        assert_eq!(shape.kind(), "shape");

        let skew: AppError = PipelineError::LabelCount {
            expected: 5,
            got: 7,
        }
        .into();
        assert_eq!(skew.kind(), "model_skew");
        assert_ne!(shape.kind(), skew.kind());
    }
}
