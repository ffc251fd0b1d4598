//! Configuration module

use std::env;

use crate::logic::artifacts::ArtifactPaths;
use crate::logic::recommend::Policy;
use crate::logic::schema::ModelMode;

/// Application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Which trained model the service fronts
    pub mode: ModelMode,

    /// Recommendation synthesis policy
    pub policy: Policy,

    /// Artifact file locations
    pub paths: ArtifactPaths,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mode = match env::var("MODEL_MODE").as_deref() {
            Ok("window") => ModelMode::Window,
            _ => ModelMode::Row,
        };

        // The windowed deployment ships the label-rich templated policy; the
        // single-row deployment corroborates against raw signals.
        let default_policy = match mode {
            ModelMode::Row => Policy::Corroborated,
            ModelMode::Window => Policy::Templated,
        };
        let policy = match env::var("RECO_POLICY").as_deref() {
            Ok("templated") => Policy::Templated,
            Ok("corroborated") => Policy::Corroborated,
            _ => default_policy,
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            mode,
            policy,

            paths: ArtifactPaths {
                model: env::var("MODEL_PATH")
                    .unwrap_or_else(|_| "models/model.onnx".to_string()),
                scaler: env::var("SCALER_PATH")
                    .unwrap_or_else(|_| "models/scaler.json".to_string()),
                thresholds: env::var("THRESHOLDS_PATH")
                    .unwrap_or_else(|_| "models/thresholds.json".to_string()),
                norm: env::var("NORM_PATH").unwrap_or_else(|_| "models/norm.json".to_string()),
            },
        }
    }
}
