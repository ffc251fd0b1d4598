//! Artifact bundle
//!
//! Everything the pipeline shares across requests, constructed once at
//! startup and immutable afterwards. Optional artifacts (scaler, affine
//! parameters, threshold table) degrade to documented fallbacks instead of
//! failing startup; each degradation is logged and reported on the health
//! surface. Only the model itself is mandatory.

use serde::de::DeserializeOwned;

use super::inference::{Classifier, OnnxClassifier};
use super::normalize::{AffineParams, FittedScaler, Normalizer};
use super::recommend::rules::SynthesisRules;
use super::recommend::Policy;
use super::schema::{ModelMode, ModelSchema};
use super::threshold::ThresholdTable;
use super::PipelineError;

/// Filesystem locations of the deployment's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: String,
    pub scaler: String,
    pub thresholds: String,
    pub norm: String,
}

/// Process-wide read-only state. Shared by reference into every request;
/// nothing here mutates after construction.
pub struct ArtifactBundle {
    pub schema: ModelSchema,
    pub classifier: Box<dyn Classifier>,
    pub normalizer: Normalizer,
    pub thresholds: ThresholdTable,
    pub policy: Policy,
    pub rules: SynthesisRules,
    /// A fitted scaler artifact was parsed (it may still bypass itself per
    /// request on width mismatch).
    pub scaler_active: bool,
    /// The threshold table came from the artifact file rather than a
    /// fallback.
    pub thresholds_loaded: bool,
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("schema", &self.schema)
            .field("classifier", &self.classifier.name())
            .field("thresholds", &self.thresholds)
            .field("policy", &self.policy)
            .field("scaler_active", &self.scaler_active)
            .field("thresholds_loaded", &self.thresholds_loaded)
            .finish_non_exhaustive()
    }
}

impl ArtifactBundle {
    /// One-time startup load. Call once and share the result; there is no
    /// reload path.
    pub fn load(
        paths: &ArtifactPaths,
        mode: ModelMode,
        policy: Policy,
    ) -> Result<Self, PipelineError> {
        let schema = ModelSchema::for_mode(mode);
        let classifier = OnnxClassifier::load(&paths.model, schema.window)?;

        // Prefer the fitted scaler when present; fall back to the affine
        // parameters, then to passthrough.
        let scaler: Option<FittedScaler> = load_json(&paths.scaler, "scaler");
        let affine: Option<AffineParams> = load_json(&paths.norm, "normalization params");
        let scaler_active = scaler.is_some();
        let normalizer = match (scaler, affine) {
            (Some(s), _) => Normalizer::Scaler(s),
            (None, Some(a)) => Normalizer::Affine(a),
            (None, None) => {
                tracing::warn!("no normalization artifact found, inputs pass through unscaled");
                Normalizer::Passthrough
            }
        };

        let loaded_table: Option<ThresholdTable> = load_json(&paths.thresholds, "thresholds");
        let thresholds_loaded = loaded_table.is_some();
        let thresholds = loaded_table.unwrap_or_else(|| match mode {
            ModelMode::Row => {
                tracing::warn!("thresholds unavailable, every label defaults to 0.5");
                ThresholdTable::default()
            }
            ModelMode::Window => ThresholdTable::window_defaults(),
        });

        tracing::info!(
            mode = ?mode,
            policy = ?policy,
            model = classifier.name(),
            scaler_active,
            thresholds_loaded,
            "artifact bundle ready"
        );

        Ok(Self {
            schema,
            classifier: Box::new(classifier),
            normalizer,
            thresholds,
            policy,
            rules: SynthesisRules::default(),
            scaler_active,
            thresholds_loaded,
        })
    }

    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        schema: ModelSchema,
        classifier: Box<dyn Classifier>,
        normalizer: Normalizer,
        thresholds: ThresholdTable,
        policy: Policy,
    ) -> Self {
        let scaler_active = normalizer.is_scaler();
        Self {
            schema,
            classifier,
            normalizer,
            thresholds,
            policy,
            rules: SynthesisRules::default(),
            scaler_active,
            thresholds_loaded: true,
        }
    }
}

/// Read and parse an optional JSON artifact. Absence or corruption degrades
/// to `None`; startup continues either way.
fn load_json<T: DeserializeOwned>(path: &str, what: &str) -> Option<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path, error = %e, "{what} artifact unavailable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path, error = %e, "{what} artifact unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_missing_file_degrades() {
        let loaded: Option<ThresholdTable> = load_json("/nonexistent/thresholds.json", "thresholds");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_json_corrupt_file_degrades() {
        let file = write_temp("{ not json");
        let loaded: Option<ThresholdTable> =
            load_json(file.path().to_str().unwrap(), "thresholds");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_json_scaler() {
        let file = write_temp(
            r#"{"n_features_in": 2, "mean": [1.0, 2.0], "scale": [0.5, 0.5]}"#,
        );
        let scaler: Option<FittedScaler> = load_json(file.path().to_str().unwrap(), "scaler");
        let scaler = scaler.unwrap();
        assert_eq!(scaler.n_features_in, 2);
        assert_eq!(scaler.mean, vec![1.0, 2.0]);
    }

    #[test]
    fn test_load_json_thresholds() {
        let file = write_temp(r#"{"lbl_gusts_ge_25kt": 0.35}"#);
        let table: Option<ThresholdTable> =
            load_json(file.path().to_str().unwrap(), "thresholds");
        let table = table.unwrap();
        assert_eq!(table.get("lbl_gusts_ge_25kt"), 0.35);
        assert_eq!(table.get("lbl_precip_start_1h"), 0.5);
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let paths = ArtifactPaths {
            model: "/nonexistent/model.onnx".to_string(),
            scaler: "/nonexistent/scaler.json".to_string(),
            thresholds: "/nonexistent/thresholds.json".to_string(),
            norm: "/nonexistent/norm.json".to_string(),
        };
        let err = ArtifactBundle::load(&paths, ModelMode::Row, Policy::Corroborated).unwrap_err();
        assert!(matches!(err, PipelineError::Inference(_)));
    }
}
