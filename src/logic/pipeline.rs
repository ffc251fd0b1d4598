//! The inference-to-recommendation pipeline
//!
//! Builder → Normalizer → Inference Adapter → Thresholder → Synthesizer.
//! One synchronous pass per request over the immutable artifact bundle; no
//! state survives the call.

use std::collections::BTreeMap;

use serde::Serialize;

use super::artifacts::ArtifactBundle;
use super::observation::Observation;
use super::recommend::{corroborated, templated, Policy};
use super::{features, inference, threshold, PipelineError};

/// Everything the caller gets back for one request row. Maps are BTreeMaps
/// so serialized output is deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub probabilities: BTreeMap<String, f32>,
    pub alerts: BTreeMap<String, u8>,
    pub recommendations: Vec<String>,
}

fn run(
    bundle: &ArtifactBundle,
    matrix: ndarray::Array2<f32>,
    synth_obs: &Observation,
) -> Result<PredictionResult, PipelineError> {
    let normalized = bundle.normalizer.apply(&matrix);
    let heads = bundle.classifier.predict(&normalized)?;
    let values = inference::probability_vector(&heads, bundle.schema.label_count())?;

    let probabilities: BTreeMap<String, f32> = bundle
        .schema
        .labels
        .iter()
        .zip(values)
        .map(|(&label, p)| (label.to_string(), p))
        .collect();

    let alerts = threshold::binarize(bundle.schema.labels, &probabilities, &bundle.thresholds);

    let recommendations = match bundle.policy {
        Policy::Templated => templated::synthesize(&alerts),
        Policy::Corroborated => corroborated::synthesize(synth_obs, &probabilities, &bundle.rules),
    };

    Ok(PredictionResult {
        probabilities,
        alerts,
        recommendations,
    })
}

/// Run one observation through the single-row pipeline.
pub fn predict_row(
    bundle: &ArtifactBundle,
    obs: &Observation,
) -> Result<PredictionResult, PipelineError> {
    let matrix = features::build_row(obs, &bundle.schema)?;
    run(bundle, matrix, obs)
}

/// Run an ordered window of exactly `WINDOW` observations through the
/// windowed pipeline. The corroborated policy, if configured, reads its raw
/// signals from the most recent step.
pub fn predict_window(
    bundle: &ArtifactBundle,
    steps: &[Observation],
) -> Result<PredictionResult, PipelineError> {
    let matrix = features::build_window(steps, &bundle.schema)?;
    // build_window guarantees a non-empty window.
    let latest = steps.last().expect("validated window is non-empty");
    run(bundle, matrix, latest)
}

/// Process each row independently through the single-row pipeline, results
/// in input order.
pub fn predict_batch(
    bundle: &ArtifactBundle,
    rows: &[Observation],
) -> Result<Vec<PredictionResult>, PipelineError> {
    rows.iter().map(|row| predict_row(bundle, row)).collect()
}
