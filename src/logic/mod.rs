//! Decision core: observation → features → normalize → infer → threshold →
//! recommend.
//!
//! Everything under this module is plain synchronous computation over an
//! immutable [`artifacts::ArtifactBundle`]; no HTTP types, no shared mutable
//! state between requests.

pub mod artifacts;
pub mod features;
pub mod inference;
pub mod normalize;
pub mod observation;
pub mod pipeline;
pub mod recommend;
pub mod schema;
pub mod threshold;

use thiserror::Error;

/// Failures the pipeline can raise. Raised once, synchronously, to the
/// immediate caller; no retries anywhere in the core.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Window of the wrong length (client input error).
    #[error("expected exactly {expected} steps, got {got}")]
    WindowLength { expected: usize, got: usize },

    /// An observation cannot supply a name the feature order requires
    /// (client input error).
    #[error("observation is missing feature `{0}`")]
    MissingFeature(String),

    /// Classifier produced a batch other than one row (model skew).
    #[error("unexpected batch size {0} in prediction, expected 1")]
    OutputBatch(usize),

    /// Classifier output width does not match the label set (model skew).
    #[error("model outputs {got} labels, expected {expected}")]
    LabelCount { expected: usize, got: usize },

    /// The inference backend itself failed.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl PipelineError {
    /// Client input errors, as opposed to server-side model/label-table
    /// skew. The two must stay distinguishable in the error payload.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::WindowLength { .. } | PipelineError::MissingFeature(_)
        )
    }
}
