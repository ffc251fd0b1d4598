//! Recommendation synthesizer
//!
//! Turns model output into human-readable guidance. More than echoing
//! alerts as sentences: the corroborated policy gates
//! every flag on raw physical signals and suppresses likely sensor noise,
//! the templated policy deduplicates overlapping triggers. Output order is
//! deterministic for identical inputs.

pub mod corroborated;
pub mod rules;
pub mod templated;

use serde::{Deserialize, Serialize};

/// Emitted when nothing fires; recommendations are never empty.
pub const STABLE_CONDITIONS: &str =
    "Conditions remain stable. No significant changes expected within 60 minutes.";

/// Which synthesis policy the deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// One fixed sentence per alert; fits the label-rich windowed model.
    Templated,
    /// Dual-gated flags corroborated by raw signal deltas; fits the
    /// five-label single-row model.
    Corroborated,
}

/// Remove duplicate sentences, preserving first-seen order. Overlapping
/// trigger conditions may map to the same sentence; it must appear once.
pub(crate) fn dedup_preserve_order(sentences: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if !seen.contains(&sentence) {
            seen.push(sentence);
        }
    }
    seen
}
