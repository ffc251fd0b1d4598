//! Normalization strategies
//!
//! Applied to the raw feature matrix before inference. Two strategies:
//! a fixed affine transform fitted at training time, and an externally
//! fitted standard scaler. An incompatible or failing scaler degrades to
//! passthrough rather than failing the request; the degradation is logged
//! and visible on the health surface. Availability over correctness.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Guard against zero columns in the divisor.
const MIN_SPREAD: f32 = 1e-8;

/// Per-column mean/std fitted at training time, aligned to the feature
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffineParams {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

/// Externally fitted standard-scaler artifact. `n_features_in` is the width
/// the scaler was fitted on; a request matrix of any other width bypasses
/// the scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedScaler {
    pub n_features_in: usize,
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl FittedScaler {
    fn is_compatible(&self, width: usize) -> bool {
        self.n_features_in == width && self.mean.len() == width && self.scale.len() == width
    }
}

/// Normalizer chosen at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub enum Normalizer {
    /// No normalization artifact available.
    Passthrough,
    Affine(AffineParams),
    Scaler(FittedScaler),
}

impl Normalizer {
    /// `(x - mean) / spread` per column, same shape out as in. Incompatible
    /// parameters leave the matrix unchanged; inference always proceeds.
    pub fn apply(&self, matrix: &Array2<f32>) -> Array2<f32> {
        let width = matrix.ncols();
        match self {
            Normalizer::Passthrough => matrix.clone(),
            Normalizer::Affine(params) => {
                if params.mean.len() != width || params.std.len() != width {
                    tracing::warn!(
                        expected = params.mean.len(),
                        got = width,
                        "affine normalization width mismatch, passing through"
                    );
                    return matrix.clone();
                }
                shift_and_scale(matrix, &params.mean, &params.std)
            }
            Normalizer::Scaler(scaler) => {
                if !scaler.is_compatible(width) {
                    tracing::warn!(
                        expected = scaler.n_features_in,
                        got = width,
                        "fitted scaler incompatible with input width, passing through"
                    );
                    return matrix.clone();
                }
                shift_and_scale(matrix, &scaler.mean, &scaler.scale)
            }
        }
    }

    pub fn is_scaler(&self) -> bool {
        matches!(self, Normalizer::Scaler(_))
    }
}

fn shift_and_scale(matrix: &Array2<f32>, mean: &[f32], spread: &[f32]) -> Array2<f32> {
    let mut out = matrix.clone();
    for mut row in out.rows_mut() {
        for (col, value) in row.iter_mut().enumerate() {
            let divisor = spread[col].abs().max(MIN_SPREAD);
            *value = (*value - mean[col]) / divisor;
        }
    }
    out
}
