//! Inference adapter
//!
//! The trained classifier is opaque to the pipeline: numeric matrix in, one
//! or more output heads out. Anything that satisfies [`Classifier`] can be
//! swapped in without touching the rest of the pipeline; production uses an
//! ONNX Runtime session, tests use a deterministic stub.

use ndarray::{Array2, Axis};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::PipelineError;

/// Opaque multi-label classifier.
///
/// `input` is the normalized request matrix: one row for the single-row
/// model, `WINDOW` rows for the windowed model. Implementations return the
/// model's output heads in its declared head order, each already flattened
/// to `(batch, k)`.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &Array2<f32>) -> Result<Vec<Array2<f32>>, PipelineError>;

    /// Human-readable backend name for the health surface.
    fn name(&self) -> &str;
}

/// Concatenate output heads along the label axis and validate the contract:
/// exactly one row in the batch, exactly `label_count` total columns. A
/// violation signals model/label-table skew and fails the request; it is
/// never silently truncated.
pub fn probability_vector(
    heads: &[Array2<f32>],
    label_count: usize,
) -> Result<Vec<f32>, PipelineError> {
    let mut values = Vec::with_capacity(label_count);
    for head in heads {
        if head.nrows() != 1 {
            return Err(PipelineError::OutputBatch(head.nrows()));
        }
        values.extend(head.row(0).iter().copied());
    }

    if values.len() != label_count {
        return Err(PipelineError::LabelCount {
            expected: label_count,
            got: values.len(),
        });
    }

    Ok(values)
}

/// ONNX Runtime backend. The session is process-wide and read-only in
/// spirit; the mutex exists only because `Session::run` takes `&mut self`.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    /// Output names in the model's declared order; this IS the head order.
    output_names: Vec<String>,
    model_name: String,
    window: Option<usize>,
}

impl OnnxClassifier {
    /// Load a model file into a session. A missing or unreadable model is
    /// fatal at startup; there is no degraded inference mode.
    pub fn load(model_path: &str, window: Option<usize>) -> Result<Self, PipelineError> {
        tracing::info!(path = model_path, "loading ONNX model");

        if !std::path::Path::new(model_path).exists() {
            return Err(PipelineError::Inference(format!(
                "model not found: {model_path}"
            )));
        }

        let session = Session::builder()
            .map_err(|e| PipelineError::Inference(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::Inference(format!("optimization level: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| PipelineError::Inference(format!("load model: {e}")))?;

        let output_names: Vec<String> =
            session.outputs.iter().map(|o| o.name.clone()).collect();
        if output_names.is_empty() {
            return Err(PipelineError::Inference(
                "model declares no outputs".to_string(),
            ));
        }

        let model_name = std::path::Path::new(model_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| model_path.to_string());

        tracing::info!(model = %model_name, heads = output_names.len(), "ONNX model loaded");

        Ok(Self {
            session: Mutex::new(session),
            output_names,
            model_name,
            window,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &Array2<f32>) -> Result<Vec<Array2<f32>>, PipelineError> {
        // Windowed models take (1, WINDOW, F); row models take (rows, F).
        let input_tensor = if self.window.is_some() {
            let batched = input.clone().insert_axis(Axis(0));
            Value::from_array(batched)
                .map_err(|e| PipelineError::Inference(format!("input tensor: {e}")))?
        } else {
            Value::from_array(input.clone())
                .map_err(|e| PipelineError::Inference(format!("input tensor: {e}")))?
        };

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PipelineError::Inference(format!("run: {e}")))?;

        let mut heads = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let output = outputs
                .get(name)
                .ok_or_else(|| PipelineError::Inference(format!("missing output `{name}`")))?;
            let (shape, data) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| PipelineError::Inference(format!("extract `{name}`: {e}")))?;

            // Flatten to (batch, k), keeping the batch axis intact.
            let batch = shape.first().copied().unwrap_or(1).max(1) as usize;
            let width = data.len() / batch;
            let head = Array2::from_shape_vec((batch, width), data.to_vec())
                .map_err(|e| PipelineError::Inference(format!("reshape `{name}`: {e}")))?;
            heads.push(head);
        }

        Ok(heads)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubClassifier;
    use super::*;
    use ndarray::array;

    #[test]
    fn test_single_head_passthrough() {
        let heads = vec![array![[0.1_f32, 0.2, 0.3, 0.4, 0.5]]];
        let probs = probability_vector(&heads, 5).unwrap();
        assert_eq!(probs, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_multiple_heads_concatenated_in_order() {
        let heads = vec![
            array![[0.1_f32, 0.2]],
            array![[0.3_f32]],
            array![[0.4_f32, 0.5]],
        ];
        let probs = probability_vector(&heads, 5).unwrap();
        assert_eq!(probs, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_batch_skew_rejected() {
        let heads = vec![array![[0.1_f32, 0.2], [0.3, 0.4]]];
        let err = probability_vector(&heads, 2).unwrap_err();
        assert!(matches!(err, PipelineError::OutputBatch(2)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_label_count_skew_rejected() {
        let heads = vec![array![[0.1_f32, 0.2, 0.3]]];
        let err = probability_vector(&heads, 5).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::LabelCount { expected: 5, got: 3 }
        ));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_stub_classifier_roundtrip() {
        let stub = StubClassifier::with_probabilities(&[0.9, 0.1]);
        let input = array![[0.0_f32, 0.0]];
        let heads = stub.predict(&input).unwrap();
        let probs = probability_vector(&heads, 2).unwrap();
        assert_eq!(probs, vec![0.9, 0.1]);
    }
}
