//! FeatureVector builder
//!
//! Maps observations into the numeric matrix the classifier consumes. Each
//! cell is `observation[feature_order[j]]`, looked up by name. Non-finite
//! values (NaN, ±inf) are replaced with 0.0 before normalization; that is a
//! defined substitution, not an error.

use ndarray::Array2;

use super::observation::Observation;
use super::schema::ModelSchema;
use super::PipelineError;

/// NaN and ±inf become 0.0. Checked after the f32 cast so values beyond f32
/// range sanitize too.
fn sanitize(value: f64) -> f32 {
    let v = value as f32;
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn fill_row(
    matrix: &mut Array2<f32>,
    row: usize,
    obs: &Observation,
    schema: &ModelSchema,
) -> Result<(), PipelineError> {
    for (col, &name) in schema.features.iter().enumerate() {
        let value = obs
            .feature(name)
            .ok_or_else(|| PipelineError::MissingFeature(name.to_string()))?;
        matrix[[row, col]] = sanitize(value);
    }
    Ok(())
}

/// Build a `(1, F)` matrix from a single observation.
pub fn build_row(obs: &Observation, schema: &ModelSchema) -> Result<Array2<f32>, PipelineError> {
    let mut matrix = Array2::<f32>::zeros((1, schema.feature_count()));
    fill_row(&mut matrix, 0, obs, schema)?;
    Ok(matrix)
}

/// Build a `(WINDOW, F)` matrix from an ordered window of observations.
/// A window of any other length is rejected, never padded or truncated.
pub fn build_window(
    steps: &[Observation],
    schema: &ModelSchema,
) -> Result<Array2<f32>, PipelineError> {
    let expected = schema.window.unwrap_or(1);
    if steps.len() != expected {
        return Err(PipelineError::WindowLength {
            expected,
            got: steps.len(),
        });
    }

    let mut matrix = Array2::<f32>::zeros((expected, schema.feature_count()));
    for (row, obs) in steps.iter().enumerate() {
        fill_row(&mut matrix, row, obs, schema)?;
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::observation::testing::calm_observation;

    #[test]
    fn test_build_row_follows_feature_order() {
        let schema = ModelSchema::row();
        let obs = calm_observation();
        let matrix = build_row(&obs, &schema).unwrap();

        assert_eq!(matrix.dim(), (1, 16));
        assert_eq!(matrix[[0, schema.feature_index("sog").unwrap()]], 8.0);
        assert_eq!(matrix[[0, schema.feature_index("dcog").unwrap()]], 12.0);
        assert_eq!(
            matrix[[0, schema.feature_index("hour_of_day").unwrap()]],
            14.0
        );
    }

    #[test]
    fn test_non_finite_values_sanitized_others_unchanged() {
        let schema = ModelSchema::row();
        let mut obs = calm_observation();
        obs.ws_t = f64::NAN;
        obs.temp_t1 = f64::INFINITY;
        obs.d_ws_1h = f64::NEG_INFINITY;

        let matrix = build_row(&obs, &schema).unwrap();

        assert!(matrix.iter().all(|v| v.is_finite()));
        assert_eq!(matrix[[0, schema.feature_index("ws_t").unwrap()]], 0.0);
        assert_eq!(matrix[[0, schema.feature_index("temp_t1").unwrap()]], 0.0);
        assert_eq!(matrix[[0, schema.feature_index("d_ws_1h").unwrap()]], 0.0);
        // A field that was finite is untouched.
        assert_eq!(matrix[[0, schema.feature_index("sog").unwrap()]], 8.0);
    }

    #[test]
    fn test_window_length_gate() {
        let schema = ModelSchema::window();
        let obs = calm_observation();

        let short = vec![obs.clone(); 7];
        let err = build_window(&short, &schema).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::WindowLength { expected: 8, got: 7 }
        ));
        assert!(err.is_client_error());

        let long = vec![obs.clone(); 9];
        assert!(build_window(&long, &schema).is_err());

        let exact = vec![obs; 8];
        let matrix = build_window(&exact, &schema).unwrap();
        assert_eq!(matrix.dim(), (8, 19));
    }

    #[test]
    fn test_missing_required_feature_is_client_error() {
        let schema = ModelSchema::window();
        let mut obs = calm_observation();
        obs.heading = None;

        let err = build_window(&vec![obs; 8], &schema).unwrap_err();
        assert!(matches!(err, PipelineError::MissingFeature(ref name) if name == "heading"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_row_schema_ignores_window_only_fields() {
        let schema = ModelSchema::row();
        let mut obs = calm_observation();
        obs.cog = None;
        obs.heading = None;
        obs.dsog = None;

        // The row feature order never asks for these names.
        assert!(build_row(&obs, &schema).is_ok());
    }
}
