use crate::error::PipelineError;

/// Fraction of positions where the prediction equals the true label.
///
/// # Arguments
///
/// * `predictions` - Predicted labels, in row order.
/// * `truth` - True labels, aligned with `predictions`.
///
/// # Returns
///
/// A value in `[0, 1]`. Fails with [`PipelineError::LengthMismatch`] if the
/// slices differ in length and [`PipelineError::EmptyInput`] if both are empty.
pub fn accuracy<T: PartialEq>(predictions: &[T], truth: &[T]) -> Result<f64, PipelineError> {
    if predictions.len() != truth.len() {
        return Err(PipelineError::LengthMismatch {
            predictions: predictions.len(),
            labels: truth.len(),
        });
    }
    if predictions.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let correct = predictions
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}
