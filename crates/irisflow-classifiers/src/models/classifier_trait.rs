use ndarray::Array2;

use crate::config::ModelParams;
use crate::error::PipelineError;

/// A small trait abstraction for the estimator at the end of a pipeline.
/// Implementations take a dense feature matrix and string class labels.
pub trait ClassifierModel {
    /// Fit the model. `y` has one label per row of `x`.
    fn fit(&mut self, x: &Array2<f64>, y: &[String]) -> Result<(), PipelineError>;

    /// Predict one class label per row.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<String>, PipelineError>;

    /// Sorted distinct classes seen during fitting; empty before fitting.
    fn classes(&self) -> &[String];

    /// Hyperparameters the model was constructed with.
    fn params(&self) -> &ModelParams;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
