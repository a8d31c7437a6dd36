//! The three pipeline nodes: train, predict and report.
//!
//! Each node receives its collaborators explicitly. Nodes run to completion
//! one after another; none of them keeps state between invocations.
use std::path::PathBuf;

use crate::config::Parameters;
use crate::data_handling::{FeatureTable, IRIS_FEATURES};
use crate::error::{DiagramError, PipelineError};
use crate::pipeline::{FittedPipeline, Pipeline};
use crate::report::diagram::DiagramRenderer;
use crate::stats::accuracy;
use crate::tracking::Tracker;

/// Artifact path for the fitted pipeline and its diagram.
pub const MODEL_ARTIFACT_PATH: &str = "model";
pub const ACCURACY_METRIC: &str = "accuracy";
pub const MODEL_VERSION_TAG: &str = "Model Version";
pub const MODEL_VERSION: &str = "1";

/// Result of [`train_model`].
#[derive(Debug)]
pub struct TrainOutput {
    /// The full fitted pipeline, including the scaler when one was requested.
    pub pipeline: FittedPipeline,
    /// Rendered diagram that was logged as an artifact, if any.
    pub diagram: Option<PathBuf>,
    /// Why the diagram step failed. Training itself still succeeded.
    pub diagram_error: Option<DiagramError>,
}

/// Fit a multi-class logistic regression, optionally behind a standard
/// scaler over the four iris feature columns, and record it to `tracker`.
///
/// Hyperparameters are validated before anything is fitted or tracked. After
/// fitting, the tracker receives, in order: the experiment name, the pipeline
/// under `"model"`, and the exact `model_params`. The pipeline diagram is
/// then rendered with `renderer` and logged under `"model"`; a failure there
/// is logged and returned in [`TrainOutput::diagram_error`].
pub fn train_model(
    train_x: &FeatureTable,
    train_y: &[String],
    parameters: &Parameters,
    tracker: &mut dyn Tracker,
    renderer: &dyn DiagramRenderer,
) -> Result<TrainOutput, PipelineError> {
    let model_params = parameters.model_params()?;

    let mut pipeline = Pipeline::new(model_params);
    if parameters.model_standard_scaler {
        pipeline = pipeline.with_scaler(&IRIS_FEATURES);
    }
    log::info!(
        "Training pipeline [{}] on {} rows",
        pipeline.steps().join(" -> "),
        train_x.nrows()
    );

    let pipeline = pipeline.fit(train_x, train_y)?;

    tracker.set_experiment(&parameters.experiment_name)?;
    tracker.log_model(&pipeline, MODEL_ARTIFACT_PATH)?;
    tracker.log_params(&parameters.model_params_for_logging())?;

    let (diagram, diagram_error) = match log_diagram(&pipeline, tracker, renderer) {
        Ok(diagram) => (diagram, None),
        Err(e) => {
            log::warn!("Pipeline diagram was not recorded: {}", e);
            (None, Some(e))
        }
    };

    Ok(TrainOutput {
        pipeline,
        diagram,
        diagram_error,
    })
}

fn log_diagram(
    pipeline: &FittedPipeline,
    tracker: &mut dyn Tracker,
    renderer: &dyn DiagramRenderer,
) -> Result<Option<PathBuf>, DiagramError> {
    let image = match renderer.render(&pipeline.to_dot())? {
        Some(image) => image,
        None => return Ok(None),
    };
    tracker.log_artifact(&image, MODEL_ARTIFACT_PATH)?;
    Ok(Some(image))
}

/// Predict labels for `test_x`, one per row and in row order.
pub fn predict(pipeline: &FittedPipeline, test_x: &FeatureTable) -> Result<Vec<String>, PipelineError> {
    pipeline.predict(test_x)
}

/// Human readable accuracy line, e.g. `Model accuracy on test set: 93.33%`.
pub fn accuracy_message(accuracy: f64) -> String {
    format!("Model accuracy on test set: {:.2}%", accuracy * 100.0)
}

/// Compute accuracy of `predictions` against `test_y`, log it and record it
/// to `tracker` together with the model version tag.
pub fn report_accuracy(
    predictions: &[String],
    test_y: &[String],
    tracker: &mut dyn Tracker,
) -> Result<f64, PipelineError> {
    let accuracy = accuracy(predictions, test_y)?;

    log::info!("{}", accuracy_message(accuracy));

    tracker.log_metric(ACCURACY_METRIC, accuracy)?;
    tracker.set_tag(MODEL_VERSION_TAG, MODEL_VERSION)?;
    Ok(accuracy)
}
