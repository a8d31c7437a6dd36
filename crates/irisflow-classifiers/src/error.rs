use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the pipeline nodes. None of them are recovered locally.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or invalid hyperparameters.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Schema or length mismatch while fitting, or a solver failure.
    #[error("training failed: {0}")]
    Training(String),

    /// The feature table lacks columns the fitted pipeline was trained on.
    #[error("feature table is missing required columns: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("predictions ({predictions}) and labels ({labels}) must have equal length")]
    LengthMismatch { predictions: usize, labels: usize },

    #[error("cannot evaluate an empty set of predictions")]
    EmptyInput,

    #[error("model has not been fitted")]
    NotFitted,

    #[error("failed to load data: {0}")]
    Data(String),

    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

/// Errors reported by a [`crate::tracking::Tracker`] implementation.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("no experiment has been set on the tracker")]
    NoActiveExperiment,

    #[error("invalid tracking key {0:?}")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Failure of the optional pipeline diagram step. This never aborts training.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("failed to write diagram source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("renderer did not produce {0}")]
    MissingOutput(PathBuf),

    #[error("failed to log diagram artifact: {0}")]
    Tracking(#[from] TrackingError),
}
