//! Experiment tracking sidecar.
//!
//! Nodes receive a `&mut dyn Tracker` instead of talking to a process-wide
//! client. [`LocalTracker`] persists runs to a directory tree;
//! [`InMemoryTracker`] records calls for inspection in tests.
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::TrackingError;
use crate::pipeline::FittedPipeline;

pub mod local;
pub mod memory;

pub use local::LocalTracker;
pub use memory::{InMemoryTracker, TrackingEvent};

pub trait Tracker {
    /// Select (creating if needed) the experiment that subsequent calls record into.
    fn set_experiment(&mut self, name: &str) -> Result<(), TrackingError>;

    /// Persist a fitted pipeline under `artifact_path`.
    fn log_model(
        &mut self,
        pipeline: &FittedPipeline,
        artifact_path: &str,
    ) -> Result<(), TrackingError>;

    fn log_params(&mut self, params: &BTreeMap<String, String>) -> Result<(), TrackingError>;

    /// Copy a local file into the run's artifacts under `artifact_path`.
    fn log_artifact(&mut self, local_path: &Path, artifact_path: &str)
        -> Result<(), TrackingError>;

    fn log_metric(&mut self, key: &str, value: f64) -> Result<(), TrackingError>;

    fn set_tag(&mut self, key: &str, value: &str) -> Result<(), TrackingError>;
}

/// Keys become file or directory names, so they must be a single plain path segment.
pub(crate) fn validate_key(key: &str) -> Result<(), TrackingError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0');
    if bad {
        return Err(TrackingError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_must_be_single_segments() {
        assert!(validate_key("Model Version").is_ok());
        assert!(validate_key("accuracy").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
