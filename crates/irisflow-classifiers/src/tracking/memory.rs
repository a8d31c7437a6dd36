use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::TrackingError;
use crate::pipeline::{FittedPipeline, PipelineCard};
use crate::tracking::Tracker;

/// One recorded tracker call.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    SetExperiment(String),
    LogModel {
        artifact_path: String,
        card: PipelineCard,
    },
    LogParams(BTreeMap<String, String>),
    LogArtifact {
        local_path: PathBuf,
        artifact_path: String,
    },
    LogMetric {
        key: String,
        value: f64,
    },
    SetTag {
        key: String,
        value: String,
    },
}

/// Tracker that keeps every call in memory, in call order.
#[derive(Debug, Default)]
pub struct InMemoryTracker {
    events: Vec<TrackingEvent>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TrackingEvent] {
        &self.events
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.events.iter().rev().find_map(|e| match e {
            TrackingEvent::LogMetric { key: k, value } if k == key => Some(*value),
            _ => None,
        })
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            TrackingEvent::SetTag { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }
}

impl Tracker for InMemoryTracker {
    fn set_experiment(&mut self, name: &str) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::SetExperiment(name.to_string()));
        Ok(())
    }

    fn log_model(
        &mut self,
        pipeline: &FittedPipeline,
        artifact_path: &str,
    ) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::LogModel {
            artifact_path: artifact_path.to_string(),
            card: pipeline.card(),
        });
        Ok(())
    }

    fn log_params(&mut self, params: &BTreeMap<String, String>) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::LogParams(params.clone()));
        Ok(())
    }

    fn log_artifact(
        &mut self,
        local_path: &Path,
        artifact_path: &str,
    ) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::LogArtifact {
            local_path: local_path.to_path_buf(),
            artifact_path: artifact_path.to_string(),
        });
        Ok(())
    }

    fn log_metric(&mut self, key: &str, value: f64) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::LogMetric {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn set_tag(&mut self, key: &str, value: &str) -> Result<(), TrackingError> {
        self.events.push(TrackingEvent::SetTag {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}
