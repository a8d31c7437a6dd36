use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::TrackingError;
use crate::pipeline::FittedPipeline;
use crate::tracking::{validate_key, Tracker};

/// File name of the serialized pipeline inside a model artifact directory.
pub const MODEL_FILE: &str = "model.json";

/// File-backed tracker.
///
/// Each tracker owns one run; its id is a UTC timestamp plus a random suffix,
/// so trackers created in the same millisecond still get distinct runs.
///
/// Layout: `<root>/<experiment>/<run_id>/{params,metrics,tags,artifacts}`.
/// Params and tags hold one file per key containing the value; metric files
/// get one `"<unix_millis> <value> <step>"` line per logged value.
#[derive(Debug)]
pub struct LocalTracker {
    root: PathBuf,
    run_id: String,
    run_dir: Option<PathBuf>,
    metric_steps: HashMap<String, u64>,
}

impl LocalTracker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            run_id: format!(
                "{}-{:08x}",
                Utc::now().format("%Y%m%dT%H%M%S%.3f"),
                rand::random::<u32>()
            ),
            run_dir: None,
            metric_steps: HashMap::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Directory of the active run, once an experiment has been set.
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }

    fn active_dir(&self, sub: &str) -> Result<PathBuf, TrackingError> {
        let run_dir = self
            .run_dir
            .as_ref()
            .ok_or(TrackingError::NoActiveExperiment)?;
        let dir = run_dir.join(sub);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn artifact_dir(&self, artifact_path: &str) -> Result<PathBuf, TrackingError> {
        let mut dir = self.active_dir("artifacts")?;
        for segment in artifact_path.split('/') {
            validate_key(segment)?;
            dir.push(segment);
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl Tracker for LocalTracker {
    fn set_experiment(&mut self, name: &str) -> Result<(), TrackingError> {
        validate_key(name)?;
        let run_dir = self.root.join(name).join(&self.run_id);
        fs::create_dir_all(&run_dir)?;
        log::info!("Tracking run {} in {}", self.run_id, run_dir.display());
        self.run_dir = Some(run_dir);
        Ok(())
    }

    fn log_model(
        &mut self,
        pipeline: &FittedPipeline,
        artifact_path: &str,
    ) -> Result<(), TrackingError> {
        let dir = self.artifact_dir(artifact_path)?;
        let file = fs::File::create(dir.join(MODEL_FILE))?;
        serde_json::to_writer_pretty(file, &pipeline.card())?;
        Ok(())
    }

    fn log_params(&mut self, params: &BTreeMap<String, String>) -> Result<(), TrackingError> {
        let dir = self.active_dir("params")?;
        for (key, value) in params {
            validate_key(key)?;
            fs::write(dir.join(key), value)?;
        }
        Ok(())
    }

    fn log_artifact(
        &mut self,
        local_path: &Path,
        artifact_path: &str,
    ) -> Result<(), TrackingError> {
        let file_name = local_path
            .file_name()
            .ok_or_else(|| TrackingError::InvalidKey(local_path.display().to_string()))?;
        let dir = self.artifact_dir(artifact_path)?;
        fs::copy(local_path, dir.join(file_name))?;
        Ok(())
    }

    fn log_metric(&mut self, key: &str, value: f64) -> Result<(), TrackingError> {
        validate_key(key)?;
        let dir = self.active_dir("metrics")?;
        let step = self.metric_steps.entry(key.to_string()).or_insert(0);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(key))?;
        writeln!(file, "{} {} {}", Utc::now().timestamp_millis(), value, step)?;
        *step += 1;
        Ok(())
    }

    fn set_tag(&mut self, key: &str, value: &str) -> Result<(), TrackingError> {
        validate_key(key)?;
        let dir = self.active_dir("tags")?;
        fs::write(dir.join(key), value)?;
        Ok(())
    }
}
