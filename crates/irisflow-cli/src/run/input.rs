use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use irisflow_classifiers::config::Parameters;

use crate::run::util::validate_csv_file;

/// Everything the runner needs: pipeline parameters plus where to read data
/// from and where to record the run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub parameters: Parameters,
    /// Iris CSV file; `None` uses the bundled dataset.
    pub data: Option<String>,
    pub tracking_dir: PathBuf,
    /// Render the pipeline diagram with Graphviz into this directory.
    pub diagram_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            parameters: Parameters::template(),
            data: None,
            tracking_dir: PathBuf::from("mlruns"),
            diagram_dir: None,
        }
    }
}

impl RunConfig {
    pub fn from_arguments(config_path: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let mut config = RunConfig {
            parameters: load_parameters(config_path)?,
            ..RunConfig::default()
        };

        if let Some(data) = matches.get_one::<String>("data") {
            validate_csv_file(data)?;
            config.data = Some(data.clone());
        }

        if let Some(tracking_dir) = matches.get_one::<PathBuf>("tracking_dir") {
            config.tracking_dir = tracking_dir.clone();
        }

        if matches.get_flag("diagram") {
            config.diagram_dir = Some(PathBuf::from("."));
        }

        Ok(config)
    }
}

/// Load pipeline parameters from a JSON file.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<Parameters> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let parameters: Parameters = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(parameters)
}
