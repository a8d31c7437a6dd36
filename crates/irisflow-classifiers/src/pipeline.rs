//! Two-stage fit/predict pipeline: an optional column scaler followed by the
//! classifier.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ModelParams;
use crate::data_handling::FeatureTable;
use crate::error::PipelineError;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_model;
use crate::preprocessing::{fit_scaler, StandardScaler};

/// Stage name of the optional scaler.
pub const SCALER_STEP: &str = "scaler";
/// Stage name of the classifier; always the final stage.
pub const MODEL_STEP: &str = "model";

/// An unfitted pipeline. Consumed by [`Pipeline::fit`].
pub struct Pipeline {
    scaler_columns: Option<Vec<String>>,
    model: Box<dyn ClassifierModel>,
}

impl Pipeline {
    /// A single-stage pipeline containing only the classifier.
    pub fn new(params: ModelParams) -> Self {
        Self {
            scaler_columns: None,
            model: build_model(params),
        }
    }

    /// Prepend a scaler that selects and standardizes `columns`. Every other
    /// column is dropped before the classifier.
    pub fn with_scaler<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.scaler_columns = Some(columns.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    pub fn steps(&self) -> Vec<&'static str> {
        step_names(self.scaler_columns.is_some())
    }

    /// Fit every stage against the full table.
    ///
    /// Schema problems surface as [`PipelineError::Training`].
    pub fn fit(self, x: &FeatureTable, y: &[String]) -> Result<FittedPipeline, PipelineError> {
        let Pipeline {
            scaler_columns,
            mut model,
        } = self;

        if x.nrows() != y.len() {
            return Err(PipelineError::Training(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }

        let (scaler, feature_names, features) = match scaler_columns {
            Some(columns) => {
                let scaler = fit_scaler(x, &columns).map_err(into_training)?;
                let features = scaler.transform(x).map_err(into_training)?;
                (Some(scaler), columns, features)
            }
            None => (None, x.columns().to_vec(), x.values().clone()),
        };

        model.fit(&features, y)?;

        Ok(FittedPipeline {
            feature_names,
            scaler,
            model,
        })
    }
}

fn into_training(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::SchemaMismatch { missing } => PipelineError::Training(format!(
            "training table is missing scaler columns: {}",
            missing.join(", ")
        )),
        other => other,
    }
}

fn step_names(scaled: bool) -> Vec<&'static str> {
    if scaled {
        vec![SCALER_STEP, MODEL_STEP]
    } else {
        vec![MODEL_STEP]
    }
}

/// A fitted pipeline. Its stages are frozen; prediction only reads them.
pub struct FittedPipeline {
    feature_names: Vec<String>,
    scaler: Option<StandardScaler>,
    model: Box<dyn ClassifierModel>,
}

impl FittedPipeline {
    pub fn steps(&self) -> Vec<&'static str> {
        step_names(self.scaler.is_some())
    }

    /// Columns a feature table must provide at prediction time.
    pub fn required_columns(&self) -> &[String] {
        &self.feature_names
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    pub fn model_params(&self) -> &ModelParams {
        self.model.params()
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predict one label per row of `x`, in row order.
    pub fn predict(&self, x: &FeatureTable) -> Result<Vec<String>, PipelineError> {
        let features = match &self.scaler {
            Some(scaler) => scaler.transform(x)?,
            None => x.select(&self.feature_names)?,
        };
        self.model.predict(&features)
    }

    /// Serializable description of the fitted pipeline.
    pub fn card(&self) -> PipelineCard {
        PipelineCard {
            steps: self.steps().iter().map(|s| s.to_string()).collect(),
            feature_names: self.feature_names.clone(),
            classes: self.classes().to_vec(),
            scaler: self.scaler.clone(),
            model: self.model_name().to_string(),
            hyperparameters: self.model_params().clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Graphviz description of the pipeline structure.
    pub fn to_dot(&self) -> String {
        let mut lines = vec![
            "digraph pipeline {".to_string(),
            "    rankdir=LR;".to_string(),
            "    node [shape=box, fontname=\"Helvetica\"];".to_string(),
            format!(
                "    \"input\" [shape=ellipse, label=\"input\\n{}\"];",
                self.feature_names.join("\\n")
            ),
        ];

        let mut previous = "input";
        if let Some(scaler) = &self.scaler {
            lines.push(format!(
                "    \"{}\" [label=\"{}\\nStandardScaler({} columns)\"];",
                SCALER_STEP,
                SCALER_STEP,
                scaler.columns.len()
            ));
            lines.push(format!("    \"{}\" -> \"{}\";", previous, SCALER_STEP));
            previous = SCALER_STEP;
        }

        let params = self.model_params();
        lines.push(format!(
            "    \"{}\" [label=\"{}\\n{}(max_iter={}, C={})\"];",
            MODEL_STEP,
            MODEL_STEP,
            self.model_name(),
            params.max_iter,
            params.c
        ));
        lines.push(format!("    \"{}\" -> \"{}\";", previous, MODEL_STEP));
        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }
}

impl fmt::Debug for FittedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedPipeline")
            .field("steps", &self.steps())
            .field("feature_names", &self.feature_names)
            .field("scaler", &self.scaler)
            .field("model", &self.model_name())
            .field("classes", &self.classes())
            .finish()
    }
}

/// The JSON document logged as the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineCard {
    pub steps: Vec<String>,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub scaler: Option<StandardScaler>,
    pub model: String,
    pub hyperparameters: ModelParams,
    pub created_at: String,
}
