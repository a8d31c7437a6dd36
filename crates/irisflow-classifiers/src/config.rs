use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// Run parameters handed to the pipeline nodes.
///
/// `model_params` is kept as the raw mapping so the exact values supplied by
/// the user can be logged; [`Parameters::model_params`] validates it.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Parameters {
    pub model_params: Option<Map<String, Value>>,
    pub model_standard_scaler: bool,
    pub example_test_data_ratio: f64,
    pub random_state: u64,
    pub experiment_name: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            model_params: None,
            model_standard_scaler: false,
            example_test_data_ratio: 0.2,
            random_state: 42,
            experiment_name: "iris-classifier".to_string(),
        }
    }
}

impl Parameters {
    /// Default parameters with a populated `model_params` block, suitable as a
    /// starting point for a parameters file.
    pub fn template() -> Self {
        let mut model_params = Map::new();
        model_params.insert("max_iter".to_string(), Value::from(200));
        model_params.insert("random_state".to_string(), Value::from(0));
        Self {
            model_params: Some(model_params),
            model_standard_scaler: true,
            ..Self::default()
        }
    }

    /// Validate and return the classifier hyperparameters.
    pub fn model_params(&self) -> Result<ModelParams, PipelineError> {
        let raw = self.model_params.as_ref().ok_or_else(|| {
            PipelineError::Configuration("missing required key `model_params`".to_string())
        })?;
        ModelParams::from_map(raw)
    }

    /// The raw `model_params` as string key/value pairs, as they are logged.
    pub fn model_params_for_logging(&self) -> BTreeMap<String, String> {
        self.model_params
            .iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}

/// Hyperparameters of the multi-class logistic regression.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelParams {
    #[serde(default = "default_max_iter")]
    pub max_iter: u64,

    /// Inverse of the L2 regularisation strength.
    #[serde(rename = "C", default = "default_c")]
    pub c: f64,

    #[serde(default = "default_tol")]
    pub tol: f64,

    #[serde(default = "default_fit_intercept")]
    pub fit_intercept: bool,

    /// Accepted for reproducibility bookkeeping; the solver is deterministic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_state: Option<u64>,
}

fn default_max_iter() -> u64 {
    100
}

fn default_c() -> f64 {
    1.0
}

fn default_tol() -> f64 {
    1e-4
}

fn default_fit_intercept() -> bool {
    true
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            c: default_c(),
            tol: default_tol(),
            fit_intercept: default_fit_intercept(),
            random_state: None,
        }
    }
}

impl ModelParams {
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, PipelineError> {
        let params: ModelParams = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| PipelineError::Configuration(format!("model_params: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(PipelineError::Configuration(format!(
                "model_params: `C` must be a positive number, got {}",
                self.c
            )));
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(PipelineError::Configuration(format!(
                "model_params: `tol` must be a positive number, got {}",
                self.tol
            )));
        }
        Ok(())
    }

    /// L2 penalty passed to the solver.
    pub fn alpha(&self) -> f64 {
        1.0 / self.c
    }
}
