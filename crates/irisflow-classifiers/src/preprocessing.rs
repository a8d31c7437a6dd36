//! Column selection and standardization.
//!
//! Provides a standard scaler that is fit once on training data and then
//! applied unchanged to any later table with the same named columns.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::data_handling::FeatureTable;
use crate::error::PipelineError;

/// Per-column mean/std standardizer bound to a fixed set of named columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Columns with a smaller population std are left unscaled (only centered).
    const MIN_STD: f64 = 1e-12;

    /// Select `columns` from `x` and transform them with the frozen statistics.
    pub fn transform(&self, x: &FeatureTable) -> Result<Array2<f64>, PipelineError> {
        let selected = x.select(&self.columns)?;
        Ok(transform_all(&selected, self))
    }
}

/// Fit a scaler on the named columns of `x`. Any other column is ignored.
pub fn fit_scaler(x: &FeatureTable, columns: &[String]) -> Result<StandardScaler, PipelineError> {
    let selected = x.select(columns)?;
    if selected.nrows() == 0 {
        return Err(PipelineError::Training(
            "cannot fit a scaler on an empty table".to_string(),
        ));
    }

    let mean = selected
        .mean_axis(Axis(0))
        .ok_or_else(|| PipelineError::Training("cannot fit a scaler on an empty table".into()))?;
    let std = selected
        .std_axis(Axis(0), 0.0)
        .mapv(|s| if s < StandardScaler::MIN_STD { 1.0 } else { s });

    Ok(StandardScaler {
        columns: columns.to_vec(),
        mean: mean.to_vec(),
        std: std.to_vec(),
    })
}

/// Transform all rows using the provided `StandardScaler`. Columns of `x` must
/// already be in the scaler's column order.
pub fn transform_all(x: &Array2<f64>, sc: &StandardScaler) -> Array2<f64> {
    let mean = Array1::from_vec(sc.mean.clone());
    let std = Array1::from_vec(sc.std.clone());
    (x - &mean) / &std
}
