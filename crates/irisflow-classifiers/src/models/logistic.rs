use std::collections::BTreeSet;

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};

use crate::config::ModelParams;
use crate::error::PipelineError;
use crate::models::classifier_trait::ClassifierModel;

/// Multinomial logistic regression backed by `linfa-logistic` (L-BFGS).
pub struct LogisticClassifier {
    model: Option<MultiFittedLogisticRegression<f64, String>>,
    classes: Vec<String>,
    params: ModelParams,
}

impl LogisticClassifier {
    pub fn new(params: ModelParams) -> Self {
        LogisticClassifier {
            model: None,
            classes: Vec::new(),
            params,
        }
    }
}

impl ClassifierModel for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[String]) -> Result<(), PipelineError> {
        if x.nrows() != y.len() {
            return Err(PipelineError::Training(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(PipelineError::Training(
                "cannot fit on an empty feature table".to_string(),
            ));
        }

        let classes: Vec<String> = y.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        if classes.len() < 2 {
            return Err(PipelineError::Training(format!(
                "need at least two classes to fit, got {:?}",
                classes
            )));
        }

        let dataset = Dataset::new(x.to_owned(), Array1::from_vec(y.to_vec()));
        let model = MultiLogisticRegression::default()
            .alpha(self.params.alpha())
            .gradient_tolerance(self.params.tol)
            .max_iterations(self.params.max_iter)
            .with_intercept(self.params.fit_intercept)
            .fit(&dataset)
            .map_err(|e| PipelineError::Training(e.to_string()))?;

        log::debug!(
            "Fitted logistic regression on {} rows x {} features, {} classes",
            x.nrows(),
            x.ncols(),
            classes.len()
        );

        self.model = Some(model);
        self.classes = classes;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<String>, PipelineError> {
        let model = self.model.as_ref().ok_or(PipelineError::NotFitted)?;
        let predictions: Array1<String> = model.predict(x);
        Ok(predictions.to_vec())
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn params(&self) -> &ModelParams {
        &self.params
    }

    fn name(&self) -> &str {
        "LogisticRegression"
    }
}
