use crate::config::ModelParams;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::logistic::LogisticClassifier;

/// Build a boxed, unfitted classifier from validated hyperparameters.
pub fn build_model(params: ModelParams) -> Box<dyn ClassifierModel> {
    Box::new(LogisticClassifier::new(params))
}
