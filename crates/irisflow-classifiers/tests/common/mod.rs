#![allow(dead_code)]

use ndarray::Array2;
use serde_json::json;

use irisflow_classifiers::config::Parameters;
use irisflow_classifiers::data_handling::{FeatureTable, IRIS_CLASSES, IRIS_FEATURES};

/// Deterministic iris-like rows: classes cycle 0, 1, 2 and each row is a
/// class centroid plus a small bounded offset.
pub fn synthetic_iris(n: usize) -> (FeatureTable, Vec<String>) {
    let centers = [
        [5.0, 3.4, 1.5, 0.2],
        [5.9, 2.8, 4.3, 1.3],
        [6.6, 3.0, 5.6, 2.0],
    ];
    let mut values = Vec::with_capacity(n * 5);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let class = i % 3;
        let jitter = ((i * 37 % 11) as f64 - 5.0) * 0.03;
        let c = centers[class];
        values.extend_from_slice(&[
            c[0] + jitter,
            c[1] - jitter,
            c[2] + 0.5 * jitter,
            c[3] - 0.5 * jitter,
            i as f64,
        ]);
        labels.push(IRIS_CLASSES[class].to_string());
    }
    let mut columns: Vec<String> = IRIS_FEATURES.iter().map(|c| c.to_string()).collect();
    columns.push("row_id".to_string());
    let table = FeatureTable::new(columns, Array2::from_shape_vec((n, 5), values).unwrap()).unwrap();
    (table, labels)
}

pub fn parameters(scaled: bool) -> Parameters {
    let model_params = json!({"max_iter": 200, "random_state": 0});
    Parameters {
        model_params: model_params.as_object().cloned(),
        model_standard_scaler: scaled,
        ..Parameters::default()
    }
}

pub fn head(x: &FeatureTable, y: &[String], n: usize) -> (FeatureTable, Vec<String>) {
    let rows: Vec<usize> = (0..n).collect();
    (x.select_rows(&rows), y[..n].to_vec())
}

pub fn tail(x: &FeatureTable, y: &[String], from: usize) -> (FeatureTable, Vec<String>) {
    let rows: Vec<usize> = (from..x.nrows()).collect();
    (x.select_rows(&rows), y[from..].to_vec())
}

/// The same table restricted to the four iris feature columns.
pub fn features_only(x: &FeatureTable) -> FeatureTable {
    let columns = IRIS_FEATURES.iter().map(|c| c.to_string()).collect();
    FeatureTable::new(columns, x.select(&IRIS_FEATURES).unwrap()).unwrap()
}
