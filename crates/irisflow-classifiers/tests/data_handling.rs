//! Integration tests for CSV loading and train/test splitting.

mod common;

use std::collections::BTreeSet;
use std::io::Write;

use irisflow_classifiers::data_handling::{load_iris, read_labeled_csv, split_data, IRIS_TARGET};
use irisflow_classifiers::error::PipelineError;

use common::synthetic_iris;

// ---------------------------------------------------------------------------
// split_data
// ---------------------------------------------------------------------------

#[test]
fn split_sizes_follow_ratio() {
    let (x, y) = load_iris().unwrap();
    let split = split_data(&x, &y, 0.2, 7).unwrap();
    assert_eq!(split.test_x.nrows(), 30);
    assert_eq!(split.test_y.len(), 30);
    assert_eq!(split.train_x.nrows(), 120);
    assert_eq!(split.train_y.len(), 120);
}

#[test]
fn split_partitions_are_disjoint_and_complete() {
    // row_id is unique per row, so it identifies where each row went
    let (x, y) = synthetic_iris(50);
    let split = split_data(&x, &y, 0.3, 1).unwrap();
    let ids = |t: &irisflow_classifiers::data_handling::FeatureTable| -> BTreeSet<i64> {
        t.select(&["row_id"]).unwrap().iter().map(|v| *v as i64).collect()
    };
    let train = ids(&split.train_x);
    let test = ids(&split.test_x);
    assert!(train.is_disjoint(&test));
    assert_eq!(train.len() + test.len(), 50);
}

#[test]
fn split_is_deterministic_for_a_seed() {
    let (x, y) = synthetic_iris(40);
    let a = split_data(&x, &y, 0.25, 99).unwrap();
    let b = split_data(&x, &y, 0.25, 99).unwrap();
    assert_eq!(a.test_x, b.test_x);
    assert_eq!(a.train_y, b.train_y);
}

#[test]
fn split_rejects_out_of_range_ratio() {
    let (x, y) = synthetic_iris(10);
    assert!(matches!(
        split_data(&x, &y, 1.0, 0),
        Err(PipelineError::Configuration(_))
    ));
    assert!(matches!(
        split_data(&x, &y, 0.0, 0),
        Err(PipelineError::Configuration(_))
    ));
}

#[test]
fn split_rejects_ratio_leaving_no_test_rows() {
    let (x, y) = synthetic_iris(4);
    assert!(matches!(
        split_data(&x, &y, 0.1, 0),
        Err(PipelineError::Data(_))
    ));
}

// ---------------------------------------------------------------------------
// read_labeled_csv
// ---------------------------------------------------------------------------

#[test]
fn reads_iris_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iris.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "sepal_length,sepal_width,petal_length,petal_width,species").unwrap();
    writeln!(f, "5.1,3.5,1.4,0.2,setosa").unwrap();
    writeln!(f, "7.0,3.2,4.7,1.4,versicolor").unwrap();
    writeln!(f, "6.3,3.3,6.0,2.5,virginica").unwrap();
    drop(f);

    let (x, y) = read_labeled_csv(&path, IRIS_TARGET).unwrap();
    assert_eq!(x.nrows(), 3);
    assert_eq!(x.columns().len(), 4);
    assert_eq!(y, vec!["setosa", "versicolor", "virginica"]);
    assert_eq!(x.values()[(1, 2)], 4.7);
}

#[test]
fn non_numeric_feature_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "a,species\nfoo,setosa\n").unwrap();
    match read_labeled_csv(&path, IRIS_TARGET) {
        Err(PipelineError::Data(msg)) => assert!(msg.contains("not numeric")),
        other => panic!("expected data error, got {:?}", other),
    }
}

#[test]
fn missing_target_column_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unlabeled.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();
    assert!(matches!(
        read_labeled_csv(&path, IRIS_TARGET),
        Err(PipelineError::Data(_))
    ));
}
