//! Feature tables, the bundled iris dataset, CSV loading and train/test splitting.
use std::collections::HashSet;
use std::path::Path;

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::PipelineError;

/// Feature columns of the iris dataset, in canonical order.
pub const IRIS_FEATURES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Class names of the iris dataset, indexed by the bundled integer targets.
pub const IRIS_CLASSES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Column holding the class label in iris CSV files.
pub const IRIS_TARGET: &str = "species";

/// An ordered collection of named numeric columns, one row per example.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self, PipelineError> {
        if columns.len() != values.ncols() {
            return Err(PipelineError::Data(format!(
                "{} column names for {} columns of data",
                columns.len(),
                values.ncols()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(PipelineError::Data(format!("duplicate column {:?}", dup)));
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Gather the named columns, in the order given, into a new matrix.
    ///
    /// Fails with [`PipelineError::SchemaMismatch`] listing every missing column.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<f64>, PipelineError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name.as_ref()) {
                Some(i) => indices.push(i),
                None => missing.push(name.as_ref().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PipelineError::SchemaMismatch { missing });
        }
        Ok(self.values.select(Axis(1), &indices))
    }

    /// Keep only the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> FeatureTable {
        FeatureTable {
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), rows),
        }
    }
}

/// Labeled data split into training and held-out partitions.
#[derive(Debug, Clone)]
pub struct Split {
    pub train_x: FeatureTable,
    pub train_y: Vec<String>,
    pub test_x: FeatureTable,
    pub test_y: Vec<String>,
}

/// The canonical 150-row iris dataset bundled with `linfa-datasets`.
pub fn load_iris() -> Result<(FeatureTable, Vec<String>), PipelineError> {
    let dataset = linfa_datasets::iris();
    let labels = dataset
        .targets()
        .iter()
        .map(|&t| {
            IRIS_CLASSES
                .get(t)
                .map(|c| c.to_string())
                .ok_or_else(|| PipelineError::Data(format!("unknown iris target {}", t)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let columns = IRIS_FEATURES.iter().map(|c| c.to_string()).collect();
    let table = FeatureTable::new(columns, dataset.records().to_owned())?;
    Ok((table, labels))
}

/// Read a CSV file with a header row. Every column except `target_column`
/// must be numeric and becomes a feature column.
pub fn read_labeled_csv<P: AsRef<Path>>(
    path: P,
    target_column: &str,
) -> Result<(FeatureTable, Vec<String>), PipelineError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| PipelineError::Data(format!("{}: {}", path.display(), e)))?;
    let headers = reader
        .headers()
        .map_err(|e| PipelineError::Data(format!("{}: {}", path.display(), e)))?
        .clone();

    let target_idx = headers.iter().position(|h| h == target_column).ok_or_else(|| {
        PipelineError::Data(format!(
            "{}: missing target column {:?}",
            path.display(),
            target_column
        ))
    })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| PipelineError::Data(format!("{}: {}", path.display(), e)))?;
        for (i, field) in record.iter().enumerate() {
            if i == target_idx {
                labels.push(field.to_string());
                continue;
            }
            let v: f64 = field.trim().parse().map_err(|_| {
                PipelineError::Data(format!(
                    "{}: row {}: column {:?} is not numeric: {:?}",
                    path.display(),
                    line + 1,
                    headers.get(i).unwrap_or_default(),
                    field
                ))
            })?;
            values.push(v);
        }
    }

    let nrows = labels.len();
    let matrix = Array2::from_shape_vec((nrows, columns.len()), values)
        .map_err(|e| PipelineError::Data(format!("{}: {}", path.display(), e)))?;
    Ok((FeatureTable::new(columns, matrix)?, labels))
}

/// Shuffle rows with a seeded RNG and hold out `floor(n * test_ratio)` of them.
pub fn split_data(
    x: &FeatureTable,
    y: &[String],
    test_ratio: f64,
    seed: u64,
) -> Result<Split, PipelineError> {
    if x.nrows() != y.len() {
        return Err(PipelineError::Data(format!(
            "{} feature rows but {} labels",
            x.nrows(),
            y.len()
        )));
    }
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(PipelineError::Configuration(format!(
            "example_test_data_ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }

    let n = x.nrows();
    let n_test = (n as f64 * test_ratio).floor() as usize;
    if n_test == 0 || n_test == n {
        return Err(PipelineError::Data(format!(
            "cannot split {} rows with test ratio {}",
            n, test_ratio
        )));
    }

    let mut rows: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
    let (test_rows, train_rows) = rows.split_at(n_test);

    log::debug!(
        "Split {} rows into {} train / {} test (seed {})",
        n,
        train_rows.len(),
        test_rows.len(),
        seed
    );

    Ok(Split {
        train_x: x.select_rows(train_rows),
        train_y: train_rows.iter().map(|&i| y[i].clone()).collect(),
        test_x: x.select_rows(test_rows),
        test_y: test_rows.iter().map(|&i| y[i].clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn table() -> FeatureTable {
        FeatureTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn select_reorders_by_name() {
        let m = table().select(&["c", "a"]).unwrap();
        assert_eq!(m, array![[3.0, 1.0], [6.0, 4.0]]);
    }

    #[test]
    fn select_reports_all_missing_columns() {
        match table().select(&["a", "x", "y"]) {
            Err(PipelineError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["x".to_string(), "y".to_string()])
            }
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = FeatureTable::new(vec!["a".into(), "a".into()], array![[1.0, 2.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn bundled_iris_has_canonical_shape() {
        let (x, y) = load_iris().unwrap();
        assert_eq!(x.nrows(), 150);
        assert_eq!(x.columns(), IRIS_FEATURES.map(String::from).as_slice());
        assert_eq!(y.iter().filter(|l| *l == "setosa").count(), 50);
    }
}
