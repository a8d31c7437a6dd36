use anyhow::{Context, Result};

use irisflow_classifiers::data_handling::{load_iris, read_labeled_csv, split_data, IRIS_TARGET};
use irisflow_classifiers::nodes::{predict, report_accuracy, train_model};
use irisflow_classifiers::report::diagram::{DiagramRenderer, GraphvizRenderer, NoopRenderer};
use irisflow_classifiers::tracking::LocalTracker;

use crate::run::input::RunConfig;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
}

/// Load data, split it, then run train -> predict -> report against a local tracker.
pub fn run_pipeline(config: &RunConfig) -> Result<RunSummary> {
    let (x, y) = match &config.data {
        Some(path) => {
            log::info!("Loading data from {}", path);
            read_labeled_csv(path, IRIS_TARGET)?
        }
        None => {
            log::info!("Using the bundled iris dataset");
            load_iris()?
        }
    };

    let params = &config.parameters;
    let split = split_data(&x, &y, params.example_test_data_ratio, params.random_state)
        .context("Failed to split data")?;
    log::info!(
        "Split {} rows into {} train / {} test",
        x.nrows(),
        split.train_x.nrows(),
        split.test_x.nrows()
    );

    let mut tracker = LocalTracker::new(&config.tracking_dir);
    let renderer: Box<dyn DiagramRenderer> = match &config.diagram_dir {
        Some(dir) => Box::new(GraphvizRenderer::new(dir)),
        None => Box::new(NoopRenderer),
    };

    let trained = train_model(
        &split.train_x,
        &split.train_y,
        params,
        &mut tracker,
        renderer.as_ref(),
    )
    .context("Training failed")?;
    if let Some(e) = &trained.diagram_error {
        log::warn!("Continuing without pipeline diagram: {}", e);
    }

    let predictions = predict(&trained.pipeline, &split.test_x).context("Prediction failed")?;
    let accuracy =
        report_accuracy(&predictions, &split.test_y, &mut tracker).context("Reporting failed")?;

    Ok(RunSummary {
        run_id: tracker.run_id().to_string(),
        train_rows: split.train_x.nrows(),
        test_rows: split.test_x.nrows(),
        accuracy,
    })
}
