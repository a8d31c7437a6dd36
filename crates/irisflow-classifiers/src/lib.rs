//! irisflow-classifiers: a tracked logistic-regression pipeline for the iris dataset.
//!
//! The crate is organised around three pipeline nodes (see [`nodes`]): a
//! trainer that fits an optionally scaled multi-class logistic regression and
//! records it to an experiment tracker, a predictor, and an accuracy reporter.
//! Model fitting is delegated to `linfa-logistic`; experiment tracking goes
//! through the injected [`tracking::Tracker`] trait, and the pipeline diagram
//! is produced by a pluggable [`report::diagram::DiagramRenderer`].
pub mod config;
pub mod data_handling;
pub mod error;
pub mod models;
pub mod nodes;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod stats;
pub mod tracking;
