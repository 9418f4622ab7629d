//! Wine EDA - Exploratory analysis of the UCI wine recognition data
//!
//! Loads the bundled dataset, drops incomplete records, prints descriptive
//! statistics and per-class means, then shows line, bar, histogram and
//! scatter charts in an interactive window.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use pipeline::{Pipeline, PipelineError, RunSummary, Stage, StageError};
