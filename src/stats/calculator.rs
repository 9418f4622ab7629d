//! Statistics Calculator Module
//! Descriptive statistics for every numeric column of a dataset.

use crate::data::Dataset;
use polars::prelude::PolarsError;
use statrs::statistics::{Data, Distribution, Max, Min};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' has no values")]
    EmptyColumn(String),
    #[error("Unknown measurement '{0}'")]
    UnknownMeasurement(String),
    #[error("Class {0} not present in the dataset")]
    MissingClass(i64),
    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Quartiles in ascending order.
    pub fn quartiles(&self) -> [f64; 3] {
        [self.q25, self.median, self.q75]
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// `std` is the sample standard deviation and is NaN for a single value.
    pub fn compute_descriptive_stats(
        name: &str,
        values: &[f64],
    ) -> Result<ColumnSummary, AnalysisError> {
        if values.is_empty() {
            return Err(AnalysisError::EmptyColumn(name.to_string()));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let data = Data::new(sorted.clone());
        let mean = data.mean().unwrap_or(f64::NAN);
        let std = data.std_dev().unwrap_or(f64::NAN);

        Ok(ColumnSummary {
            name: name.to_string(),
            count: values.len(),
            mean,
            std,
            min: data.min(),
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: data.max(),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Summarize every numeric column, measurements first and the label last,
    /// in frame order.
    pub fn describe(dataset: &Dataset) -> Result<Vec<ColumnSummary>, AnalysisError> {
        dataset
            .column_names()
            .iter()
            .map(|name| {
                let values = dataset.numeric_values(name)?;
                Self::compute_descriptive_stats(name, &values)
            })
            .collect()
    }
}
