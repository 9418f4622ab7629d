//! Chart Series Module
//! Builds the data behind the line, bar, histogram and scatter charts.

use crate::config::AnalysisConfig;
use crate::data::Dataset;
use crate::stats::ClassAggregate;
use polars::prelude::*;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::{Data, Distribution};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Class means are not available")]
    MissingAggregate,
    #[error("Unknown measurement '{0}'")]
    UnknownMeasurement(String),
    #[error("No values to plot for '{0}'")]
    NoData(String),
    #[error("Density estimate failed: {0}")]
    Density(String),
    #[error("Chart viewer failed: {0}")]
    Viewer(String),
}

/// One value per class, used by the line and bar charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bin counts with a kernel density curve scaled to counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<HistogramBin>,
    /// Empty when there are too few distinct values to estimate a density.
    pub density: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub class: i64,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    /// One group per class, classes ascending.
    pub groups: Vec<ScatterGroup>,
}

/// The four charts of an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub line: ClassSeries,
    pub bar: ClassSeries,
    pub histogram: Histogram,
    pub scatter: ScatterPlot,
}

impl ChartSet {
    /// Build all charts from the cleaned dataset and the class means.
    ///
    /// The line and bar charts need the class means; without them nothing is built.
    pub fn build(
        dataset: &Dataset,
        aggregate: Option<&ClassAggregate>,
        config: &AnalysisConfig,
    ) -> Result<Self, VisualizationError> {
        let aggregate = aggregate.ok_or(VisualizationError::MissingAggregate)?;
        let means = aggregate
            .column(&config.highlight_measurement)
            .map_err(|_| VisualizationError::UnknownMeasurement(config.highlight_measurement.clone()))?;

        let line = ClassSeries {
            title: format!("Average {} Across Wine Classes", config.highlight_label),
            x_label: "Wine Class".to_string(),
            y_label: format!("Average {}", config.highlight_label),
            points: means.clone(),
        };
        let bar = ClassSeries {
            title: format!("Comparison of {} Across Wine Classes", config.highlight_label),
            points: means,
            ..line.clone()
        };

        let values = measurement_values(dataset, &config.highlight_measurement)?;
        let bins = histogram_bins(&values, config.histogram_bins)?;
        let bin_width = bins.first().map(|b| b.width()).unwrap_or(1.0);
        let histogram = Histogram {
            title: format!("Distribution of {}", config.highlight_label),
            x_label: config.highlight_label.clone(),
            y_label: "Frequency".to_string(),
            density: kde_curve(&values, config.kde_points, bin_width)?,
            bins,
        };

        let scatter = ScatterPlot {
            title: format!("{} vs. {}", config.scatter_x_label, config.scatter_y_label),
            x_label: config.scatter_x_label.clone(),
            y_label: config.scatter_y_label.clone(),
            legend_title: "Wine Class".to_string(),
            groups: scatter_groups(dataset, &config.scatter_x, &config.scatter_y)?,
        };

        Ok(Self {
            line,
            bar,
            histogram,
            scatter,
        })
    }
}

fn measurement_values(dataset: &Dataset, measurement: &str) -> Result<Vec<f64>, VisualizationError> {
    if !dataset.measurements().iter().any(|m| m == measurement) {
        return Err(VisualizationError::UnknownMeasurement(measurement.to_string()));
    }
    let values = dataset.numeric_values(measurement)?;
    if values.is_empty() {
        return Err(VisualizationError::NoData(measurement.to_string()));
    }
    Ok(values)
}

/// Count values into `bins` equal-width bins spanning [min, max].
///
/// The last bin is closed on the right. A constant column gets a unit-wide range
/// centered on its value.
pub fn histogram_bins(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>, VisualizationError> {
    if values.is_empty() || bins == 0 {
        return Err(VisualizationError::NoData("histogram".to_string()));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - low) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: low + i as f64 * width,
            end: if i + 1 == bins {
                high
            } else {
                low + (i + 1) as f64 * width
            },
            count,
        })
        .collect())
}

/// Gaussian kernel density estimate over [min, max], scaled so the area matches
/// a histogram with bins of `bin_width`.
///
/// Bandwidth follows Scott's rule: `n^(-1/5)` times the sample standard deviation.
pub fn kde_curve(
    values: &[f64],
    points: usize,
    bin_width: f64,
) -> Result<Vec<[f64; 2]>, VisualizationError> {
    let n = values.len();
    let std = Data::new(values.to_vec()).std_dev().unwrap_or(f64::NAN);
    let bandwidth = (n as f64).powf(-0.2) * std;

    if n < 2 || points < 2 || !bandwidth.is_finite() || bandwidth <= 0.0 {
        debug!(n, bandwidth, "Skipping density estimate");
        return Ok(Vec::new());
    }

    let kernel = Normal::new(0.0, 1.0).map_err(|e| VisualizationError::Density(e.to_string()))?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (points - 1) as f64;
    let scale = n as f64 * bin_width;

    Ok((0..points)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = values
                .iter()
                .map(|&v| kernel.pdf((x - v) / bandwidth))
                .sum::<f64>()
                / (n as f64 * bandwidth);
            [x, density * scale]
        })
        .collect())
}

/// Pair two measurements row by row and split the points by class label.
pub fn scatter_groups(
    dataset: &Dataset,
    x: &str,
    y: &str,
) -> Result<Vec<ScatterGroup>, VisualizationError> {
    for measurement in [x, y] {
        if !dataset.measurements().iter().any(|m| m == measurement) {
            return Err(VisualizationError::UnknownMeasurement(measurement.to_string()));
        }
    }

    let frame = dataset.frame();
    let xs = frame.column(x)?.f64()?;
    let ys = frame.column(y)?.f64()?;
    let labels = dataset.labels()?;

    let mut groups: Vec<ScatterGroup> = dataset
        .classes()?
        .into_iter()
        .map(|class| ScatterGroup {
            class,
            points: Vec::new(),
        })
        .collect();

    for ((px, py), label) in xs.into_iter().zip(ys.into_iter()).zip(labels) {
        if let (Some(px), Some(py), Some(label)) = (px, py, label) {
            if let Some(group) = groups.iter_mut().find(|g| g.class == label) {
                group.points.push([px, py]);
            }
        }
    }

    if groups.iter().all(|g| g.points.is_empty()) {
        return Err(VisualizationError::NoData(format!("{} vs {}", x, y)));
    }
    Ok(groups)
}
