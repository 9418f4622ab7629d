//! Charts module - Chart data and rendering

mod plotter;
mod series;
mod sink;

pub use plotter::ChartPlotter;
pub use series::{
    histogram_bins, kde_curve, scatter_groups, ChartSet, ClassSeries, Histogram, HistogramBin,
    ScatterGroup, ScatterPlot, VisualizationError,
};
pub use sink::ChartSink;
