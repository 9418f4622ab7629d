//! Stats module - Descriptive statistics and class aggregates

mod aggregate;
mod calculator;

pub use aggregate::{ClassAggregate, ClassMeans, Highlight};
pub use calculator::{AnalysisError, ColumnSummary, StatsCalculator};
