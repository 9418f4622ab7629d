//! Chart Sink Module
//! Destination for the charts of an analysis run.

use super::{ChartSet, VisualizationError};

/// Presents a finished set of charts.
///
/// The interactive viewer blocks until its window is closed; tests collect
/// charts in memory instead.
pub trait ChartSink {
    fn present(&mut self, charts: ChartSet) -> Result<(), VisualizationError>;
}

impl ChartSink for Vec<ChartSet> {
    fn present(&mut self, charts: ChartSet) -> Result<(), VisualizationError> {
        self.push(charts);
        Ok(())
    }
}
