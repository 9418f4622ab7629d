//! GUI module - Chart viewer window

mod app;
mod chart_viewer;

pub use app::{ViewerSink, WineEdaApp, WINDOW_TITLE};
pub use chart_viewer::{column_count, ChartKind, ChartViewer};
