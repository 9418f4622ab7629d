//! Analysis Pipeline Module
//! Runs load, clean, summarize, report and render in sequence.
//!
//! Load and clean failures halt the run. Analysis and visualization failures
//! are reported and the run carries on with whatever was computed.

use crate::charts::{ChartSet, ChartSink, VisualizationError};
use crate::config::AnalysisConfig;
use crate::data::{CleanError, DataCleaner, DataLoader, Dataset, LoadError};
use crate::report::Reporter;
use crate::stats::{AnalysisError, ClassAggregate, ColumnSummary, Highlight, StatsCalculator};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Clean,
    Analysis,
    Visualization,
}

impl Stage {
    /// Message prefix printed before the cause.
    pub fn prefix(self) -> &'static str {
        match self {
            Stage::Load => "Error loading dataset",
            Stage::Clean => "Error during data cleaning",
            Stage::Analysis => "Error during data analysis",
            Stage::Visualization => "Error during visualization",
        }
    }

    pub fn is_fatal(self) -> bool {
        matches!(self, Stage::Load | Stage::Clean)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Clean => "clean",
            Stage::Analysis => "analysis",
            Stage::Visualization => "visualization",
        };
        f.write_str(name)
    }
}

/// A failure tagged with the stage it happened in.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("Error loading dataset: {0}")]
    Load(#[from] LoadError),
    #[error("Error during data cleaning: {0}")]
    Clean(#[from] CleanError),
    #[error("Error during data analysis: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Error during visualization: {0}")]
    Visualization(#[from] VisualizationError),
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Load(_) => Stage::Load,
            StageError::Clean(_) => Stage::Clean,
            StageError::Analysis(_) => Stage::Analysis,
            StageError::Visualization(_) => Stage::Visualization,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.stage().is_fatal()
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fatal(StageError),
    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Records remaining after cleaning.
    pub rows: usize,
    pub rows_dropped: usize,
    pub statistics: Option<Vec<ColumnSummary>>,
    pub aggregate: Option<ClassAggregate>,
    pub highlight: Option<Highlight>,
    pub charts_presented: bool,
    /// Recoverable failures, in the order they happened.
    pub errors: Vec<StageError>,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Sequences the analysis stages.
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run on the bundled wine dataset.
    pub fn run<W: Write>(
        &self,
        out: W,
        sink: &mut dyn ChartSink,
    ) -> Result<RunSummary, PipelineError> {
        self.run_on(DataLoader::load_wine(), out, sink)
    }

    /// Run on an already loaded (or failed) dataset, writing the report to `out`.
    pub fn run_on<W: Write>(
        &self,
        loaded: Result<Dataset, LoadError>,
        out: W,
        sink: &mut dyn ChartSink,
    ) -> Result<RunSummary, PipelineError> {
        let mut reporter = Reporter::new(out);

        let dataset = match loaded {
            Ok(dataset) => dataset,
            Err(e) => return Err(Self::halt(&mut reporter, e.into())),
        };
        info!(rows = dataset.height(), "Loaded dataset");

        let (dataset, clean_report) = match DataCleaner::clean(dataset) {
            Ok(cleaned) => cleaned,
            Err(e) => return Err(Self::halt(&mut reporter, e.into())),
        };
        reporter.clean_status(&clean_report)?;
        reporter.preview(&dataset, self.config.preview_rows)?;
        reporter.column_types(&dataset)?;

        let mut summary = RunSummary {
            rows: dataset.height(),
            rows_dropped: clean_report.rows_dropped,
            ..RunSummary::default()
        };

        if let Err(e) = self.analyze(&dataset, &mut reporter, &mut summary) {
            Self::recover(&mut reporter, &mut summary, e.into())?;
        }

        let presented = ChartSet::build(&dataset, summary.aggregate.as_ref(), &self.config)
            .and_then(|charts| sink.present(charts));
        match presented {
            Ok(()) => {
                info!("Charts presented");
                summary.charts_presented = true;
            }
            Err(e) => Self::recover(&mut reporter, &mut summary, e.into())?,
        }

        Ok(summary)
    }

    /// Statistics, class means and the highlighted comparison, each reported
    /// as soon as it is computed.
    fn analyze<W: Write>(
        &self,
        dataset: &Dataset,
        reporter: &mut Reporter<W>,
        summary: &mut RunSummary,
    ) -> Result<(), AnalysisError> {
        let statistics = StatsCalculator::describe(dataset)?;
        reporter.statistics(&statistics)?;
        summary.statistics = Some(statistics);

        let aggregate = ClassAggregate::from_dataset(dataset)?;
        reporter.class_means(&aggregate, &self.config.label_column)?;
        let highlight = aggregate.highlight(
            &self.config.highlight_measurement,
            &self.config.expected_classes,
        );
        summary.aggregate = Some(aggregate);

        let highlight = highlight?;
        reporter.highlight(&highlight, &self.config.highlight_label)?;
        summary.highlight = Some(highlight);
        Ok(())
    }

    fn halt<W: Write>(reporter: &mut Reporter<W>, err: StageError) -> PipelineError {
        error!(stage = %err.stage(), "{}", err);
        match reporter.line(&err.to_string()) {
            Ok(()) => PipelineError::Fatal(err),
            Err(io) => PipelineError::Output(io),
        }
    }

    fn recover<W: Write>(
        reporter: &mut Reporter<W>,
        summary: &mut RunSummary,
        err: StageError,
    ) -> io::Result<()> {
        warn!(stage = %err.stage(), "{}", err);
        reporter.line(&err.to_string())?;
        summary.errors.push(err);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    struct FailingSink;

    impl ChartSink for FailingSink {
        fn present(&mut self, _charts: ChartSet) -> Result<(), VisualizationError> {
            Err(VisualizationError::Viewer("no display".to_string()))
        }
    }

    fn run_text(
        loaded: Result<Dataset, LoadError>,
        sink: &mut dyn ChartSink,
    ) -> (Result<RunSummary, PipelineError>, String) {
        let mut out = Vec::new();
        let result = Pipeline::default().run_on(loaded, &mut out, sink);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_stage_policy() {
        assert!(Stage::Load.is_fatal());
        assert!(Stage::Clean.is_fatal());
        assert!(!Stage::Analysis.is_fatal());
        assert!(!Stage::Visualization.is_fatal());
        assert_eq!(Stage::Clean.prefix(), "Error during data cleaning");
    }

    #[test]
    fn test_stage_error_messages() {
        let load = StageError::from(LoadError::MissingLabel("Class".to_string()));
        assert_eq!(
            load.to_string(),
            "Error loading dataset: Label column 'Class' not found"
        );
        assert_eq!(load.stage(), Stage::Load);

        let analysis = StageError::from(AnalysisError::MissingClass(2));
        assert_eq!(
            analysis.to_string(),
            "Error during data analysis: Class 2 not present in the dataset"
        );
        assert!(!analysis.is_fatal());

        let viz = StageError::from(VisualizationError::MissingAggregate);
        assert!(viz.to_string().starts_with("Error during visualization: "));
    }

    #[test]
    fn test_load_failure_halts() {
        let mut charts: Vec<ChartSet> = Vec::new();
        let (result, text) = run_text(Err(LoadError::Empty), &mut charts);

        assert!(matches!(
            result,
            Err(PipelineError::Fatal(StageError::Load(LoadError::Empty)))
        ));
        assert!(text.starts_with("Error loading dataset: "));
        assert_eq!(text.lines().count(), 1);
        assert!(charts.is_empty());
    }

    #[test]
    fn test_viewer_failure_is_recoverable() {
        let (result, text) = run_text(DataLoader::load_wine(), &mut FailingSink);
        let summary = result.unwrap();

        assert!(!summary.charts_presented);
        assert!(summary.highlight.is_some());
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].stage(), Stage::Visualization);
        assert!(text
            .trim_end()
            .ends_with("Error during visualization: Chart viewer failed: no display"));
    }

    #[test]
    fn test_missing_class_keeps_aggregate() {
        let df = df![
            "alcohol" => [14.0, 13.0, 12.0, 12.5],
            "flavanoids" => [3.0, 2.8, 1.2, 1.0],
            "Class" => [0i64, 0, 1, 1],
        ]
        .unwrap();
        let dataset = Dataset::from_frame(df, "Class").unwrap();
        let mut charts: Vec<ChartSet> = Vec::new();
        let (result, text) = run_text(Ok(dataset), &mut charts);
        let summary = result.unwrap();

        assert_eq!(summary.errors.len(), 1);
        assert!(matches!(
            summary.errors[0],
            StageError::Analysis(AnalysisError::MissingClass(2))
        ));
        assert!(summary.aggregate.is_some());
        assert!(summary.highlight.is_none());
        assert!(!text.contains("Interesting Patterns:"));
        assert!(text.contains("Error during data analysis: Class 2 not present in the dataset"));

        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].line.points, vec![(0, 13.5), (1, 12.25)]);
    }

    #[test]
    fn test_wine_run_summary() {
        let mut charts: Vec<ChartSet> = Vec::new();
        let (result, _) = run_text(DataLoader::load_wine(), &mut charts);
        let summary = result.unwrap();

        assert!(summary.is_complete());
        assert_eq!(summary.rows, 178);
        assert_eq!(summary.rows_dropped, 0);
        assert_eq!(summary.statistics.as_ref().map(Vec::len), Some(14));
        assert!(summary.charts_presented);
        assert_eq!(charts.len(), 1);
    }
}
