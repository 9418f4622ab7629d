//! Wine EDA - CSV Data Analysis & Interactive Chart Viewer

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use wine_eda::gui::ViewerSink;
use wine_eda::{Pipeline, PipelineError};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging("warn");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = Pipeline::default().run(&mut out, &mut ViewerSink);
    out.flush().context("Failed to flush report")?;

    match result {
        Ok(summary) => {
            tracing::info!(
                rows = summary.rows,
                errors = summary.errors.len(),
                "Analysis finished"
            );
            Ok(())
        }
        // Already printed by the pipeline.
        Err(PipelineError::Fatal(_)) => std::process::exit(1),
        Err(e) => Err(e).context("Analysis aborted"),
    }
}
