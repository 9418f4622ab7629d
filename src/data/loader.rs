//! Wine Data Loader Module
//! Parses the bundled wine dataset using Polars.

use super::Dataset;
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;
use tracing::info;

/// UCI wine recognition data: 178 wines, 13 measurements and the `Class` label.
const WINE_CSV: &[u8] = include_bytes!("../../data/wine.csv");

/// Label column of the bundled dataset.
pub const WINE_LABEL: &str = "Class";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Label column '{0}' not found")]
    MissingLabel(String),
    #[error("Column '{column}' is not numeric ({dtype})")]
    NonNumericColumn { column: String, dtype: String },
    #[error("Label column '{column}' is not an integer column ({dtype})")]
    LabelNotInteger { column: String, dtype: String },
    #[error("Dataset has no records or no measurements")]
    Empty,
}

/// Builds datasets from CSV sources.
pub struct DataLoader;

impl DataLoader {
    /// Load the bundled wine dataset.
    pub fn load_wine() -> Result<Dataset, LoadError> {
        let dataset = Self::from_csv_bytes(WINE_CSV, WINE_LABEL)?;
        info!(
            rows = dataset.height(),
            measurements = dataset.measurements().len(),
            "Loaded wine dataset"
        );
        Ok(dataset)
    }

    /// Parse CSV bytes with a header row into a labeled dataset.
    pub fn from_csv_bytes(bytes: &[u8], label: &str) -> Result<Dataset, LoadError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Dataset::from_frame(df, label)
    }
}
