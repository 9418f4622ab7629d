//! Data Cleaner Module
//! Detects missing values and drops incomplete records.

use super::Dataset;
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Outcome of a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    /// Missing cells found across all columns.
    pub missing_values: usize,
    /// Records removed because at least one of their values was missing.
    pub rows_dropped: usize,
}

impl CleanReport {
    pub fn is_clean(&self) -> bool {
        self.missing_values == 0
    }
}

/// Removes records with missing values (null, or NaN in float columns).
pub struct DataCleaner;

impl DataCleaner {
    /// Mark records that have a value in every column.
    ///
    /// Returns the keep mask and the number of missing cells.
    pub fn complete_rows(dataset: &Dataset) -> Result<(Vec<bool>, usize), CleanError> {
        let df = dataset.frame();
        let mut keep = vec![true; df.height()];
        let mut missing = 0usize;

        for column in df.get_columns() {
            let values = column.cast(&DataType::Float64)?;
            let values = values.f64()?;

            for (i, value) in values.into_iter().enumerate() {
                if value.map_or(true, f64::is_nan) {
                    missing += 1;
                    keep[i] = false;
                }
            }
        }

        Ok((keep, missing))
    }

    /// Drop every record that has a missing value.
    ///
    /// A dataset without missing values is returned unchanged.
    pub fn clean(dataset: Dataset) -> Result<(Dataset, CleanReport), CleanError> {
        let (keep, missing_values) = Self::complete_rows(&dataset)?;

        if missing_values == 0 {
            info!(rows = dataset.height(), "No missing values found");
            let report = CleanReport {
                missing_values: 0,
                rows_dropped: 0,
            };
            return Ok((dataset, report));
        }

        let cleaned = dataset.retain_rows(&keep)?;
        let report = CleanReport {
            missing_values,
            rows_dropped: dataset.height() - cleaned.height(),
        };
        debug!(
            missing_values,
            rows_dropped = report.rows_dropped,
            "Dropped incomplete records"
        );
        info!(rows = cleaned.height(), "Dataset cleaned");

        Ok((cleaned, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(df: DataFrame) -> Dataset {
        Dataset::from_frame(df, "Class").unwrap()
    }

    #[test]
    fn test_clean_passthrough() {
        let input = dataset(
            df![
                "alcohol" => [14.2, 12.3, 13.1],
                "ash" => [2.4, 2.1, 2.6],
                "Class" => [0i64, 1, 2],
            ]
            .unwrap(),
        );

        let (cleaned, report) = DataCleaner::clean(input.clone()).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.rows_dropped, 0);
        assert!(cleaned.frame().equals(input.frame()));
    }

    #[test]
    fn test_clean_drops_rows_with_nulls() {
        let input = dataset(
            df![
                "alcohol" => [Some(14.2), None, Some(13.1), Some(12.0)],
                "ash" => [Some(2.4), Some(2.1), None, None],
                "Class" => [0i64, 1, 2, 2],
            ]
            .unwrap(),
        );

        let (cleaned, report) = DataCleaner::clean(input).unwrap();

        assert_eq!(report.missing_values, 3);
        assert_eq!(report.rows_dropped, 3);
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.numeric_values("alcohol").unwrap(), vec![14.2]);
    }

    #[test]
    fn test_clean_counts_cells_not_rows() {
        let input = dataset(
            df![
                "alcohol" => [None, Some(12.3)],
                "ash" => [None, Some(2.1)],
                "Class" => [0i64, 1],
            ]
            .unwrap(),
        );

        let (cleaned, report) = DataCleaner::clean(input).unwrap();

        assert_eq!(report.missing_values, 2);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(cleaned.height(), 1);
    }

    #[test]
    fn test_clean_treats_nan_as_missing() {
        let input = dataset(
            df![
                "alcohol" => [14.2, f64::NAN, 13.1],
                "Class" => [0i64, 1, 2],
            ]
            .unwrap(),
        );

        let (cleaned, report) = DataCleaner::clean(input).unwrap();

        assert_eq!(report.missing_values, 1);
        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.classes().unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_clean_drops_missing_label() {
        let input = dataset(
            df![
                "alcohol" => [14.2, 12.3, 13.1],
                "Class" => [Some(0i64), None, Some(2)],
            ]
            .unwrap(),
        );

        let (cleaned, report) = DataCleaner::clean(input).unwrap();

        assert_eq!(report.rows_dropped, 1);
        assert_eq!(cleaned.labels().unwrap(), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_cleaned_rows_are_complete() {
        let input = dataset(
            df![
                "alcohol" => [Some(14.2), None, Some(13.1), Some(f64::NAN), Some(11.9)],
                "flavanoids" => [Some(3.1), Some(2.0), None, Some(0.6), Some(1.1)],
                "Class" => [0i64, 0, 1, 2, 2],
            ]
            .unwrap(),
        );
        let original = input.height();

        let (cleaned, report) = DataCleaner::clean(input).unwrap();
        let (keep, missing) = DataCleaner::complete_rows(&cleaned).unwrap();

        assert_eq!(cleaned.height(), original - report.rows_dropped);
        assert_eq!(missing, 0);
        assert!(keep.iter().all(|&k| k));
    }
}
