//! Dataset Module
//! Labeled tabular dataset backed by a Polars DataFrame.

use super::LoadError;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Ordered collection of records: numeric measurements plus an integer class label.
///
/// Measurement columns are always `Float64` and the label column `Int64`,
/// whatever types the source frame used.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    label: String,
    measurements: Vec<String>,
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

impl Dataset {
    /// Validate a DataFrame's schema and normalize its column types.
    ///
    /// Every column other than `label` is a measurement and must be numeric.
    pub fn from_frame(df: DataFrame, label: &str) -> Result<Self, LoadError> {
        let mut columns: Vec<Column> = Vec::with_capacity(df.width());
        let mut measurements = Vec::new();
        let mut has_label = false;

        for column in df.get_columns() {
            let name = column.name().to_string();
            if name == label {
                if !is_integer(column.dtype()) {
                    return Err(LoadError::LabelNotInteger {
                        column: name,
                        dtype: column.dtype().to_string(),
                    });
                }
                columns.push(column.cast(&DataType::Int64)?);
                has_label = true;
            } else {
                if !is_numeric(column.dtype()) {
                    return Err(LoadError::NonNumericColumn {
                        column: name,
                        dtype: column.dtype().to_string(),
                    });
                }
                columns.push(column.cast(&DataType::Float64)?);
                measurements.push(name);
            }
        }

        if !has_label {
            return Err(LoadError::MissingLabel(label.to_string()));
        }
        if measurements.is_empty() || df.height() == 0 {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            df: DataFrame::new(columns)?,
            label: label.to_string(),
            measurements,
        })
    }

    /// Underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Name of the class label column.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Measurement names in schema order.
    pub fn measurements(&self) -> &[String] {
        &self.measurements
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns, label included.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// All column names in frame order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Present values of a numeric column as `f64`, skipping nulls and NaN.
    pub fn numeric_values(&self, column: &str) -> PolarsResult<Vec<f64>> {
        let values = self.df.column(column)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Class label of every record, `None` where the label is missing.
    pub fn labels(&self) -> PolarsResult<Vec<Option<i64>>> {
        Ok(self.df.column(&self.label)?.i64()?.into_iter().collect())
    }

    /// Distinct class labels in ascending order.
    pub fn classes(&self) -> PolarsResult<Vec<i64>> {
        let distinct: BTreeSet<i64> = self.labels()?.into_iter().flatten().collect();
        Ok(distinct.into_iter().collect())
    }

    /// Keep only the records whose mask entry is `true`.
    pub fn retain_rows(&self, keep: &[bool]) -> PolarsResult<Self> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        Ok(Self {
            df: self.df.filter(&mask)?,
            label: self.label.clone(),
            measurements: self.measurements.clone(),
        })
    }
}
