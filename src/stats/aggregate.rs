//! Class Aggregate Module
//! Per-class mean of every measurement.

use super::AnalysisError;
use crate::data::Dataset;
use polars::prelude::*;
use tracing::debug;

/// Means of every measurement within one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMeans {
    pub class: i64,
    /// Number of records in the class.
    pub count: usize,
    /// One mean per measurement, in the aggregate's measurement order.
    pub means: Vec<f64>,
}

/// Class -> (measurement -> mean), classes ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAggregate {
    measurements: Vec<String>,
    rows: Vec<ClassMeans>,
}

/// Mean of one measurement for each of a fixed set of classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub measurement: String,
    pub values: Vec<(i64, f64)>,
}

impl ClassAggregate {
    /// Group records by class label and average every measurement.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, AnalysisError> {
        let mut rows = Vec::new();

        for class in dataset.classes()? {
            let class_df = dataset
                .frame()
                .clone()
                .lazy()
                .filter(col(dataset.label()).eq(lit(class)))
                .collect()?;

            let means = dataset
                .measurements()
                .iter()
                .map(|name| {
                    class_df
                        .column(name)?
                        .as_materialized_series()
                        .mean()
                        .ok_or_else(|| AnalysisError::EmptyColumn(name.clone()))
                })
                .collect::<Result<Vec<f64>, AnalysisError>>()?;

            debug!(class, count = class_df.height(), "Computed class means");
            rows.push(ClassMeans {
                class,
                count: class_df.height(),
                means,
            });
        }

        if rows.is_empty() {
            return Err(AnalysisError::EmptyColumn(dataset.label().to_string()));
        }

        Ok(Self {
            measurements: dataset.measurements().to_vec(),
            rows,
        })
    }

    pub fn measurements(&self) -> &[String] {
        &self.measurements
    }

    pub fn rows(&self) -> &[ClassMeans] {
        &self.rows
    }

    /// Class labels in ascending order.
    pub fn classes(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.class).collect()
    }

    /// Number of records per class, in class order.
    pub fn class_sizes(&self) -> Vec<(i64, usize)> {
        self.rows.iter().map(|r| (r.class, r.count)).collect()
    }

    fn measurement_index(&self, measurement: &str) -> Result<usize, AnalysisError> {
        self.measurements
            .iter()
            .position(|m| m == measurement)
            .ok_or_else(|| AnalysisError::UnknownMeasurement(measurement.to_string()))
    }

    /// Mean of a measurement within a class, if both exist.
    pub fn mean(&self, class: i64, measurement: &str) -> Option<f64> {
        let idx = self.measurement_index(measurement).ok()?;
        self.rows
            .iter()
            .find(|r| r.class == class)
            .map(|r| r.means[idx])
    }

    /// Per-class means of one measurement, classes ascending.
    pub fn column(&self, measurement: &str) -> Result<Vec<(i64, f64)>, AnalysisError> {
        let idx = self.measurement_index(measurement)?;
        Ok(self.rows.iter().map(|r| (r.class, r.means[idx])).collect())
    }

    /// Extract one measurement's mean for each expected class.
    ///
    /// Fails when an expected class has no records.
    pub fn highlight(
        &self,
        measurement: &str,
        classes: &[i64],
    ) -> Result<Highlight, AnalysisError> {
        let idx = self.measurement_index(measurement)?;
        let values = classes
            .iter()
            .map(|&class| {
                self.rows
                    .iter()
                    .find(|r| r.class == class)
                    .map(|r| (class, r.means[idx]))
                    .ok_or(AnalysisError::MissingClass(class))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Highlight {
            measurement: measurement.to_string(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;
    use approx::assert_relative_eq;

    fn small_dataset() -> Dataset {
        let df = df![
            "alcohol" => [14.0, 13.0, 12.0, 12.5, 11.0, 13.5],
            "ash" => [2.0, 2.2, 1.8, 2.4, 2.6, 2.0],
            "Class" => [2i64, 0, 1, 1, 2, 0],
        ]
        .unwrap();
        Dataset::from_frame(df, "Class").unwrap()
    }

    #[test]
    fn test_from_dataset_groups_ascending() {
        let aggregate = ClassAggregate::from_dataset(&small_dataset()).unwrap();

        assert_eq!(aggregate.classes(), vec![0, 1, 2]);
        assert_eq!(aggregate.class_sizes(), vec![(0, 2), (1, 2), (2, 2)]);
        assert_eq!(aggregate.measurements(), ["alcohol", "ash"]);

        assert_relative_eq!(aggregate.mean(0, "alcohol").unwrap(), 13.25);
        assert_relative_eq!(aggregate.mean(1, "alcohol").unwrap(), 12.25);
        assert_relative_eq!(aggregate.mean(2, "alcohol").unwrap(), 12.5);
        assert_relative_eq!(aggregate.mean(2, "ash").unwrap(), 2.3, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_unknown_lookups() {
        let aggregate = ClassAggregate::from_dataset(&small_dataset()).unwrap();

        assert!(aggregate.mean(5, "alcohol").is_none());
        assert!(aggregate.mean(0, "proline").is_none());
        assert!(matches!(
            aggregate.column("proline").unwrap_err(),
            AnalysisError::UnknownMeasurement(_)
        ));
    }

    #[test]
    fn test_wine_class_means() {
        let dataset = DataLoader::load_wine().unwrap();
        let aggregate = ClassAggregate::from_dataset(&dataset).unwrap();

        assert_eq!(aggregate.class_sizes(), vec![(0, 59), (1, 71), (2, 48)]);

        let alcohol = aggregate.column("alcohol").unwrap();
        assert_relative_eq!(alcohol[0].1, 13.744746, epsilon = 1e-6);
        assert_relative_eq!(alcohol[1].1, 12.278732, epsilon = 1e-6);
        assert_relative_eq!(alcohol[2].1, 13.153750, epsilon = 1e-6);

        let proline = aggregate.column("proline").unwrap();
        assert_relative_eq!(proline[0].1, 1115.711864, epsilon = 1e-6);
        assert_relative_eq!(proline[1].1, 519.507042, epsilon = 1e-6);
        assert_relative_eq!(proline[2].1, 629.895833, epsilon = 1e-6);
    }

    #[test]
    fn test_weighted_means_reproduce_global_mean() {
        let dataset = DataLoader::load_wine().unwrap();
        let aggregate = ClassAggregate::from_dataset(&dataset).unwrap();
        let total = dataset.height() as f64;

        for measurement in dataset.measurements() {
            let values = dataset.numeric_values(measurement).unwrap();
            let global = values.iter().sum::<f64>() / values.len() as f64;

            let weighted: f64 = aggregate
                .rows()
                .iter()
                .zip(aggregate.column(measurement).unwrap())
                .map(|(row, (_, mean))| row.count as f64 * mean)
                .sum::<f64>()
                / total;

            assert_relative_eq!(weighted, global, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_highlight_wine_alcohol() {
        let dataset = DataLoader::load_wine().unwrap();
        let aggregate = ClassAggregate::from_dataset(&dataset).unwrap();
        let highlight = aggregate.highlight("alcohol", &[0, 1, 2]).unwrap();

        assert_eq!(highlight.measurement, "alcohol");
        let values: Vec<f64> = highlight.values.iter().map(|&(_, v)| v).collect();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.is_finite() && *v > 0.0));
        assert!(values[0] != values[1] && values[1] != values[2] && values[0] != values[2]);
    }

    #[test]
    fn test_highlight_missing_class() {
        let df = df![
            "alcohol" => [14.0, 13.0, 12.0],
            "Class" => [0i64, 0, 1],
        ]
        .unwrap();
        let dataset = Dataset::from_frame(df, "Class").unwrap();
        let aggregate = ClassAggregate::from_dataset(&dataset).unwrap();

        let err = aggregate.highlight("alcohol", &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingClass(2)));
        assert_eq!(err.to_string(), "Class 2 not present in the dataset");
    }

    #[test]
    fn test_highlight_unknown_measurement() {
        let aggregate = ClassAggregate::from_dataset(&small_dataset()).unwrap();
        assert!(matches!(
            aggregate.highlight("proline", &[0]).unwrap_err(),
            AnalysisError::UnknownMeasurement(ref m) if m == "proline"
        ));
    }
}
