//! Analysis Configuration Module
//! Fixed settings for the wine analysis run.

/// Settings shared by every stage of the analysis.
///
/// The program takes no arguments, so these are always the defaults; tests
/// adjust individual fields to exercise other shapes of data.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Name of the integer class label column.
    pub label_column: String,
    /// Measurement compared across classes in the report and the line/bar charts.
    pub highlight_measurement: String,
    /// Human readable name of the highlighted measurement.
    pub highlight_label: String,
    /// Classes the highlighted comparison expects to find.
    pub expected_classes: Vec<i64>,
    /// Rows shown in the dataset preview.
    pub preview_rows: usize,
    /// Number of equal-width histogram bins.
    pub histogram_bins: usize,
    /// Number of points the density curve is evaluated at.
    pub kde_points: usize,
    /// Measurement on the scatter plot x axis.
    pub scatter_x: String,
    /// Human readable name of the scatter x measurement.
    pub scatter_x_label: String,
    /// Measurement on the scatter plot y axis.
    pub scatter_y: String,
    /// Human readable name of the scatter y measurement.
    pub scatter_y_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            label_column: "Class".to_string(),
            highlight_measurement: "alcohol".to_string(),
            highlight_label: "Alcohol Content".to_string(),
            expected_classes: vec![0, 1, 2],
            preview_rows: 5,
            histogram_bins: 20,
            kde_points: 200,
            scatter_x: "alcohol".to_string(),
            scatter_x_label: "Alcohol Content".to_string(),
            scatter_y: "flavanoids".to_string(),
            scatter_y_label: "Flavonoids".to_string(),
        }
    }
}
