//! Chart Plotter Module
//! Draws the analysis charts using egui_plot.

use super::{ClassSeries, Histogram, ScatterPlot};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

const PLOT_HEIGHT: f32 = 320.0;

/// Qualitative class palette (ColorBrewer Set1).
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(228, 26, 28),   // Red
    Color32::from_rgb(55, 126, 184),  // Blue
    Color32::from_rgb(77, 175, 74),   // Green
    Color32::from_rgb(152, 78, 163),  // Purple
    Color32::from_rgb(255, 127, 0),   // Orange
    Color32::from_rgb(255, 255, 51),  // Yellow
    Color32::from_rgb(166, 86, 40),   // Brown
    Color32::from_rgb(247, 129, 191), // Pink
    Color32::from_rgb(153, 153, 153), // Grey
];

const LINE_COLOR: Color32 = Color32::from_rgb(55, 126, 184);
const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(135, 206, 235);
const DENSITY_COLOR: Color32 = Color32::from_rgb(31, 78, 121);

/// Creates the wine charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the class at `index` in ascending class order.
    pub fn class_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Axis tick labels for integer class positions only.
    fn class_tick(value: f64) -> String {
        if (value - value.round()).abs() < 1e-6 {
            format!("{}", value.round() as i64)
        } else {
            String::new()
        }
    }

    /// Class means joined by a line with markers.
    pub fn draw_line_chart(ui: &mut egui::Ui, series: &ClassSeries) {
        let points: Vec<[f64; 2]> = series.points.iter().map(|&(c, v)| [c as f64, v]).collect();

        Plot::new("class_mean_line")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(series.x_label.clone())
            .y_axis_label(series.y_label.clone())
            .x_axis_formatter(|mark, _range| Self::class_tick(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name(&series.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(5.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// One bar per class, colored by class.
    pub fn draw_bar_chart(ui: &mut egui::Ui, series: &ClassSeries) {
        let bars: Vec<Bar> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, &(class, value))| {
                Bar::new(class as f64, value)
                    .width(0.6)
                    .fill(Self::class_color(i))
                    .name(format!("Class {}", class))
            })
            .collect();

        Plot::new("class_mean_bar")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(series.x_label.clone())
            .y_axis_label(series.y_label.clone())
            .x_axis_formatter(|mark, _range| Self::class_tick(mark.value))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&series.y_label));
            });
    }

    /// Frequency bars with the density curve drawn over them.
    pub fn draw_histogram(ui: &mut egui::Ui, histogram: &Histogram) {
        let bars: Vec<Bar> = histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(HISTOGRAM_COLOR)
                    .stroke(egui::Stroke::new(1.0, Color32::BLACK))
            })
            .collect();

        Plot::new("measurement_histogram")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(histogram.x_label.clone())
            .y_axis_label(histogram.y_label.clone())
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&histogram.y_label));
                if !histogram.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(histogram.density.iter().copied()))
                            .color(DENSITY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// Points colored by class, with a legend.
    pub fn draw_scatter(ui: &mut egui::Ui, scatter: &ScatterPlot) {
        Plot::new("measurement_scatter")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(scatter.x_label.clone())
            .y_axis_label(scatter.y_label.clone())
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, group) in scatter.groups.iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(group.points.iter().copied()))
                            .radius(3.5)
                            .color(Self::class_color(i))
                            .name(format!("{} {}", scatter.legend_title, group.class)),
                    );
                }
            });
    }
}
