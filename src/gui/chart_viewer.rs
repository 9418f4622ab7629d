//! Chart Viewer Widget
//! Scrollable panel of chart cards with a responsive multi-column layout.

use crate::charts::{ChartPlotter, ChartSet};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 400.0;
const CHART_WIDTH: f32 = 620.0;
const BORDER_COLOR: Color32 = Color32::from_rgb(55, 126, 184);

/// The four chart kinds, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Histogram,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Histogram,
        ChartKind::Scatter,
    ];

    pub fn title(self, charts: &ChartSet) -> &str {
        match self {
            ChartKind::Line => &charts.line.title,
            ChartKind::Bar => &charts.bar.title,
            ChartKind::Histogram => &charts.histogram.title,
            ChartKind::Scatter => &charts.scatter.title,
        }
    }
}

/// Columns of `CHART_WIDTH` cards that fit in `avail_width`, at least one.
pub fn column_count(avail_width: f32) -> usize {
    ((avail_width / (CHART_WIDTH + CHART_SPACING)).floor() as usize).max(1)
}

/// Displays every chart of a run as a card.
pub struct ChartViewer {
    charts: ChartSet,
}

impl ChartViewer {
    pub fn new(charts: ChartSet) -> Self {
        Self { charts }
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let num_columns = column_count(ui.available_width());
        let total_items = ChartKind::ALL.len();
        let total_rows = total_items.div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for col in 0..num_columns {
                            if let Some(&kind) = ChartKind::ALL.get(row * num_columns + col) {
                                self.draw_chart_card(ui, kind);
                                ui.add_space(CHART_SPACING);
                            }
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_chart_card(&self, ui: &mut egui::Ui, kind: ChartKind) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, BORDER_COLOR))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CHART_WIDTH - 20.0);

                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(kind.title(&self.charts))
                            .size(18.0)
                            .strong()
                            .color(BORDER_COLOR),
                    );
                    ui.add_space(8.0);

                    if kind == ChartKind::Scatter {
                        self.draw_class_legend(ui);
                        ui.add_space(6.0);
                    }

                    match kind {
                        ChartKind::Line => ChartPlotter::draw_line_chart(ui, &self.charts.line),
                        ChartKind::Bar => ChartPlotter::draw_bar_chart(ui, &self.charts.bar),
                        ChartKind::Histogram => {
                            ChartPlotter::draw_histogram(ui, &self.charts.histogram)
                        }
                        ChartKind::Scatter => ChartPlotter::draw_scatter(ui, &self.charts.scatter),
                    }
                });
            });
    }

    fn draw_class_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&self.charts.scatter.legend_title).size(13.0).strong());
            for (i, group) in self.charts.scatter.groups.iter().enumerate() {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 3.0, ChartPlotter::class_color(i));
                ui.label(RichText::new(group.class.to_string()).size(13.0));
                ui.add_space(12.0);
            }
        });
    }
}
