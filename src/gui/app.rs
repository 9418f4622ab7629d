//! Wine EDA Viewer Application
//! Window showing the charts of an analysis run.

use crate::charts::{ChartSet, ChartSink, VisualizationError};
use crate::gui::ChartViewer;
use eframe::egui;
use egui::RichText;
use tracing::info;

pub const WINDOW_TITLE: &str = "Wine Dataset Explorer";

/// Main application window.
pub struct WineEdaApp {
    chart_viewer: ChartViewer,
}

impl WineEdaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, charts: ChartSet) -> Self {
        Self {
            chart_viewer: ChartViewer::new(charts),
        }
    }
}

impl eframe::App for WineEdaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new(WINDOW_TITLE).size(20.0).strong());
            ui.label("Close the window to finish the analysis.");
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Shows charts in a native window and blocks until it is closed.
#[derive(Debug, Default)]
pub struct ViewerSink;

impl ChartSink for ViewerSink {
    fn present(&mut self, charts: ChartSet) -> Result<(), VisualizationError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1300.0, 900.0])
                .with_min_inner_size([700.0, 500.0])
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        info!("Opening chart viewer");
        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(|cc| Ok(Box::new(WineEdaApp::new(cc, charts)))),
        )
        .map_err(|e| VisualizationError::Viewer(e.to_string()))
    }
}
