mod app;
mod ui;

use app::EdaExplorerApp;
use eda_explorer::config::ExplorerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ExplorerConfig::load().unwrap_or_else(|e| {
        log::warn!("Falling back to default configuration: {e:#}");
        ExplorerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "EDA Explorer – Tabular Dataset Walkthrough",
        options,
        Box::new(move |_cc| Ok(Box::new(EdaExplorerApp::new(&config)))),
    )
}
