use eframe::egui;

use eda_explorer::config::ExplorerConfig;
use eda_explorer::state::AppState;

use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EdaExplorerApp {
    pub state: AppState,
}

impl EdaExplorerApp {
    /// Build the app and open the configured startup dataset if it exists.
    pub fn new(config: &ExplorerConfig) -> Self {
        let mut state = AppState::from_config(config);
        match &config.dataset_path {
            Some(path) if path.exists() => state.load_path(path),
            Some(path) => log::info!(
                "startup dataset {} not found, waiting for a file",
                path.display()
            ),
            None => {}
        }
        Self { state }
    }
}

impl eframe::App for EdaExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: display controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            sections::report_page(ui, &self.state);
        });
    }
}
