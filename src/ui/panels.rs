use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use eda_explorer::config::{MAX_PREVIEW_ROWS, MIN_PREVIEW_ROWS};
use eda_explorer::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – display controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if state.session.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Preview sizes ----
            ui.strong("Raw data preview rows");
            let mut rows = state.preview_rows;
            if ui
                .add(Slider::new(&mut rows, MIN_PREVIEW_ROWS..=MAX_PREVIEW_ROWS))
                .changed()
            {
                state.set_preview_rows(rows);
            }

            ui.strong("Standardized preview rows");
            let mut std_rows = state.standardized_preview_rows;
            if ui
                .add(Slider::new(&mut std_rows, MIN_PREVIEW_ROWS..=MAX_PREVIEW_ROWS))
                .changed()
            {
                state.set_standardized_preview_rows(std_rows);
            }
            ui.separator();

            // ---- Colour-by selector for the PCA scatter ----
            ui.strong("Color PCA points by");
            let columns = state.categorical_columns();
            let current = state.color_column.clone();
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.as_deref().unwrap_or("(none)"))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "(none)").clicked() {
                        state.set_color_column(None);
                    }
                    for col in &columns {
                        if ui
                            .selectable_label(current.as_deref() == Some(col.as_str()), col)
                            .clicked()
                        {
                            state.set_color_column(Some(col.clone()));
                        }
                    }
                });

            if let Some(cm) = &state.color_map {
                for (label, color) in cm.legend_entries() {
                    ui.label(RichText::new(format!("● {label}")).color(color));
                }
            }

            // ---- Warnings from the last pipeline run ----
            if let Some(report) = &state.report {
                if !report.warnings().is_empty() {
                    ui.separator();
                    ui.strong("Warnings");
                    for w in report.warnings() {
                        ui.label(RichText::new(w.to_string()).color(Color32::YELLOW));
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let (rows, cols) = session.dataset.shape();
            ui.label(format!("{}: {rows} rows × {cols} columns", session.source));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File input: dialog and drag-and-drop
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

/// Load the first file dropped onto the window this frame, if any.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let Some(file) = dropped.into_iter().next() else {
        return;
    };

    if let Some(path) = &file.path {
        state.load_path(path);
    } else if let Some(bytes) = &file.bytes {
        state.load_bytes(&file.name, bytes);
    } else {
        log::warn!("dropped file '{}' has neither path nor contents", file.name);
    }
}
