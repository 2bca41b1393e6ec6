use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use eda_explorer::analysis::EdaReport;
use eda_explorer::data::model::Dataset;
use eda_explorer::state::AppState;

use super::plot;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Report page (central panel)
// ---------------------------------------------------------------------------

/// Render every report section, top to bottom.
pub fn report_page(ui: &mut Ui, state: &AppState) {
    let (Some(session), Some(report)) = (&state.session, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore it  (File → Open…, or drop it here)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            overview_section(ui, report);
            preview_section(ui, &session.dataset, state.preview_rows);
            stats_section(ui, report);
            types_section(ui, report);
            missing_section(ui, report);
            correlation_section(ui, report);
            standardized_section(ui, report, state.standardized_preview_rows);
            pca_section(ui, state, report);
        });
}

fn overview_section(ui: &mut Ui, report: &EdaReport) {
    ui.heading("1. Dataset Overview");
    ui.columns(2, |cols| {
        cols[0].strong("Dataset Shape");
        cols[0].label(format!("Rows: {}", report.overview.n_rows));
        cols[0].label(format!("Columns: {}", report.overview.n_columns));

        cols[1].strong("Column Names");
        cols[1].label(report.overview.column_names.join(", "));
    });
    ui.separator();
}

fn preview_section(ui: &mut Ui, dataset: &Dataset, rows: usize) {
    ui.heading("2. Raw Data Preview");
    let head = dataset.head(rows);
    let headers: Vec<String> = head.columns().iter().map(|c| c.name.clone()).collect();
    let cells: Vec<Vec<String>> = (0..head.n_rows())
        .map(|i| head.columns().iter().map(|c| c.values[i].to_string()).collect())
        .collect();
    string_table(ui, "preview", None, &headers, &cells);
    ui.separator();
}

fn stats_section(ui: &mut Ui, report: &EdaReport) {
    ui.heading("3. Dataset Summary Statistics");
    ui.label("Summary statistics for all columns (numeric + categorical).");
    let stats = &report.stats;
    if stats.is_empty() {
        ui.label("No columns to summarise.");
    } else {
        let cells: Vec<Vec<String>> = stats
            .statistics
            .iter()
            .zip(&stats.cells)
            .map(|(stat, row)| {
                std::iter::once(stat.label().to_string())
                    .chain(row.iter().map(|c| c.to_string()))
                    .collect()
            })
            .collect();
        string_table(ui, "describe", Some(""), &stats.columns, &cells);
    }
    ui.separator();
}

fn types_section(ui: &mut Ui, report: &EdaReport) {
    ui.heading("4. Data Types");
    let cells: Vec<Vec<String>> = report
        .column_types
        .iter()
        .map(|(name, dtype)| vec![name.clone(), dtype.to_string()])
        .collect();
    string_table(
        ui,
        "dtypes",
        None,
        &["Column".to_string(), "Data Type".to_string()],
        &cells,
    );
    ui.separator();
}

fn missing_section(ui: &mut Ui, report: &EdaReport) {
    ui.heading("5. Missing Values Check");
    let cells: Vec<Vec<String>> = report
        .missing
        .iter()
        .map(|(name, n)| vec![name.clone(), n.to_string()])
        .collect();
    string_table(
        ui,
        "missing",
        None,
        &["Column".to_string(), "Missing Values".to_string()],
        &cells,
    );
    ui.separator();
}

fn correlation_section(ui: &mut Ui, report: &EdaReport) {
    ui.heading("6. Numeric Features & Correlation Analysis");
    ui.strong("Detected Numeric Features");
    ui.label(format!("{:?}", report.numeric_features()));

    ui.strong("Correlation Matrix (Numeric Features)");
    match &report.correlation {
        Ok(matrix) => plot::correlation_heatmap(ui, matrix),
        Err(e) => error_label(ui, &e.to_string()),
    }
    ui.separator();
}

fn standardized_section(ui: &mut Ui, report: &EdaReport, rows: usize) {
    ui.heading("7. Standardization of Numeric Features");
    ui.label("Z-score normalization: each numeric feature is rescaled to mean ≈ 0 and standard deviation ≈ 1.");

    let scaled = &report.standardized;
    if scaled.n_columns() == 0 {
        ui.label("No numeric features to standardize.");
    } else {
        for w in &scaled.warnings {
            ui.label(RichText::new(w.to_string()).color(Color32::YELLOW));
        }
        let n = rows.min(scaled.n_rows);
        let cells: Vec<Vec<String>> = (0..n)
            .map(|i| scaled.row(i).iter().map(|v| format!("{v:.4}")).collect())
            .collect();
        string_table(ui, "standardized", None, &scaled.names, &cells);
    }
    ui.separator();
}

fn pca_section(ui: &mut Ui, state: &AppState, report: &EdaReport) {
    ui.heading("8. Principal Component Analysis (PCA)");
    ui.label("PCA projects the standardized numeric features onto two principal components (PC1 and PC2).");

    match &report.pca {
        Ok(result) => {
            ui.strong("Explained Variance Ratio");
            ui.label(format!(
                "PC1: {:.4}   PC2: {:.4}   Total Variance Explained: {:.4}",
                result.explained_variance_ratio[0],
                result.explained_variance_ratio[1],
                result.total_explained()
            ));
            ui.strong("PCA Scatter Plot (PC1 vs PC2)");
            plot::pca_scatter(ui, state, result);
        }
        Err(e) => error_label(ui, &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::RED));
}

/// A striped, horizontally scrollable table of pre-formatted cells.
/// `index_header` adds a leading column whose values are the first cell of each row.
fn string_table(
    ui: &mut Ui,
    id: &str,
    index_header: Option<&str>,
    headers: &[String],
    rows: &[Vec<String>],
) {
    let n_columns = headers.len() + usize::from(index_header.is_some());
    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal()
            .id_salt(id)
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(false)
                    .columns(TableColumn::auto().at_least(60.0), n_columns)
                    .header(ROW_HEIGHT + 2.0, |mut header| {
                        if let Some(index) = index_header {
                            header.col(|ui| {
                                ui.strong(index);
                            });
                        }
                        for h in headers {
                            header.col(|ui| {
                                ui.strong(h);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                            let cells = &rows[row.index()];
                            for (i, cell) in cells.iter().enumerate() {
                                row.col(|ui| {
                                    if i == 0 && index_header.is_some() {
                                        ui.strong(cell);
                                    } else {
                                        ui.label(cell);
                                    }
                                });
                            }
                        });
                    });
            });
    });
}
