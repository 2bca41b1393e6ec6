use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use eda_explorer::analysis::correlation::CorrelationMatrix;
use eda_explorer::analysis::pca::PcaResult;
use eda_explorer::color::{contrast_text, heatmap_cells};
use eda_explorer::data::model::Value;
use eda_explorer::state::AppState;

const SCATTER_ALPHA: f32 = 0.6;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Render the correlation matrix as an annotated heatmap.
/// Row `i` is drawn at `y = -i` so the first feature sits on top.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let d = matrix.len() as f64;
    let side = (60.0 * d as f32 + 120.0).clamp(240.0, 640.0);

    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .height(side)
        .width(side + 80.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            for cell in heatmap_cells(matrix) {
                let (x, y) = (cell.col as f64, -(cell.row as f64));
                let square: PlotPoints = vec![
                    [x - 0.5, y - 0.5],
                    [x + 0.5, y - 0.5],
                    [x + 0.5, y + 0.5],
                    [x - 0.5, y + 0.5],
                ]
                .into();
                plot_ui.polygon(
                    Polygon::new(square)
                        .fill_color(cell.fill)
                        .stroke(Stroke::new(0.5, Color32::WHITE)),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(cell.label).color(contrast_text(cell.fill)),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
            }

            for (i, name) in matrix.names.iter().enumerate() {
                let i = i as f64;
                plot_ui.text(
                    Text::new(PlotPoint::new(-0.6, -i), RichText::new(name).strong())
                        .anchor(Align2::RIGHT_CENTER),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(i, -d + 0.4), RichText::new(name).strong())
                        .anchor(Align2::CENTER_TOP),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// PCA scatter
// ---------------------------------------------------------------------------

/// Render PC1 against PC2, grouped by the colour column when one is selected.
pub fn pca_scatter(ui: &mut Ui, state: &AppState, result: &PcaResult) {
    let groups = scatter_groups(state, result);

    Plot::new("pca_scatter")
        .legend(Legend::default())
        .height(420.0)
        .x_axis_label("Principal Component 1")
        .y_axis_label("Principal Component 2")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, color, points) in groups {
                let points: PlotPoints = points.into();
                plot_ui.points(
                    Points::new(points)
                        .name(name)
                        .color(color.gamma_multiply(SCATTER_ALPHA))
                        .radius(2.5)
                        .filled(true),
                );
            }
        });
}

/// Split the score points into named, coloured series.
fn scatter_groups(state: &AppState, result: &PcaResult) -> Vec<(String, Color32, Vec<[f64; 2]>)> {
    let column = state.color_map.as_ref().and_then(|cm| {
        let session = state.session.as_ref()?;
        let col = session.dataset.column(&cm.column)?;
        Some((cm, col))
    });

    let Some((color_map, col)) = column else {
        return vec![(
            "rows".to_string(),
            Color32::LIGHT_BLUE,
            result.points().collect(),
        )];
    };

    let mut by_value: BTreeMap<&Value, Vec<[f64; 2]>> = BTreeMap::new();
    for (value, point) in col.values.iter().zip(result.points()) {
        by_value.entry(value).or_default().push(point);
    }

    by_value
        .into_iter()
        .map(|(value, points)| {
            (
                value.to_string(),
                color_map.color_for(value),
                points,
            )
        })
        .collect()
}
