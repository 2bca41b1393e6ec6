use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::analysis::correlation::CorrelationMatrix;
use crate::data::model::Value;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Diverging colour scale for correlation heatmaps
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Blue → grey → red scale over `[-1, 1]`. NaN maps to dark grey.
pub fn coolwarm(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::DARK_GRAY;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = if t < 0.0 {
        linear(NEUTRAL).mix(linear(COOL), -t)
    } else {
        linear(NEUTRAL).mix(linear(WARM), t)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Text colour readable on top of `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// One annotated heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub fill: Color32,
    pub label: String,
}

/// Cells of a correlation heatmap, row-major, annotated to 2 decimals.
pub fn heatmap_cells(matrix: &CorrelationMatrix) -> Vec<HeatmapCell> {
    matrix
        .values
        .iter()
        .enumerate()
        .flat_map(|(row, values)| {
            values.iter().enumerate().map(move |(col, &value)| HeatmapCell {
                row,
                col,
                value,
                fill: coolwarm(value),
                label: if value.is_nan() {
                    "NaN".to_string()
                } else {
                    format!("{value:.2}")
                },
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: categorical value → Color32
// ---------------------------------------------------------------------------

/// Maps unique values of a chosen column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<Value, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given column from its cell values.
    /// Nulls fall back to the default colour.
    pub fn from_values(column: &str, values: &[Value]) -> Self {
        let unique: BTreeSet<&Value> = values.iter().filter(|v| !v.is_null()).collect();
        let palette = generate_palette(unique.len());
        let mapping: BTreeMap<Value, Color32> = unique
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &Value) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(coolwarm(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(coolwarm(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(coolwarm(5.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), Color32::DARK_GRAY);
    }

    #[test]
    fn contrast_text_flips_on_dark_backgrounds() {
        assert_eq!(contrast_text(Color32::from_rgb(221, 221, 221)), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }

    #[test]
    fn heatmap_cells_carry_matrix_values() {
        let matrix = CorrelationMatrix {
            names: vec!["a".into(), "b".into()],
            values: vec![vec![1.0, -0.256], vec![-0.256, 1.0]],
        };
        let cells = heatmap_cells(&matrix);
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert_eq!(cell.value, matrix.values[cell.row][cell.col]);
        }
        assert_eq!(cells[1].label, "-0.26");
        assert_eq!(cells[0].fill, coolwarm(1.0));
    }

    #[test]
    fn color_map_skips_nulls() {
        let values = vec![
            Value::Text("cat".into()),
            Value::Null,
            Value::Text("dog".into()),
            Value::Text("cat".into()),
        ];
        let map = ColorMap::from_values("species", &values);
        assert_eq!(map.legend_entries().len(), 2);
        assert_eq!(map.color_for(&Value::Null), Color32::GRAY);
        assert_ne!(
            map.color_for(&Value::Text("cat".into())),
            map.color_for(&Value::Text("dog".into()))
        );
    }
}
