use std::path::Path;

use crate::analysis::EdaReport;
use crate::color::ColorMap;
use crate::config::{clamp_preview_rows, ExplorerConfig};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::LoadResult;

// ---------------------------------------------------------------------------
// Session – the loaded dataset
// ---------------------------------------------------------------------------

/// The dataset being explored and where it came from. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Session {
    pub source: String,
    pub dataset: Dataset,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded session (None until a file is loaded).
    pub session: Option<Session>,

    /// Pipeline outputs for the current session.
    pub report: Option<EdaReport>,

    /// Rows shown in the raw data preview.
    pub preview_rows: usize,

    /// Rows shown in the standardized data preview.
    pub standardized_preview_rows: usize,

    /// Categorical column used to colour PCA points.
    pub color_column: Option<String>,

    /// Active colour map for `color_column`.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&ExplorerConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            session: None,
            report: None,
            preview_rows: clamp_preview_rows(config.preview_rows),
            standardized_preview_rows: clamp_preview_rows(config.standardized_preview_rows),
            color_column: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Replace the session and re-run the whole pipeline on it.
    pub fn set_dataset(&mut self, source: impl Into<String>, dataset: Dataset) {
        let source = source.into();
        log::info!(
            "Loaded {source}: {} rows, columns {:?}",
            dataset.n_rows(),
            dataset.column_names()
        );

        self.report = Some(EdaReport::run(&dataset));
        self.session = Some(Session { source, dataset });
        self.color_column = None;
        self.color_map = None;
        self.status_message = None;
    }

    /// Apply the outcome of a load attempt. On failure the previous session stays.
    pub fn apply_load(&mut self, source: &str, result: LoadResult<Dataset>) {
        match result {
            Ok(dataset) => self.set_dataset(source, dataset),
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.status_message = Some(format!("Error loading {source}: {e}"));
            }
        }
    }

    pub fn load_path(&mut self, path: &Path) {
        let result = loader::load_file(path);
        self.apply_load(&path.display().to_string(), result);
    }

    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) {
        let result = loader::load_bytes(name, bytes);
        self.apply_load(name, result);
    }

    /// Categorical columns available for colouring PCA points.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.session
            .as_ref()
            .map(|s| {
                s.dataset
                    .columns()
                    .iter()
                    .filter(|c| !c.dtype.is_numeric())
                    .map(|c| c.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Set (or clear) the colour column and rebuild the map.
    pub fn set_color_column(&mut self, column: Option<String>) {
        self.color_map = match (&column, &self.session) {
            (Some(col), Some(session)) => session
                .dataset
                .column(col)
                .map(|c| ColorMap::from_values(col, &c.values)),
            _ => None,
        };
        self.color_column = column;
    }

    pub fn set_preview_rows(&mut self, rows: usize) {
        self.preview_rows = clamp_preview_rows(rows);
    }

    pub fn set_standardized_preview_rows(&mut self, rows: usize) {
        self.standardized_preview_rows = clamp_preview_rows(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &[u8] = b"age,weight,species\n1,2.0,cat\n2,3.5,dog\n3,3.0,cat\n";

    #[test]
    fn loading_bytes_runs_pipeline() {
        let mut state = AppState::default();
        state.load_bytes("pets.csv", PETS);

        let session = state.session.as_ref().unwrap();
        assert_eq!(session.source, "pets.csv");
        assert_eq!(session.dataset.shape(), (3, 3));
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.numeric_features(), ["age", "weight"]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let mut state = AppState::default();
        state.load_bytes("pets.csv", PETS);
        state.load_bytes("broken.csv", b"a,b\n1,2\n3\n");

        assert!(state.status_message.as_deref().unwrap().contains("broken.csv"));
        assert_eq!(state.session.as_ref().unwrap().source, "pets.csv");
    }

    #[test]
    fn color_column_builds_map_from_values() {
        let mut state = AppState::default();
        state.load_bytes("pets.csv", PETS);
        assert_eq!(state.categorical_columns(), vec!["species"]);

        state.set_color_column(Some("species".into()));
        let map = state.color_map.as_ref().unwrap();
        assert_eq!(map.legend_entries().len(), 2);

        state.set_color_column(None);
        assert!(state.color_map.is_none());
    }

    #[test]
    fn preview_rows_are_clamped() {
        let mut state = AppState::default();
        state.set_preview_rows(1000);
        assert_eq!(state.preview_rows, 50);
        state.set_standardized_preview_rows(0);
        assert_eq!(state.standardized_preview_rows, 5);
    }
}
