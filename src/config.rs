use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "EDA_EXPLORER_CONFIG";
/// Environment variable overriding the startup dataset path.
pub const DATASET_ENV: &str = "EDA_DATASET";

/// Bounds of the preview row sliders.
pub const MIN_PREVIEW_ROWS: usize = 5;
pub const MAX_PREVIEW_ROWS: usize = 50;

// ---------------------------------------------------------------------------
// Explorer configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Dataset opened at startup, if the file exists.
    pub dataset_path: Option<PathBuf>,
    /// Rows shown in the raw data preview.
    pub preview_rows: usize,
    /// Rows shown in the standardized data preview.
    pub standardized_preview_rows: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset_path: Some(PathBuf::from("pet_adoption_dataset.csv")),
            preview_rows: 10,
            standardized_preview_rows: 10,
        }
    }
}

impl ExplorerConfig {
    /// Defaults, then the JSON file named by `EDA_EXPLORER_CONFIG`, then
    /// `EDA_DATASET`.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(dataset) = std::env::var_os(DATASET_ENV) {
            config.dataset_path = Some(PathBuf::from(dataset));
        }
        Ok(config.clamped())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid explorer config")?;
        Ok(config.clamped())
    }

    /// Keep the preview sizes inside the slider range.
    pub fn clamped(mut self) -> Self {
        self.preview_rows = clamp_preview_rows(self.preview_rows);
        self.standardized_preview_rows = clamp_preview_rows(self.standardized_preview_rows);
        self
    }
}

pub fn clamp_preview_rows(rows: usize) -> usize {
    rows.clamp(MIN_PREVIEW_ROWS, MAX_PREVIEW_ROWS)
}
