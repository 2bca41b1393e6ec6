//! One pass of every analysis stage over a loaded dataset.

use std::time::Instant;

use super::correlation::{correlation_matrix, CorrelationMatrix};
use super::describe::{describe, StatsTable};
use super::inspect::{column_types, missing_counts, overview, Overview};
use super::pca::{pca, PcaResult};
use super::select::{numeric_subset, NumericSubset};
use super::standardize::{standardize, StandardizedDataset};
use crate::data::model::{ColumnType, Dataset};
use crate::error::{AnalysisError, DegenerateColumnWarning, Stage};

/// Every derived output of one pipeline run.
///
/// Built from a borrowed [`Dataset`] and discarded when the next run replaces
/// it. Stages that cannot run keep their error so the page can show it in
/// place of the section.
#[derive(Debug, Clone)]
pub struct EdaReport {
    pub overview: Overview,
    pub stats: StatsTable,
    pub column_types: Vec<(String, ColumnType)>,
    pub missing: Vec<(String, usize)>,
    pub numeric: NumericSubset,
    pub correlation: Result<CorrelationMatrix, AnalysisError>,
    pub standardized: StandardizedDataset,
    pub pca: Result<PcaResult, AnalysisError>,
}

impl EdaReport {
    /// Run all stages over `dataset`.
    pub fn run(dataset: &Dataset) -> Self {
        let started = Instant::now();

        let numeric = numeric_subset(dataset);
        let correlation = if numeric.n_columns() < 2 {
            Err(AnalysisError::InsufficientFeatures {
                stage: Stage::Correlation,
                required: 2,
                actual: numeric.n_columns(),
            })
        } else {
            Ok(correlation_matrix(&numeric))
        };
        let standardized = standardize(&numeric);
        let pca = pca(&standardized);

        if let Err(e) = &correlation {
            log::warn!("skipping correlation: {e}");
        }
        if let Err(e) = &pca {
            log::warn!("skipping PCA: {e}");
        }

        let report = Self {
            overview: overview(dataset),
            stats: describe(dataset),
            column_types: column_types(dataset),
            missing: missing_counts(dataset),
            numeric,
            correlation,
            standardized,
            pca,
        };

        log::info!(
            "analysed {} rows x {} columns ({} numeric) in {:?}",
            report.overview.n_rows,
            report.overview.n_columns,
            report.numeric.n_columns(),
            started.elapsed()
        );
        report
    }

    pub fn numeric_features(&self) -> &[String] {
        &self.numeric.names
    }

    pub fn warnings(&self) -> &[DegenerateColumnWarning] {
        &self.standardized.warnings
    }
}
