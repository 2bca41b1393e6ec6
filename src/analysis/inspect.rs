//! Structural reports: overview, column types and missing values.

use crate::data::model::{ColumnType, Dataset};

/// Shape and column names of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub n_rows: usize,
    pub n_columns: usize,
    pub column_names: Vec<String>,
}

/// Shape and column names, straight from the dataset.
pub fn overview(dataset: &Dataset) -> Overview {
    let (n_rows, n_columns) = dataset.shape();
    Overview {
        n_rows,
        n_columns,
        column_names: dataset.columns().iter().map(|c| c.name.clone()).collect(),
    }
}

/// Each column's type, in column order.
pub fn column_types(dataset: &Dataset) -> Vec<(String, ColumnType)> {
    dataset
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.dtype))
        .collect()
}

/// Number of null cells per column, in column order.
pub fn missing_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    dataset
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.missing_count()))
        .collect()
}
