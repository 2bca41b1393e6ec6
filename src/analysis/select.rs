//! Selection of the integer and float columns, viewed as `f64`.

use crate::data::model::Dataset;

/// The integer and float columns of a dataset as `f64` columns.
/// Missing cells are NaN.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericSubset {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub n_rows: usize,
}

impl NumericSubset {
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }
}

/// Names of the numeric columns, in dataset order. Boolean and text columns
/// never qualify.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .map(|c| c.name.clone())
        .collect()
}

/// Project the numeric columns of `dataset` to `f64`, keeping column order.
pub fn numeric_subset(dataset: &Dataset) -> NumericSubset {
    let numeric: Vec<_> = dataset
        .columns()
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .collect();
    NumericSubset {
        names: numeric.iter().map(|c| c.name.clone()).collect(),
        columns: numeric.iter().map(|c| c.to_f64()).collect(),
        n_rows: dataset.n_rows(),
    }
}
