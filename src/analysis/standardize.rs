//! Z-score standardization of the numeric columns.
//!
//! Uses the population standard deviation (ddof = 0), the convention of the
//! common standard scalers. Missing cells are skipped when fitting and stay
//! NaN in the output.
//!
//! A column whose variance is only round-off relative to its own magnitude is
//! scaled by 1.0 instead; its standardized values are all zero and a
//! [`DegenerateColumnWarning`] is reported for it.

use super::select::NumericSubset;
use crate::error::DegenerateColumnWarning;

/// The standardized numeric table, plus the parameters used to produce it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandardizedDataset {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub n_rows: usize,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub warnings: Vec<DegenerateColumnWarning>,
}

impl StandardizedDataset {
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Row `i` across all columns.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[i]).collect()
    }
}

/// Standardize every column of `subset` to zero mean and unit population std.
pub fn standardize(subset: &NumericSubset) -> StandardizedDataset {
    let mut out = StandardizedDataset {
        names: subset.names.clone(),
        n_rows: subset.n_rows,
        ..Default::default()
    };

    for (name, column) in subset.names.iter().zip(&subset.columns) {
        let fit = fit_column(column);
        let constant = fit.is_constant();

        let scale = if constant {
            log::warn!("column '{name}' has zero variance, scaling by 1.0");
            out.warnings.push(DegenerateColumnWarning {
                column: name.clone(),
            });
            1.0
        } else {
            fit.variance.sqrt()
        };

        out.columns.push(
            column
                .iter()
                .map(|&v| match (v.is_finite(), constant) {
                    (false, _) => f64::NAN,
                    (true, true) => 0.0,
                    (true, false) => (v - fit.mean) / scale,
                })
                .collect(),
        );
        out.means.push(fit.mean);
        out.scales.push(scale);
    }

    out
}

/// Mean and population variance of the finite values of one column.
struct ColumnFit {
    n: usize,
    mean: f64,
    variance: f64,
}

impl ColumnFit {
    /// Variance within round-off of zero, relative to the column's own
    /// magnitude: `var <= n·ε·var + (n·|mean|·ε)²`. Empty columns count too.
    fn is_constant(&self) -> bool {
        if self.n == 0 || !self.variance.is_finite() {
            return true;
        }
        let n = self.n as f64;
        let bound = n * f64::EPSILON * self.variance + (n * self.mean.abs() * f64::EPSILON).powi(2);
        self.variance <= bound
    }
}

fn fit_column(values: &[f64]) -> ColumnFit {
    let valid: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = valid.len();
    let mean = u_numflow::stats::mean(&valid).unwrap_or(f64::NAN);
    // Sample variance rescaled to ddof = 0; a single value has none.
    let variance = match n {
        0 => f64::NAN,
        1 => 0.0,
        _ => {
            u_numflow::stats::variance(&valid).unwrap_or(f64::NAN) * (n - 1) as f64 / n as f64
        }
    };
    ColumnFit { n, mean, variance }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(names: &[&str], columns: Vec<Vec<f64>>) -> NumericSubset {
        let n_rows = columns.first().map_or(0, Vec::len);
        NumericSubset {
            names: names.iter().map(|s| s.to_string()).collect(),
            columns,
            n_rows,
        }
    }

    fn mean_std(col: &[f64]) -> (f64, f64) {
        let fit = fit_column(col);
        (fit.mean, fit.variance.sqrt())
    }

    #[test]
    fn columns_have_zero_mean_unit_std() {
        let s = standardize(&subset(
            &["a", "b"],
            vec![
                vec![1.0, 2.0, 3.0, 4.0, 10.0],
                vec![100.0, 250.0, 175.0, 80.0, 300.0],
            ],
        ));
        for col in &s.columns {
            let (m, sd) = mean_std(col);
            assert!(m.abs() < 1e-9, "mean = {m}");
            assert!((sd - 1.0).abs() < 1e-9, "std = {sd}");
        }
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn uses_population_std() {
        let s = standardize(&subset(&["a"], vec![vec![1.0, 3.0]]));
        // mean 2, population std 1
        assert_eq!(s.columns[0], vec![-1.0, 1.0]);
        assert_eq!(s.scales[0], 1.0);
        assert_eq!(s.means[0], 2.0);
    }

    #[test]
    fn constant_column_becomes_zeros_with_warning() {
        let s = standardize(&subset(
            &["k", "x"],
            vec![vec![0.1, 0.1, 0.1], vec![1.0, 2.0, 3.0]],
        ));
        assert_eq!(s.columns[0], vec![0.0, 0.0, 0.0]);
        assert_eq!(
            s.warnings,
            vec![DegenerateColumnWarning {
                column: "k".into()
            }]
        );
        assert!(s.columns[1].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tiny_but_distinct_values_are_not_constant() {
        let s = standardize(&subset(
            &["tiny"],
            vec![vec![1e-16, 2e-16, 3e-16, 4e-16, 5e-16]],
        ));
        assert!(s.warnings.is_empty());
        let (m, sd) = mean_std(&s.columns[0]);
        assert!(m.abs() < 1e-9, "mean = {m}");
        assert!((sd - 1.0).abs() < 1e-9, "std = {sd}");
    }

    #[test]
    fn large_offset_with_real_spread_is_not_constant() {
        let s = standardize(&subset(&["big"], vec![vec![1e9, 1e9 + 1.0, 1e9 + 2.0]]));
        assert!(s.warnings.is_empty());
        let (_, sd) = mean_std(&s.columns[0]);
        assert!((sd - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_cells_stay_nan() {
        let s = standardize(&subset(&["a"], vec![vec![1.0, f64::NAN, 3.0]]));
        assert_eq!(s.columns[0][0], -1.0);
        assert!(s.columns[0][1].is_nan());
        assert_eq!(s.columns[0][2], 1.0);
    }

    #[test]
    fn all_missing_column_is_degenerate() {
        let s = standardize(&subset(&["a"], vec![vec![f64::NAN, f64::NAN]]));
        assert_eq!(s.warnings.len(), 1);
        assert!(s.columns[0].iter().all(|v| v.is_nan()));
    }
}
