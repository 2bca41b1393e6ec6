//! Pairwise Pearson correlation over the numeric columns.
//!
//! Each pair is computed over the rows where both values are present
//! (complete cases for that pair only). A pair with fewer than two complete
//! rows, or with a constant column over those rows, is NaN.

use super::select::NumericSubset;

/// Square correlation matrix indexed by column name on both axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// Row-major `values[i][j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == col)?;
        Some(self.values[i][j])
    }
}

/// Correlation of every pair of numeric columns, including each with itself.
pub fn correlation_matrix(subset: &NumericSubset) -> CorrelationMatrix {
    let d = subset.n_columns();
    let mut values = vec![vec![f64::NAN; d]; d];

    for i in 0..d {
        for j in i..d {
            let r = pearson_pairwise(&subset.columns[i], &subset.columns[j]);
            // A column with defined variance correlates exactly 1 with itself.
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        names: subset.names.clone(),
        values,
    }
}

/// Pearson correlation over the rows where both values are finite.
pub fn pearson_pairwise(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let (mut sab, mut saa, mut sbb) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }

    if saa <= 0.0 || sbb <= 0.0 {
        return f64::NAN;
    }
    (sab / (saa * sbb).sqrt()).clamp(-1.0, 1.0)
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

    #[test]
    fn perfect_positive_and_negative() {
        let m = correlation_matrix(&subset(
            &["x", "y", "z"],
            vec![
                vec![1.0, 2.0, 3.0, 4.0],
                vec![2.0, 4.0, 6.0, 8.0],
                vec![4.0, 3.0, 2.0, 1.0],
            ],
        ));
        assert!((m.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
        assert!((m.get("x", "z").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_symmetric_and_bounded() {
        let m = correlation_matrix(&subset(
            &["a", "b", "c"],
            vec![
                vec![1.0, 5.0, 2.0, 8.0, 3.0],
                vec![0.3, 0.1, 0.9, 0.4, 0.2],
                vec![10.0, 12.0, 9.0, 15.0, 11.0],
            ],
        ));
        for i in 0..m.len() {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..m.len() {
                assert_eq!(m.values[i][j], m.values[j][i]);
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
    }

    #[test]
    fn missing_values_are_excluded_per_pair() {
        let nan = f64::NAN;
        let a = vec![1.0, 2.0, nan, 4.0, 5.0];
        let b = vec![2.0, 4.0, 100.0, 8.0, 10.0];
        assert!((pearson_pairwise(&a, &b) - 1.0).abs() < 1e-12);

        let m = correlation_matrix(&subset(&["a", "b"], vec![a, b]));
        assert_eq!(m.values[0][0], 1.0);
    }

    #[test]
    fn constant_column_is_undefined() {
        let m = correlation_matrix(&subset(
            &["k", "x"],
            vec![vec![3.0, 3.0, 3.0], vec![1.0, 2.0, 3.0]],
        ));
        assert!(m.values[0][0].is_nan());
        assert!(m.values[0][1].is_nan());
        assert_eq!(m.values[1][1], 1.0);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(correlation_matrix(&NumericSubset::default()).is_empty());
        let one = correlation_matrix(&subset(&["a"], vec![vec![1.0, 2.0]]));
        assert_eq!(one.values, vec![vec![1.0]]);
    }
}
