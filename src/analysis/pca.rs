//! Two-component Principal Component Analysis on standardized data.
//!
//! Centers each column, builds the covariance matrix (n − 1 denominator),
//! decomposes it with the `u_numflow` symmetric eigensolver and keeps the two
//! components of largest variance. Each loading vector is flipped so that its
//! largest-magnitude entry is positive; the projection is otherwise unique
//! only up to sign.

use u_numflow::matrix::Matrix;

use super::standardize::StandardizedDataset;
use crate::error::{AnalysisError, Stage};

/// Number of components retained.
pub const N_COMPONENTS: usize = 2;

/// Result of the 2-component PCA.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaResult {
    /// Feature names, in the order of the loading entries.
    pub features: Vec<String>,
    /// PC1 score per row.
    pub pc1: Vec<f64>,
    /// PC2 score per row.
    pub pc2: Vec<f64>,
    /// Variance along each component.
    pub explained_variance: [f64; N_COMPONENTS],
    /// Fraction of total variance per component.
    pub explained_variance_ratio: [f64; N_COMPONENTS],
    /// Unit loading vectors, one per component.
    pub loadings: [Vec<f64>; N_COMPONENTS],
}

impl PcaResult {
    /// Fraction of total variance captured by both components.
    pub fn total_explained(&self) -> f64 {
        self.explained_variance_ratio.iter().sum()
    }

    /// `(PC1, PC2)` pairs in row order.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.pc1.iter().zip(&self.pc2).map(|(&x, &y)| [x, y])
    }
}

/// Fit a 2-component PCA to `data` and project every row onto it.
///
/// Fails on fewer than two features or rows, and on any NaN or infinite cell.
pub fn pca(data: &StandardizedDataset) -> Result<PcaResult, AnalysisError> {
    let d = data.n_columns();
    if d < N_COMPONENTS {
        return Err(AnalysisError::InsufficientFeatures {
            stage: Stage::Pca,
            required: N_COMPONENTS,
            actual: d,
        });
    }
    let n = data.n_rows;
    if n < 2 {
        return Err(AnalysisError::InsufficientSamples {
            stage: Stage::Pca,
            required: 2,
            actual: n,
        });
    }
    for (name, col) in data.names.iter().zip(&data.columns) {
        let bad = col.iter().filter(|v| !v.is_finite()).count();
        if bad > 0 {
            return Err(AnalysisError::NonFiniteValues {
                column: name.clone(),
                count: bad,
            });
        }
    }

    let centered: Vec<Vec<f64>> = data
        .columns
        .iter()
        .map(|col| {
            let mean = col.iter().sum::<f64>() / n as f64;
            col.iter().map(|v| v - mean).collect()
        })
        .collect();

    // Row-major covariance, n − 1 denominator.
    let mut cov = vec![0.0; d * d];
    for i in 0..d {
        for j in i..d {
            let c = centered[i]
                .iter()
                .zip(&centered[j])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / (n - 1) as f64;
            cov[i * d + j] = c;
            cov[j * d + i] = c;
        }
    }

    let decomposition_failed = |detail: String| AnalysisError::Decomposition {
        stage: Stage::Pca,
        detail,
    };
    let cov = Matrix::new(d, d, cov).map_err(|e| decomposition_failed(e.to_string()))?;
    let (values, vectors) = cov
        .eigen_symmetric()
        .map_err(|e| decomposition_failed(e.to_string()))?;

    // Largest variance first; round-off below zero is clamped.
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    let eigenvalues: Vec<f64> = order.iter().map(|&k| values[k].max(0.0)).collect();
    let total: f64 = eigenvalues.iter().sum();

    let mut loadings: [Vec<f64>; N_COMPONENTS] = [Vec::new(), Vec::new()];
    let mut explained_variance = [0.0; N_COMPONENTS];
    let mut explained_variance_ratio = [0.0; N_COMPONENTS];
    for k in 0..N_COMPONENTS {
        let column = order[k];
        loadings[k] = normalize_sign((0..d).map(|feat| vectors.get(feat, column)).collect());
        explained_variance[k] = eigenvalues[k];
        explained_variance_ratio[k] = if total > 0.0 {
            eigenvalues[k] / total
        } else {
            0.0
        };
    }

    let project = |loading: &[f64]| -> Vec<f64> {
        (0..n)
            .map(|row| {
                centered
                    .iter()
                    .zip(loading)
                    .map(|(col, w)| col[row] * w)
                    .sum::<f64>()
            })
            .collect()
    };
    let pc1 = project(loadings[0].as_slice());
    let pc2 = project(loadings[1].as_slice());

    log::debug!(
        "PCA on {n}x{d}: explained variance ratio {:.4}, {:.4}",
        explained_variance_ratio[0],
        explained_variance_ratio[1]
    );

    Ok(PcaResult {
        features: data.names.clone(),
        pc1,
        pc2,
        explained_variance,
        explained_variance_ratio,
        loadings,
    })
}

/// Flip the vector so its largest-magnitude entry is positive.
fn normalize_sign(mut v: Vec<f64>) -> Vec<f64> {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        for x in &mut v {
            *x = -*x;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::select::NumericSubset;
    use crate::analysis::standardize::standardize;

    fn standardized(names: &[&str], columns: Vec<Vec<f64>>) -> StandardizedDataset {
        let n_rows = columns.first().map_or(0, Vec::len);
        standardize(&NumericSubset {
            names: names.iter().map(|s| s.to_string()).collect(),
            columns,
            n_rows,
        })
    }

    fn three_features() -> StandardizedDataset {
        standardized(
            &["a", "b", "c"],
            vec![
                vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
                vec![2.1, 3.9, 6.2, 7.8, 10.1, 12.2, 13.8, 16.1],
                vec![5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0, 6.0],
            ],
        )
    }

    #[test]
    fn ratios_bounded_and_sum_at_most_one() {
        let r = pca(&three_features()).unwrap();
        for ratio in r.explained_variance_ratio {
            assert!((0.0..=1.0).contains(&ratio));
        }
        assert!(r.total_explained() <= 1.0 + 1e-12);
        assert!(r.explained_variance_ratio[0] >= r.explained_variance_ratio[1]);
        assert_eq!(r.pc1.len(), 8);
        assert_eq!(r.pc2.len(), 8);
    }

    #[test]
    fn two_features_capture_all_variance() {
        let data = standardized(
            &["x", "y"],
            vec![vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![2.0, 1.0, 4.0, 3.0, 6.0]],
        );
        let r = pca(&data).unwrap();
        assert!((r.total_explained() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfectly_correlated_pair_loads_equally() {
        let data = standardized(
            &["x", "y"],
            vec![vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![2.0, 4.0, 6.0, 8.0, 10.0]],
        );
        let r = pca(&data).unwrap();
        assert!(r.explained_variance_ratio[0] > 0.999);
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((r.loadings[0][0].abs() - expected).abs() < 1e-10);
        assert!((r.loadings[0][1].abs() - expected).abs() < 1e-10);
    }

    #[test]
    fn rerun_is_identical_up_to_sign() {
        let data = three_features();
        let a = pca(&data).unwrap();
        let b = pca(&data).unwrap();
        assert_eq!(a.explained_variance_ratio, b.explained_variance_ratio);
        for (x, y) in a.pc1.iter().zip(&b.pc1) {
            assert!((x.abs() - y.abs()).abs() < 1e-12);
        }
        for (x, y) in a.pc2.iter().zip(&b.pc2) {
            assert!((x.abs() - y.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn scores_are_centered_and_have_component_variance() {
        let r = pca(&three_features()).unwrap();
        let n = r.pc1.len() as f64;
        let mean: f64 = r.pc1.iter().sum::<f64>() / n;
        assert!(mean.abs() < 1e-10);
        let var: f64 = r.pc1.iter().map(|x| x * x).sum::<f64>() / (n - 1.0);
        assert!((var - r.explained_variance[0]).abs() < 1e-9);
    }

    #[test]
    fn loadings_are_orthonormal() {
        let r = pca(&three_features()).unwrap();
        let dot = |a: &[f64], b: &[f64]| a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>();
        assert!((dot(&r.loadings[0], &r.loadings[0]) - 1.0).abs() < 1e-10);
        assert!((dot(&r.loadings[1], &r.loadings[1]) - 1.0).abs() < 1e-10);
        assert!(dot(&r.loadings[0], &r.loadings[1]).abs() < 1e-10);
    }

    #[test]
    fn single_feature_is_insufficient() {
        let data = standardized(&["x"], vec![vec![1.0, 2.0, 3.0]]);
        let err = pca(&data).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientFeatures {
                stage: Stage::Pca,
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn single_row_is_insufficient() {
        let data = standardized(&["x", "y"], vec![vec![1.0], vec![2.0]]);
        assert!(matches!(
            pca(&data),
            Err(AnalysisError::InsufficientSamples { actual: 1, .. })
        ));
    }

    #[test]
    fn missing_values_are_rejected() {
        let data = standardized(
            &["x", "y"],
            vec![vec![1.0, f64::NAN, 3.0], vec![2.0, 1.0, 0.0]],
        );
        assert_eq!(
            pca(&data).unwrap_err(),
            AnalysisError::NonFiniteValues {
                column: "x".into(),
                count: 1
            }
        );
    }

    #[test]
    fn constant_column_gives_finite_projection() {
        let data = standardized(
            &["k", "x", "y"],
            vec![
                vec![7.0; 5],
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                vec![5.0, 3.0, 4.0, 1.0, 2.0],
            ],
        );
        let r = pca(&data).unwrap();
        assert!(r.pc1.iter().chain(&r.pc2).all(|v| v.is_finite()));
        assert!((r.total_explained() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn loadings_have_positive_pivot() {
        let r = pca(&three_features()).unwrap();
        for loading in &r.loadings {
            let pivot = loading
                .iter()
                .copied()
                .fold(0.0_f64, |b, x| if x.abs() > b.abs() { x } else { b });
            assert!(pivot > 0.0);
        }
    }
}
