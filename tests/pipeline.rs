use std::path::PathBuf;

use eda_explorer::analysis::describe::{StatCell, Statistic};
use eda_explorer::analysis::EdaReport;
use eda_explorer::data::loader::load_file;
use eda_explorer::data::model::{ColumnType, Dataset, Value};
use eda_explorer::error::{AnalysisError, LoadError, Stage};
use eda_explorer::state::AppState;

const TOL: f64 = 1e-9;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Dataset {
    load_file(&fixture(name)).unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

#[test]
fn hundred_pets_run_through_every_stage() {
    let dataset = load("pets_100.csv");
    let report = EdaReport::run(&dataset);

    assert_eq!(dataset.shape(), (100, 3));
    assert_eq!(report.overview.n_rows, 100);
    assert_eq!(report.overview.column_names, ["age", "weight", "species"]);
    assert_eq!(
        report.column_types,
        vec![
            ("age".to_string(), ColumnType::Integer),
            ("weight".to_string(), ColumnType::Float),
            ("species".to_string(), ColumnType::Text),
        ]
    );
    assert!(report.missing.iter().all(|(_, n)| *n == 0));
    assert_eq!(report.numeric_features(), ["age", "weight"]);

    let corr = report.correlation.as_ref().unwrap();
    assert_eq!(corr.len(), 2);
    assert_eq!(corr.get("age", "age"), Some(1.0));
    assert_eq!(corr.get("weight", "weight"), Some(1.0));
    let r = corr.get("age", "weight").unwrap();
    assert_eq!(Some(r), corr.get("weight", "age"));
    assert!((-1.0..=1.0).contains(&r));

    let scaled = &report.standardized;
    assert_eq!((scaled.n_rows, scaled.n_columns()), (100, 2));
    for col in &scaled.columns {
        assert!(mean(col).abs() < TOL);
        assert!((population_std(col) - 1.0).abs() < TOL);
    }
    assert!(report.warnings().is_empty());

    let pca = report.pca.as_ref().unwrap();
    assert_eq!(pca.pc1.len(), 100);
    assert_eq!(pca.pc2.len(), 100);
    let [r1, r2] = pca.explained_variance_ratio;
    assert!(r1 >= r2);
    assert!((r1 + r2 - 1.0).abs() < TOL);
}

#[test]
fn describe_covers_numeric_and_categorical_columns() {
    let report = EdaReport::run(&load("pets_100.csv"));
    let stats = &report.stats;

    assert_eq!(stats.get(Statistic::Count, "age"), Some(&StatCell::Count(100)));
    let mean_age = stats.get(Statistic::Mean, "age").and_then(StatCell::as_f64).unwrap();
    assert!((mean_age - 7.75).abs() < TOL);
    assert_eq!(stats.get(Statistic::Min, "age"), Some(&StatCell::Number(1.0)));
    assert_eq!(stats.get(Statistic::Max, "age"), Some(&StatCell::Number(15.0)));
    assert_eq!(stats.get(Statistic::Top, "age"), Some(&StatCell::Missing));

    assert_eq!(stats.get(Statistic::Unique, "species"), Some(&StatCell::Count(3)));
    assert_eq!(
        stats.get(Statistic::Top, "species"),
        Some(&StatCell::Label(Value::Text("dog".into())))
    );
    assert_eq!(stats.get(Statistic::Freq, "species"), Some(&StatCell::Count(34)));
    assert_eq!(stats.get(Statistic::Mean, "species"), Some(&StatCell::Missing));
}

#[test]
fn single_numeric_column_skips_correlation_and_pca() {
    let dataset = load("one_numeric.csv");
    let report = EdaReport::run(&dataset);

    assert_eq!(dataset.shape(), (5, 4));
    assert_eq!(report.numeric_features(), ["age"]);
    assert_eq!(
        report.column_types[2],
        ("vaccinated".to_string(), ColumnType::Boolean)
    );
    assert_eq!(
        report.missing,
        vec![
            ("name".to_string(), 0),
            ("age".to_string(), 1),
            ("vaccinated".to_string(), 0),
            ("color".to_string(), 1),
        ]
    );
    assert!(!report.stats.is_empty());

    assert_eq!(
        report.correlation,
        Err(AnalysisError::InsufficientFeatures {
            stage: Stage::Correlation,
            required: 2,
            actual: 1,
        })
    );
    assert!(matches!(
        report.pca,
        Err(AnalysisError::InsufficientFeatures {
            stage: Stage::Pca,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn constant_column_is_zeroed_and_warned() {
    let report = EdaReport::run(&load("constant_column.csv"));

    let idx = report
        .standardized
        .names
        .iter()
        .position(|n| n == "shelter")
        .unwrap();
    assert!(report.standardized.columns[idx].iter().all(|v| *v == 0.0));
    assert_eq!(report.warnings().len(), 1);
    assert_eq!(report.warnings()[0].column, "shelter");

    let corr = report.correlation.as_ref().unwrap();
    assert!(corr.get("shelter", "age").unwrap().is_nan());
    assert!(corr.get("shelter", "shelter").unwrap().is_nan());

    // The zeroed column adds no variance, so PCA stays finite.
    let pca = report.pca.as_ref().unwrap();
    assert!(pca.pc1.iter().chain(&pca.pc2).all(|v| v.is_finite()));
    assert!(pca.total_explained() <= 1.0 + TOL);
}

#[test]
fn ragged_rows_are_a_load_error() {
    let err = load_file(&fixture("ragged.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
}

#[test]
fn empty_file_is_a_load_error() {
    let err = load_file(&fixture("empty.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[test]
fn missing_file_leaves_state_without_a_session() {
    let mut state = AppState::default();
    state.load_path(&fixture("does_not_exist.csv"));

    assert!(state.session.is_none());
    assert!(state.report.is_none());
    assert!(state.status_message.is_some());
}
