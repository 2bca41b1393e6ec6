//! Descriptive statistics over every column at once.
//!
//! Numeric columns (integer, float) get count, mean, sample standard
//! deviation, min, quartiles and max. Categorical columns (boolean, text) get
//! count, number of distinct values, most frequent value and its frequency.
//! Statistics that do not apply to a column's type are [`StatCell::Missing`].

use std::collections::HashMap;
use std::fmt;

use crate::data::model::{Column, Dataset, Value};

/// One row of the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Count,
    Unique,
    Top,
    Freq,
    Mean,
    Std,
    Min,
    Q25,
    Median,
    Q75,
    Max,
}

impl Statistic {
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Unique => "unique",
            Statistic::Top => "top",
            Statistic::Freq => "freq",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
            Statistic::Min => "min",
            Statistic::Q25 => "25%",
            Statistic::Median => "50%",
            Statistic::Q75 => "75%",
            Statistic::Max => "max",
        }
    }
}

const CATEGORICAL_STATS: [Statistic; 3] = [Statistic::Unique, Statistic::Top, Statistic::Freq];
const NUMERIC_STATS: [Statistic; 7] = [
    Statistic::Mean,
    Statistic::Std,
    Statistic::Min,
    Statistic::Q25,
    Statistic::Median,
    Statistic::Q75,
    Statistic::Max,
];

/// A single statistics cell.
#[derive(Debug, Clone, PartialEq)]
pub enum StatCell {
    /// Undefined for this column.
    Missing,
    Count(usize),
    Number(f64),
    Label(Value),
}

impl StatCell {
    /// NaN becomes `Missing`.
    fn number(v: f64) -> Self {
        if v.is_nan() {
            StatCell::Missing
        } else {
            StatCell::Number(v)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatCell::Count(n) => Some(*n as f64),
            StatCell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StatCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatCell::Missing => write!(f, "NaN"),
            StatCell::Count(n) => write!(f, "{n}"),
            StatCell::Number(v) => write!(f, "{v:.4}"),
            StatCell::Label(v) => write!(f, "{v}"),
        }
    }
}

/// Statistics table: rows are statistics, columns are dataset columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsTable {
    pub statistics: Vec<Statistic>,
    pub columns: Vec<String>,
    /// `cells[row][col]`, aligned with `statistics` and `columns`.
    pub cells: Vec<Vec<StatCell>>,
}

impl StatsTable {
    pub fn get(&self, stat: Statistic, column: &str) -> Option<&StatCell> {
        let row = self.statistics.iter().position(|s| *s == stat)?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.cells.get(row)?.get(col)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Summarise every column of the dataset.
///
/// The categorical rows only appear when at least one column is categorical,
/// the numeric rows only when at least one column is numeric.
pub fn describe(dataset: &Dataset) -> StatsTable {
    if dataset.n_columns() == 0 {
        return StatsTable::default();
    }

    let has_numeric = dataset.columns().iter().any(|c| c.dtype.is_numeric());
    let has_categorical = dataset.columns().iter().any(|c| !c.dtype.is_numeric());

    let mut statistics = vec![Statistic::Count];
    if has_categorical {
        statistics.extend(CATEGORICAL_STATS);
    }
    if has_numeric {
        statistics.extend(NUMERIC_STATS);
    }

    let per_column: Vec<HashMap<Statistic, StatCell>> = dataset
        .columns()
        .iter()
        .map(|c| {
            if c.dtype.is_numeric() {
                describe_numeric(c)
            } else {
                describe_categorical(c)
            }
        })
        .collect();

    let cells = statistics
        .iter()
        .map(|stat| {
            per_column
                .iter()
                .map(|col| col.get(stat).cloned().unwrap_or(StatCell::Missing))
                .collect()
        })
        .collect();

    StatsTable {
        statistics,
        columns: dataset.columns().iter().map(|c| c.name.clone()).collect(),
        cells,
    }
}

fn describe_numeric(col: &Column) -> HashMap<Statistic, StatCell> {
    use u_numflow::stats;

    let valid: Vec<f64> = col.values.iter().filter_map(Value::as_f64).collect();
    let stat = |v: Option<f64>| StatCell::number(v.unwrap_or(f64::NAN));

    HashMap::from([
        (Statistic::Count, StatCell::Count(valid.len())),
        (Statistic::Mean, stat(stats::mean(&valid))),
        // Sample standard deviation; undefined below two values.
        (Statistic::Std, stat(stats::std_dev(&valid))),
        (Statistic::Min, stat(stats::min(&valid))),
        (Statistic::Q25, stat(stats::quantile(&valid, 0.25))),
        (Statistic::Median, stat(stats::median(&valid))),
        (Statistic::Q75, stat(stats::quantile(&valid, 0.75))),
        (Statistic::Max, stat(stats::max(&valid))),
    ])
}

fn describe_categorical(col: &Column) -> HashMap<Statistic, StatCell> {
    // Frequency per value plus the index of its first appearance for tie-breaks.
    let mut counts: HashMap<&Value, (usize, usize)> = HashMap::new();
    let mut count = 0;
    for (i, v) in col.values.iter().enumerate() {
        if v.is_null() {
            continue;
        }
        count += 1;
        counts.entry(v).or_insert((0, i)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|(_, (fa, ia)), (_, (fb, ib))| fa.cmp(fb).then(ib.cmp(ia)))
        .map(|(v, (freq, _))| ((*v).clone(), *freq));

    let mut stats = HashMap::from([
        (Statistic::Count, StatCell::Count(count)),
        (Statistic::Unique, StatCell::Count(counts.len())),
    ]);
    if let Some((value, freq)) = top {
        stats.insert(Statistic::Top, StatCell::Label(value));
        stats.insert(Statistic::Freq, StatCell::Count(freq));
    }
    stats
}
