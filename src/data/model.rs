use std::collections::HashMap;
use std::fmt;

use crate::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a key in `BTreeMap` / `HashMap` downstream, so `Value` must be `Ord` and `Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

// -- Manual Eq/Ord so we can put Value in ordered collections --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64`; `None` for non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred once at load time
// ---------------------------------------------------------------------------

/// The type of a column, fixed when the dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    /// Integer and float columns take part in correlation, scaling and PCA.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Display name in the dtype vocabulary data analysts expect.
    pub fn dtype_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype_name())
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// One named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Cells as `f64`, with NaN for nulls and non-numeric cells.
    pub fn to_f64(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table, stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Assemble a dataset from columns of equal length.
    ///
    /// Repeated column names are made unique by suffixing `.1`, `.2`, ...
    pub fn from_columns(mut columns: Vec<Column>) -> LoadResult<Self> {
        if columns.is_empty() {
            return Err(LoadError::Empty);
        }
        let n_rows = columns[0].len();
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(LoadError::Malformed {
                message: format!(
                    "column '{}' has {} values, expected {n_rows}",
                    bad.name,
                    bad.len()
                ),
            });
        }
        dedup_names(&mut columns);
        Ok(Self { columns, n_rows })
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Row `i` as an ordered list of `(column, value)` pairs.
    pub fn row(&self, i: usize) -> Option<Vec<(&str, &Value)>> {
        if i >= self.n_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.as_str(), &c.values[i]))
                .collect(),
        )
    }

    /// The first `n` rows as a new dataset.
    pub fn head(&self, n: usize) -> Dataset {
        let n = n.min(self.n_rows);
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.dtype, c.values[..n].to_vec()))
                .collect(),
            n_rows: n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }
}

fn dedup_names(columns: &mut [Column]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for col in columns.iter_mut() {
        let Some(mut count) = seen.get(&col.name).copied() else {
            seen.insert(col.name.clone(), 1);
            continue;
        };
        let base = col.name.clone();
        let mut candidate = format!("{base}.{count}");
        while seen.contains_key(&candidate) {
            count += 1;
            candidate = format!("{base}.{count}");
        }
        seen.insert(base, count + 1);
        seen.insert(candidate.clone(), 1);
        col.name = candidate;
    }
}
