use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, ColumnType, Dataset, Value};
use crate::error::{LoadError, LoadResult};

/// Cell contents treated as missing in delimited text (compared after trimming).
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#NA", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

const TRUE_MARKERS: &[&str] = &["true", "True", "TRUE"];
const FALSE_MARKERS: &[&str] = &["false", "False", "FALSE"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Input formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    Json,
    Parquet,
}

impl Format {
    /// Pick the format from a file name or path.
    pub fn from_name(name: &str) -> LoadResult<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "tsv" | "tab" => Ok(Format::Tsv),
            "json" => Ok(Format::Json),
            "parquet" | "pq" => Ok(Format::Parquet),
            "" => Err(LoadError::UnsupportedFormat(format!(
                "'{name}' has no file extension"
            ))),
            other => Err(LoadError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – delimited text with a header row
/// * `.json`         – `[{ "col": value, ... }, ...]`
/// * `.parquet`      – flat schema of scalar columns
pub fn load_file(path: &Path) -> LoadResult<Dataset> {
    let format = Format::from_name(&path.to_string_lossy())?;
    log::debug!("loading {} as {format:?}", path.display());

    match format {
        Format::Csv => read_delimited(std::fs::File::open(path)?, b','),
        Format::Tsv => read_delimited(std::fs::File::open(path)?, b'\t'),
        Format::Json => read_json(std::fs::File::open(path)?),
        Format::Parquet => load_parquet(path),
    }
}

/// Load a dataset from an uploaded byte stream; `name` selects the format.
pub fn load_bytes(name: &str, bytes: &[u8]) -> LoadResult<Dataset> {
    match Format::from_name(name)? {
        Format::Csv => read_delimited(bytes, b','),
        Format::Tsv => read_delimited(bytes, b'\t'),
        Format::Json => read_json(bytes),
        Format::Parquet => Err(LoadError::UnsupportedFormat(
            "parquet uploads must be opened from a file path".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Read delimited text with a header row.
///
/// Every record must have as many fields as the header. Column types are
/// inferred once, from all values of each column.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> LoadResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(LoadError::Empty);
    }

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (col_idx, field) in record.iter().enumerate() {
            raw_columns[col_idx].push(field.trim().to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| build_text_column(name, &raw))
        .collect();

    Dataset::from_columns(columns)
}

fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_MARKERS.contains(&s) {
        Some(true)
    } else if FALSE_MARKERS.contains(&s) {
        Some(false)
    } else {
        None
    }
}

/// Decide the column type from all non-null raw cells.
///
/// Integer columns with holes become float, since an integer column cannot
/// represent a missing cell.
pub fn infer_column_type(raw: &[String]) -> ColumnType {
    let present: Vec<&str> = raw
        .iter()
        .map(String::as_str)
        .filter(|s| !is_null_marker(s))
        .collect();
    let has_nulls = present.len() < raw.len();

    if present.is_empty() {
        return ColumnType::Float;
    }
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return if has_nulls {
            ColumnType::Float
        } else {
            ColumnType::Integer
        };
    }
    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if present.iter().all(|s| parse_bool(s).is_some()) {
        return ColumnType::Boolean;
    }
    ColumnType::Text
}

fn build_text_column(name: String, raw: &[String]) -> Column {
    let dtype = infer_column_type(raw);
    let values = raw
        .iter()
        .map(|s| {
            if is_null_marker(s) {
                return Value::Null;
            }
            match dtype {
                ColumnType::Integer => s.parse().map(Value::Integer).unwrap_or(Value::Null),
                ColumnType::Float => s
                    .parse::<f64>()
                    .ok()
                    .filter(|f| !f.is_nan())
                    .map(Value::Float)
                    .unwrap_or(Value::Null),
                ColumnType::Boolean => parse_bool(s).map(Value::Bool).unwrap_or(Value::Null),
                ColumnType::Text => Value::Text(s.clone()),
            }
        })
        .collect();
    Column::new(name, dtype, values)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "cat", "age": 3, "weight": 4.2 },
///   { "species": "dog", "age": 5, "weight": null }
/// ]
/// ```
///
/// Column order follows the first appearance of each key. A key missing from
/// a record is a null cell.
pub fn read_json<R: Read>(reader: R) -> LoadResult<Dataset> {
    let root: JsonValue = serde_json::from_reader(reader)?;

    let records = root.as_array().ok_or_else(|| LoadError::Malformed {
        message: "expected a top-level JSON array of records".into(),
    })?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Malformed {
            message: format!("record {i} is not a JSON object"),
        })?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    if names.is_empty() {
        return Err(LoadError::Empty);
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let cells: Vec<&JsonValue> = records
                .iter()
                .map(|rec| rec.get(&name).unwrap_or(&JsonValue::Null))
                .collect();
            build_json_column(name, &cells)
        })
        .collect();

    Dataset::from_columns(columns)
}

fn build_json_column(name: String, cells: &[&JsonValue]) -> Column {
    let present: Vec<&JsonValue> = cells.iter().copied().filter(|v| !v.is_null()).collect();
    let has_nulls = present.len() < cells.len();

    let dtype = if present.is_empty() {
        ColumnType::Float
    } else if present.iter().all(|v| v.is_i64()) {
        if has_nulls {
            ColumnType::Float
        } else {
            ColumnType::Integer
        }
    } else if present.iter().all(|v| v.is_number()) {
        ColumnType::Float
    } else if present.iter().all(|v| v.is_boolean()) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    };

    let values = cells
        .iter()
        .map(|v| match (dtype, v) {
            (_, JsonValue::Null) => Value::Null,
            (ColumnType::Integer, v) => v.as_i64().map(Value::Integer).unwrap_or(Value::Null),
            (ColumnType::Float, v) => v.as_f64().map(Value::Float).unwrap_or(Value::Null),
            (ColumnType::Boolean, v) => v.as_bool().map(Value::Bool).unwrap_or(Value::Null),
            (ColumnType::Text, JsonValue::String(s)) => Value::Text(s.clone()),
            (ColumnType::Text, other) => Value::Text(other.to_string()),
        })
        .collect();

    Column::new(name, dtype, values)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with a flat schema.
///
/// Column types come from the Arrow schema: integer types map to `Integer`,
/// floating types and decimals to `Float`, `Boolean` to `Boolean`; everything
/// else is rendered to text.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> LoadResult<Dataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    if schema.fields().is_empty() {
        return Err(LoadError::Empty);
    }

    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), arrow_column_type(f.data_type()), Vec::new()))
        .collect();

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            append_arrow_values(column, array)?;
        }
    }

    // An integer column with nulls cannot stay integer.
    for column in &mut columns {
        if column.dtype == ColumnType::Integer && column.values.iter().any(Value::is_null) {
            column.dtype = ColumnType::Float;
            for v in &mut column.values {
                if let Value::Integer(i) = v {
                    *v = Value::Float(*i as f64);
                }
            }
        }
    }

    Dataset::from_columns(columns)
}

fn arrow_column_type(dt: &DataType) -> ColumnType {
    match dt {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => ColumnType::Integer,
        DataType::UInt64
        | DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => ColumnType::Float,
        DataType::Boolean => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

// -- Arrow helpers --

/// Append all rows of `array` to `column`, converting by the column's type.
fn append_arrow_values(column: &mut Column, array: &Arc<dyn Array>) -> LoadResult<()> {
    match column.dtype {
        ColumnType::Integer => {
            let ints = cast(array, &DataType::Int64)?;
            let ints = ints.as_primitive::<Int64Type>();
            column.values.extend(
                ints.iter()
                    .map(|v| v.map(Value::Integer).unwrap_or(Value::Null)),
            );
        }
        ColumnType::Float => {
            let floats = cast(array, &DataType::Float64)?;
            let floats = floats.as_primitive::<Float64Type>();
            column.values.extend(floats.iter().map(|v| match v {
                Some(f) if !f.is_nan() => Value::Float(f),
                _ => Value::Null,
            }));
        }
        ColumnType::Boolean => {
            let bools = array.as_boolean();
            column
                .values
                .extend(bools.iter().map(|v| v.map(Value::Bool).unwrap_or(Value::Null)));
        }
        ColumnType::Text => {
            let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
            for row in 0..array.len() {
                if array.is_null(row) {
                    column.values.push(Value::Null);
                } else {
                    column
                        .values
                        .push(Value::Text(formatter.value(row).to_string()));
                }
            }
        }
    }
    Ok(())
}
