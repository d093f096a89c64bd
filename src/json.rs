//! JSON uploads.
//!
//! Three layouts are accepted:
//!
//! - an array of record objects: `[{"a": 1, "b": "x"}, ...]`
//! - an object of column arrays: `{"a": [1, 2], "b": ["x", "y"]}`
//! - an object of column objects keyed by row label:
//!   `{"a": {"0": 1, "1": 2}, "b": {"0": "x", "1": "y"}}`
//!
//! An array of bare scalars becomes a single column named `0`.

use std::collections::HashMap;

use encoding_rs::Encoding;
use serde_json::{Map, Value as JsonValue};

use crate::{
    data::Value,
    dataset::{Column, Table, ValueKind, unique_headers},
    format::FileFormat,
    inference, io_utils,
    loader::LoadError,
};

pub fn load_json(bytes: &[u8], encoding: &'static Encoding) -> Result<Table, LoadError> {
    let text = io_utils::decode_bytes(bytes, encoding)
        .map_err(|err| LoadError::parse(FileFormat::Json, err))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|err| LoadError::parse(FileFormat::Json, err))?;

    let raw = match root {
        JsonValue::Array(rows) => from_records(rows)?,
        JsonValue::Object(columns) => from_columns(columns)?,
        _ => {
            return Err(LoadError::parse(
                FileFormat::Json,
                "Expected an array of records or an object of columns",
            ));
        }
    };
    build_table(raw)
}

struct RawColumns {
    names: Vec<String>,
    cells: Vec<Vec<Option<JsonValue>>>,
}

fn from_records(rows: Vec<JsonValue>) -> Result<RawColumns, LoadError> {
    if !rows.is_empty() && rows.iter().all(|row| !row.is_object() && !row.is_array()) {
        return Ok(RawColumns {
            names: vec!["0".to_string()],
            cells: vec![rows.into_iter().map(Some).collect()],
        });
    }

    let mut names: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut cells: Vec<Vec<Option<JsonValue>>> = Vec::new();
    let row_total = rows.len();

    for (row_idx, row) in rows.into_iter().enumerate() {
        let JsonValue::Object(record) = row else {
            return Err(LoadError::parse(
                FileFormat::Json,
                format!("Record {} is not an object", row_idx + 1),
            ));
        };
        for (key, value) in record {
            let column_idx = *positions.entry(key.clone()).or_insert_with(|| {
                names.push(key);
                cells.push(vec![None; row_total]);
                cells.len() - 1
            });
            cells[column_idx][row_idx] = Some(value);
        }
    }
    Ok(RawColumns { names, cells })
}

fn from_columns(columns: Map<String, JsonValue>) -> Result<RawColumns, LoadError> {
    if columns.values().all(JsonValue::is_array) {
        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        let mut expected_len: Option<usize> = None;
        for (name, values) in columns {
            let JsonValue::Array(values) = values else {
                continue;
            };
            let len = *expected_len.get_or_insert(values.len());
            if values.len() != len {
                return Err(LoadError::parse(
                    FileFormat::Json,
                    "All column arrays must be of the same length",
                ));
            }
            names.push(name);
            cells.push(values.into_iter().map(Some).collect());
        }
        return Ok(RawColumns { names, cells });
    }

    if columns.values().all(JsonValue::is_object) {
        let mut labels: Vec<String> = Vec::new();
        let mut label_positions: HashMap<String, usize> = HashMap::new();
        for column in columns.values() {
            if let JsonValue::Object(entries) = column {
                for label in entries.keys() {
                    if !label_positions.contains_key(label) {
                        label_positions.insert(label.clone(), labels.len());
                        labels.push(label.clone());
                    }
                }
            }
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            let JsonValue::Object(entries) = column else {
                continue;
            };
            let mut values = vec![None; labels.len()];
            for (label, value) in entries {
                if let Some(&position) = label_positions.get(&label) {
                    values[position] = Some(value);
                }
            }
            names.push(name);
            cells.push(values);
        }
        return Ok(RawColumns { names, cells });
    }

    Err(LoadError::parse(
        FileFormat::Json,
        "Column values must all be arrays or all be objects keyed by row label",
    ))
}

fn build_table(raw: RawColumns) -> Result<Table, LoadError> {
    let names = unique_headers(raw.names);
    let columns = names
        .into_iter()
        .zip(raw.cells)
        .map(|(name, cells)| build_column(name, cells))
        .collect();
    Ok(Table::new(columns)?)
}

fn build_column(name: String, cells: Vec<Option<JsonValue>>) -> Column {
    let mut nested = false;
    let values: Vec<Option<Value>> = cells
        .into_iter()
        .map(|cell| match cell {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Bool(b)) => Some(Value::Boolean(b)),
            Some(JsonValue::Number(n)) => match n.as_i64() {
                Some(i) => Some(Value::Integer(i)),
                None => n.as_f64().map(Value::Float),
            },
            Some(JsonValue::String(s)) => Some(Value::Text(s)),
            Some(other @ (JsonValue::Array(_) | JsonValue::Object(_))) => {
                nested = true;
                Some(Value::Text(other.to_string()))
            }
        })
        .collect();

    if nested {
        return Column::new(name, ValueKind::Mixed, values);
    }
    match inference::settle_kind(&values) {
        ValueKind::Text => match inference::promote_temporal_text(&values) {
            Some(promoted) => Column::new(name, ValueKind::Temporal, promoted),
            None => Column::new(name, ValueKind::Text, values),
        },
        kind => Column::new(name, kind, values),
    }
}
