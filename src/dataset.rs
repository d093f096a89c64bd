//! In-memory tabular dataset produced by the loaders.
//!
//! A [`Table`] is an ordered set of uniquely named [`Column`]s that all hold
//! the same number of rows. Each column carries the [`ValueKind`] decided once
//! at load time; downstream generators trust that kind and never re-inspect
//! the raw input.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::data::Value;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("Column '{name}' has {actual} row(s) but the table has {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Column '{0}' not found")]
    UnknownColumn(String),
}

/// Element kind inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Temporal,
    Boolean,
    /// Values of more than one kind.
    Mixed,
    /// No non-missing values at all.
    Empty,
}

impl ValueKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Temporal => "temporal",
            ValueKind::Boolean => "boolean",
            ValueKind::Mixed => "mixed",
            ValueKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ValueKind,
    values: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: String, kind: ValueKind, values: Vec<Option<Value>>) -> Self {
        Self { name, kind, values }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub fn non_missing(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().flatten()
    }

    pub fn non_missing_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Numeric view of the column; non-numeric cells read as missing.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values
            .iter()
            .map(|value| value.as_ref().and_then(Value::as_f64))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != row_count {
                return Err(TableError::RaggedColumn {
                    name: column.name.clone(),
                    expected: row_count,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// New table restricted to `names`, in the order given.
    pub fn select(&self, names: &[String]) -> Result<Table, TableError> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Table::new(columns)
    }

    /// First `rows` rows rendered as display strings; missing cells are empty.
    pub fn head(&self, rows: usize) -> Vec<Vec<String>> {
        (0..self.row_count.min(rows))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| {
                        column.values[row]
                            .as_ref()
                            .map(Value::as_display)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

/// Makes raw header names unique: blanks become `Unnamed: {index}` and
/// repeats gain `.1`, `.2`, ... suffixes in order of appearance.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}
