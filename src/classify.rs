use serde::Serialize;

use crate::dataset::{Table, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroup {
    Numeric,
    Text,
    Temporal,
}

impl ColumnGroup {
    /// Group a column of `kind` belongs to; booleans, mixed and empty
    /// columns belong to none.
    pub fn of(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::Integer | ValueKind::Float => Some(ColumnGroup::Numeric),
            ValueKind::Text => Some(ColumnGroup::Text),
            ValueKind::Temporal => Some(ColumnGroup::Temporal),
            ValueKind::Boolean | ValueKind::Mixed | ValueKind::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnGroups {
    pub numeric: Vec<String>,
    pub text: Vec<String>,
    pub temporal: Vec<String>,
}

/// Partitions the table's columns by their load-time kind, keeping table order.
pub fn classify(table: &Table) -> ColumnGroups {
    let mut groups = ColumnGroups::default();
    for column in table.columns() {
        let target = match ColumnGroup::of(column.kind()) {
            Some(ColumnGroup::Numeric) => &mut groups.numeric,
            Some(ColumnGroup::Text) => &mut groups.text,
            Some(ColumnGroup::Temporal) => &mut groups.temporal,
            None => continue,
        };
        target.push(column.name().to_string());
    }
    groups
}
