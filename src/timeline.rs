use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::{Table, ValueKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalSummary {
    pub column: String,
    /// Ascending by date.
    pub counts: Vec<DateCount>,
    /// Non-missing values that could not be read as a date.
    pub unparsed: usize,
}

/// Counts events per calendar day, discarding time of day.
pub fn summarize_temporal(table: &Table, column_name: &str) -> Result<TemporalSummary> {
    let column = table.column(column_name)?;
    if column.kind() != ValueKind::Temporal {
        bail!(
            "Column '{}' is {} and cannot be summarised by date",
            column_name,
            column.kind().as_str()
        );
    }

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut unparsed = 0usize;
    for value in column.non_missing() {
        match value.as_date() {
            Some(date) => *per_day.entry(date).or_insert(0) += 1,
            None => unparsed += 1,
        }
    }

    Ok(TemporalSummary {
        column: column_name.to_string(),
        counts: per_day
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect(),
        unparsed,
    })
}
