//! Per-invocation analysis session.
//!
//! A [`Session`] owns the loaded [`Table`] and the user's [`Selections`].
//! [`Session::derive`] recomputes every artifact from the original table each
//! time it is called, so changing a selection never sees stale results.

use std::{borrow::Cow, fmt};

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::{
    classify::{ColumnGroups, classify},
    crosstab::{CrossTabView, cross_tab},
    dataset::Table,
    frequency::{TextSummary, summarize_text},
    stats::{NumericSummary, summarize_numeric},
    timeline::{TemporalSummary, summarize_temporal},
    wordcloud::WordCloudError,
};

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    /// Columns to analyse, in display order; `None` keeps all of them.
    pub columns: Option<Vec<String>>,
    /// Numeric side of the cross-tab; defaults to the first numeric column.
    pub numeric: Option<String>,
    /// Text side of the cross-tab; defaults to the first text column.
    pub text: Option<String>,
    pub preview_rows: usize,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            columns: None,
            numeric: None,
            text: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    WordCloud {
        column: String,
        reason: WordCloudError,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::WordCloud { column, reason } => write!(f, "{column}: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Preview {
    pub fn of(table: &Table, rows: usize) -> Self {
        Self {
            headers: table.column_names(),
            rows: table.head(rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub row_count: usize,
    pub column_count: usize,
    pub preview: Preview,
    pub groups: ColumnGroups,
    pub numeric: Option<NumericSummary>,
    pub text: Vec<TextSummary>,
    pub temporal: Vec<TemporalSummary>,
    pub cross_tab: Option<CrossTabView>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    selections: Selections,
}

impl Session {
    pub fn new(table: Table, selections: Selections) -> Self {
        Self { table, selections }
    }

    /// Runs projection, classification and every generator over the table.
    pub fn derive(&self) -> Result<Dashboard> {
        let table: Cow<'_, Table> = match &self.selections.columns {
            Some(columns) => Cow::Owned(
                self.table
                    .select(columns)
                    .context("Selecting columns to display")?,
            ),
            None => Cow::Borrowed(&self.table),
        };

        let groups = classify(&table);
        debug!(
            "Column groups: {} numeric, {} text, {} temporal",
            groups.numeric.len(),
            groups.text.len(),
            groups.temporal.len()
        );

        let numeric = if groups.numeric.is_empty() {
            None
        } else {
            Some(summarize_numeric(&table, &groups.numeric)?)
        };

        let mut warnings = Vec::new();
        let mut text = Vec::with_capacity(groups.text.len());
        for column in &groups.text {
            let summary = summarize_text(&table, column)?;
            if let Some(reason) = summary.warning {
                warnings.push(Warning::WordCloud {
                    column: column.clone(),
                    reason,
                });
            }
            text.push(summary);
        }

        let temporal = groups
            .temporal
            .iter()
            .map(|column| summarize_temporal(&table, column))
            .collect::<Result<Vec<_>>>()?;

        let cross_tab = match (groups.numeric.first(), groups.text.first()) {
            (Some(first_numeric), Some(first_text)) => {
                let numeric_col = self.selections.numeric.as_ref().unwrap_or(first_numeric);
                let text_col = self.selections.text.as_ref().unwrap_or(first_text);
                Some(cross_tab(&table, numeric_col, text_col)?)
            }
            _ => None,
        };

        Ok(Dashboard {
            row_count: table.row_count(),
            column_count: table.column_count(),
            preview: Preview::of(&table, self.selections.preview_rows),
            groups,
            numeric,
            text,
            temporal,
            cross_tab,
            warnings,
        })
    }
}
