use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{
    classify::ColumnGroup,
    cli::CrosstabArgs,
    data::Value,
    dataset::{Column, Table},
    frequency::value_counts,
    render, upload,
};

/// Most frequent text values kept as rows of the contingency table.
pub const TOP_CATEGORIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabView {
    pub numeric_column: String,
    pub text_column: String,
    /// Kept text values, ascending.
    pub categories: Vec<String>,
    /// Distinct numeric values seen in the restricted rows, ascending.
    pub numeric_values: Vec<Value>,
    /// `counts[category][numeric value]`.
    pub counts: Vec<Vec<usize>>,
    /// Rows whose text value is one of the kept categories.
    pub restricted_rows: usize,
    /// Restricted rows left out because their numeric cell is missing.
    pub dropped_missing: usize,
}

impl CrossTabView {
    pub fn count(&self, category: &str, numeric: f64) -> usize {
        let Some(row) = self.categories.iter().position(|c| c == category) else {
            return 0;
        };
        self.numeric_values
            .iter()
            .position(|value| value.as_f64() == Some(numeric))
            .and_then(|col| self.counts[row].get(col).copied())
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

fn grouped_column<'a>(table: &'a Table, name: &str, group: ColumnGroup) -> Result<&'a Column> {
    let column = table.column(name)?;
    if ColumnGroup::of(column.kind()) != Some(group) {
        let wanted = match group {
            ColumnGroup::Numeric => "numeric",
            ColumnGroup::Text => "text",
            ColumnGroup::Temporal => "temporal",
        };
        bail!(
            "Column '{}' is {}, not a {} column",
            name,
            column.kind().as_str(),
            wanted
        );
    }
    Ok(column)
}

/// Column key of a numeric cell. NaN has no column and `-0.0` shares the
/// column of `0.0`.
fn axis_key(value: &Value) -> Option<f64> {
    let key = value.as_f64().filter(|v| !v.is_nan())?;
    Some(if key == 0.0 { 0.0 } else { key })
}

/// Counts co-occurrences of the ten most frequent values of `text_col` with
/// each distinct value of `numeric_col`.
pub fn cross_tab(table: &Table, numeric_col: &str, text_col: &str) -> Result<CrossTabView> {
    let numeric = grouped_column(table, numeric_col, ColumnGroup::Numeric)?;
    let text = grouped_column(table, text_col, ColumnGroup::Text)?;

    let mut categories: Vec<String> = value_counts(text)
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|entry| entry.value)
        .collect();
    categories.sort();
    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let mut restricted_rows = 0usize;
    let mut dropped_missing = 0usize;
    let mut pairs: Vec<(usize, f64, &Value)> = Vec::new();
    for (text_value, numeric_value) in text.values().iter().zip(numeric.values()) {
        let Some(text_value) = text_value else {
            continue;
        };
        let Some(&row) = category_index.get(text_value.as_display().as_str()) else {
            continue;
        };
        restricted_rows += 1;
        match numeric_value
            .as_ref()
            .and_then(|value| axis_key(value).map(|key| (key, value)))
        {
            Some((key, value)) => pairs.push((row, key, value)),
            None => dropped_missing += 1,
        }
    }

    // Stable sort, so each column keeps the first value seen for its key.
    let axis: Vec<(f64, &Value)> = pairs
        .iter()
        .map(|&(_, key, value)| (key, value))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .dedup_by(|a, b| a.0 == b.0)
        .collect();
    let keys: Vec<f64> = axis.iter().map(|(key, _)| *key).collect();
    let numeric_values: Vec<Value> = axis.into_iter().map(|(_, value)| value.clone()).collect();

    let mut counts = vec![vec![0usize; numeric_values.len()]; categories.len()];
    for (row, key, _) in pairs {
        if let Ok(col) = keys.binary_search_by(|seen| seen.total_cmp(&key)) {
            counts[row][col] += 1;
        }
    }

    Ok(CrossTabView {
        numeric_column: numeric_col.to_string(),
        text_column: text_col.to_string(),
        categories,
        numeric_values,
        counts,
        restricted_rows,
        dropped_missing,
    })
}

pub fn execute(args: &CrosstabArgs) -> Result<()> {
    let Some(upload) = upload::open(&args.input)? else {
        return Ok(());
    };
    let view = cross_tab(&upload.table, &args.numeric, &args.text).with_context(|| {
        format!(
            "Cross-tabulating '{}' against '{}'",
            args.text, args.numeric
        )
    })?;
    info!(
        "Cross-tabulated {} categor(ies) against {} numeric value(s)",
        view.categories.len(),
        view.numeric_values.len()
    );
    let rendered = render::renderer_for(args.output).render_cross_tab(&view)?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValueKind;

    fn table(texts: &[Option<&str>], numbers: &[Option<i64>]) -> Table {
        Table::new(vec![
            Column::new(
                "name".into(),
                ValueKind::Text,
                texts
                    .iter()
                    .map(|v| v.map(|s| Value::Text(s.into())))
                    .collect(),
            ),
            Column::new(
                "age".into(),
                ValueKind::Integer,
                numbers.iter().map(|v| v.map(Value::Integer)).collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn counts_pairs_with_sorted_axes() {
        let table = table(
            &[Some("Bob"), Some("Alice"), Some("Alice")],
            &[Some(25), Some(40), Some(30)],
        );
        let view = cross_tab(&table, "age", "name").unwrap();
        assert_eq!(view.categories, vec!["Alice", "Bob"]);
        assert_eq!(
            view.numeric_values,
            vec![Value::Integer(25), Value::Integer(30), Value::Integer(40)]
        );
        assert_eq!(view.counts, vec![vec![0, 1, 1], vec![1, 0, 0]]);
        assert_eq!(view.count("Alice", 30.0), 1);
        assert_eq!(view.total(), 3);
    }

    #[test]
    fn keeps_only_the_ten_most_frequent_categories() {
        let mut texts = Vec::new();
        let mut numbers = Vec::new();
        for idx in 0..12 {
            let label = format!("c{idx:02}");
            let repeats = if idx < 10 { 2 } else { 1 };
            for _ in 0..repeats {
                texts.push(label.clone());
                numbers.push(Some(idx));
            }
        }
        let refs: Vec<Option<&str>> = texts.iter().map(|s| Some(s.as_str())).collect();
        let view = cross_tab(&table(&refs, &numbers), "age", "name").unwrap();
        assert_eq!(view.categories.len(), TOP_CATEGORIES);
        assert!(!view.categories.contains(&"c10".to_string()));
        assert_eq!(view.restricted_rows, 20);
    }

    #[test]
    fn missing_numeric_cells_are_dropped_and_counted() {
        let table = table(
            &[Some("a"), Some("a"), None, Some("b")],
            &[Some(1), None, Some(2), None],
        );
        let view = cross_tab(&table, "age", "name").unwrap();
        assert_eq!(view.restricted_rows, 3);
        assert_eq!(view.dropped_missing, 2);
        assert_eq!(view.total(), 1);
        assert_eq!(view.categories, vec!["a", "b"]);
        assert_eq!(view.counts[1], vec![0]);
    }

    fn float_table(rows: &[(&str, f64)]) -> Table {
        Table::new(vec![
            Column::new(
                "label".into(),
                ValueKind::Text,
                rows.iter().map(|(t, _)| Some(Value::Text((*t).into()))).collect(),
            ),
            Column::new(
                "reading".into(),
                ValueKind::Float,
                rows.iter().map(|(_, v)| Some(Value::Float(*v))).collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn continuous_columns_get_one_sorted_column_per_value() {
        let labels = ["a", "b", "c"];
        let rows: Vec<(&str, f64)> = (0..30_000)
            .rev()
            .map(|i| (labels[i % 3], i as f64 + 0.5))
            .collect();
        let view = cross_tab(&float_table(&rows), "reading", "label").unwrap();
        assert_eq!(view.numeric_values.len(), 30_000);
        assert!(
            view.numeric_values
                .windows(2)
                .all(|pair| pair[0].as_f64() < pair[1].as_f64())
        );
        assert_eq!(view.numeric_values[0], Value::Float(0.5));
        assert_eq!(view.total(), 30_000);
        assert!(view.counts.iter().all(|row| row.iter().sum::<usize>() == 10_000));
        assert_eq!(view.count("b", 1.5), 1);
        assert_eq!(view.count("a", 1.5), 0);
    }

    #[test]
    fn repeated_and_signed_zero_values_share_a_column() {
        let view = cross_tab(
            &float_table(&[("a", 2.0), ("a", -0.0), ("b", 0.0), ("b", 2.0), ("a", f64::NAN)]),
            "reading",
            "label",
        )
        .unwrap();
        assert_eq!(view.numeric_values, vec![Value::Float(-0.0), Value::Float(2.0)]);
        assert_eq!(view.counts, vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(view.dropped_missing, 1);
        assert_eq!(view.restricted_rows, 5);
    }

    #[test]
    fn columns_from_the_wrong_group_are_rejected() {
        let table = table(&[Some("a")], &[Some(1)]);
        let err = cross_tab(&table, "name", "age").unwrap_err();
        assert!(err.to_string().contains("not a numeric column"));
        assert!(cross_tab(&table, "age", "nope").is_err());
    }
}
