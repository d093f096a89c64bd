use std::collections::HashMap;

use anyhow::{Result, bail};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    dataset::{Column, Table, ValueKind},
    wordcloud::{self, WordCloud, WordCloudError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub column: String,
    /// Non-missing values in the column.
    pub total: usize,
    pub frequencies: Vec<FrequencyEntry>,
    pub corpus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_cloud: Option<WordCloud>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WordCloudError>,
}

/// Counts each distinct non-missing value, most frequent first. Equal counts
/// keep the order in which values first appear.
pub fn value_counts(column: &Column) -> Vec<FrequencyEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in column.non_missing() {
        let key = value.as_display();
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .map(|value| {
            let count = counts.get(&value).copied().unwrap_or_default();
            FrequencyEntry { value, count }
        })
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .collect()
}

/// Non-missing values joined by single spaces in row order.
pub fn corpus(column: &Column) -> String {
    column.non_missing().map(|value| value.as_display()).join(" ")
}

pub fn summarize_text(table: &Table, column_name: &str) -> Result<TextSummary> {
    let column = table.column(column_name)?;
    if column.kind() != ValueKind::Text {
        bail!(
            "Column '{}' is {} and cannot be summarised as text",
            column_name,
            column.kind().as_str()
        );
    }

    let frequencies = value_counts(column);
    let corpus = corpus(column);
    let (word_cloud, warning) = match wordcloud::generate(&corpus) {
        Ok(cloud) => (Some(cloud), None),
        Err(reason) => (None, Some(reason)),
    };

    Ok(TextSummary {
        column: column_name.to_string(),
        total: column.non_missing_count(),
        frequencies,
        corpus,
        word_cloud,
        warning,
    })
}
