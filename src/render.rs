//! Presentation of derived artifacts.
//!
//! Renderers only format what the pipeline computed; they never touch the
//! table. The text renderer lays every section out as aligned tables, the
//! JSON renderer serialises the artifacts as-is (`NaN` becomes `null`).

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    classify::ColumnGroups,
    cli::OutputMode,
    crosstab::CrossTabView,
    frequency::TextSummary,
    session::{Dashboard, Preview},
    stats::NumericSummary,
    table::TextTable,
    timeline::TemporalSummary,
};

/// Word weights listed per text column in text output.
const WORD_CLOUD_ROWS: usize = 20;

pub trait Renderer {
    fn render(&self, dashboard: &Dashboard) -> Result<String>;
    fn render_preview(&self, preview: &Preview) -> Result<String>;
    fn render_groups(&self, groups: &ColumnGroups) -> Result<String>;
    fn render_cross_tab(&self, view: &CrossTabView) -> Result<String>;
}

pub fn renderer_for(mode: OutputMode) -> Box<dyn Renderer> {
    match mode {
        OutputMode::Text => Box::new(TextRenderer),
        OutputMode::Json => Box::new(JsonRenderer),
    }
}

pub struct JsonRenderer;

impl JsonRenderer {
    fn to_json<T: Serialize>(value: &T) -> Result<String> {
        let mut json = serde_json::to_string_pretty(value).context("Serialising output")?;
        json.push('\n');
        Ok(json)
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, dashboard: &Dashboard) -> Result<String> {
        Self::to_json(dashboard)
    }

    fn render_preview(&self, preview: &Preview) -> Result<String> {
        Self::to_json(preview)
    }

    fn render_groups(&self, groups: &ColumnGroups) -> Result<String> {
        Self::to_json(groups)
    }

    fn render_cross_tab(&self, view: &CrossTabView) -> Result<String> {
        Self::to_json(view)
    }
}

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, dashboard: &Dashboard) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Dataset: {} row(s) x {} column(s)\n",
            dashboard.row_count, dashboard.column_count
        );
        section(&mut out, "Preview", &preview_table(&dashboard.preview));
        section(&mut out, "Column groups", &groups_text(&dashboard.groups));

        if let Some(numeric) = &dashboard.numeric {
            section(&mut out, "Numeric summary", &describe_table(numeric));
            section(&mut out, "Correlation matrix", &correlation_table(numeric));
        }
        for summary in &dashboard.text {
            text_sections(&mut out, summary);
        }
        for summary in &dashboard.temporal {
            section(
                &mut out,
                &format!("Events per day: {}", summary.column),
                &timeline_table(summary),
            );
        }
        if let Some(view) = &dashboard.cross_tab {
            section(&mut out, &cross_tab_title(view), &cross_tab_table(view));
        }
        for warning in &dashboard.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
        Ok(out)
    }

    fn render_preview(&self, preview: &Preview) -> Result<String> {
        Ok(preview_table(preview))
    }

    fn render_groups(&self, groups: &ColumnGroups) -> Result<String> {
        Ok(groups_text(groups))
    }

    fn render_cross_tab(&self, view: &CrossTabView) -> Result<String> {
        let mut out = String::new();
        section(&mut out, &cross_tab_title(view), &cross_tab_table(view));
        Ok(out)
    }
}

fn section(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    out.push_str(body);
    out.push('\n');
}

/// Fixed four-decimal rendering with trailing zeros removed; `NaN` stays
/// visible.
pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn preview_table(preview: &Preview) -> String {
    let mut table = TextTable::new(preview.headers.iter().cloned());
    for row in &preview.rows {
        table.push_row(row.clone());
    }
    table.render()
}

fn groups_text(groups: &ColumnGroups) -> String {
    let list = |names: &[String]| {
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    };
    format!(
        "numeric: {}\ntext: {}\ntemporal: {}\n",
        list(&groups.numeric),
        list(&groups.text),
        list(&groups.temporal)
    )
}

fn describe_table(summary: &NumericSummary) -> String {
    let mut table = TextTable::new([
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ])
    .right_align_from(1);
    for stats in &summary.columns {
        table.push_row(vec![
            stats.column.clone(),
            stats.count.to_string(),
            format_stat(stats.mean),
            format_stat(stats.std),
            format_stat(stats.min),
            format_stat(stats.q25),
            format_stat(stats.median),
            format_stat(stats.q75),
            format_stat(stats.max),
        ]);
    }
    table.render()
}

fn correlation_table(summary: &NumericSummary) -> String {
    let matrix = &summary.correlation;
    let headers = std::iter::once(String::new()).chain(matrix.columns.iter().cloned());
    let mut table = TextTable::new(headers).right_align_from(1);
    for (idx, name) in matrix.columns.iter().enumerate() {
        let mut row = vec![name.clone()];
        row.extend((0..matrix.size()).map(|col| format_stat(matrix.get(idx, col))));
        table.push_row(row);
    }
    table.render()
}

fn text_sections(out: &mut String, summary: &TextSummary) {
    let mut frequencies = TextTable::new(["value", "count"]).right_align_from(1);
    for entry in &summary.frequencies {
        frequencies.push_row(vec![entry.value.clone(), entry.count.to_string()]);
    }
    section(
        out,
        &format!("Frequencies: {}", summary.column),
        &frequencies.render(),
    );

    if let Some(cloud) = &summary.word_cloud {
        let mut words = TextTable::new(["word", "count", "weight"]).right_align_from(1);
        for entry in cloud.words.iter().take(WORD_CLOUD_ROWS) {
            words.push_row(vec![
                entry.word.clone(),
                entry.count.to_string(),
                format_stat(entry.weight),
            ]);
        }
        section(
            out,
            &format!("Word cloud: {}", summary.column),
            &words.render(),
        );
    }
}

fn timeline_table(summary: &TemporalSummary) -> String {
    let mut table = TextTable::new(["date", "count"]).right_align_from(1);
    for entry in &summary.counts {
        table.push_row(vec![
            entry.date.format("%Y-%m-%d").to_string(),
            entry.count.to_string(),
        ]);
    }
    let mut rendered = table.render();
    if summary.unparsed > 0 {
        let _ = writeln!(
            rendered,
            "({} value(s) could not be read as dates)",
            summary.unparsed
        );
    }
    rendered
}

fn cross_tab_title(view: &CrossTabView) -> String {
    format!("Cross-tab: {} x {}", view.text_column, view.numeric_column)
}

fn cross_tab_table(view: &CrossTabView) -> String {
    let headers = std::iter::once(view.text_column.clone())
        .chain(view.numeric_values.iter().map(|value| value.as_display()));
    let mut table = TextTable::new(headers).right_align_from(1);
    for (category, counts) in view.categories.iter().zip(&view.counts) {
        let mut row = vec![category.clone()];
        row.extend(counts.iter().map(usize::to_string));
        table.push_row(row);
    }
    let mut rendered = table.render();
    if view.dropped_missing > 0 {
        let _ = writeln!(
            rendered,
            "({} row(s) without a {} value left out)",
            view.dropped_missing, view.numeric_column
        );
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        loader::{LoadOptions, load},
        session::{Selections, Session},
    };

    fn dashboard() -> Dashboard {
        let table = load(
            b"name,age\nAlice,30\nBob,25\nAlice,40\n",
            "csv",
            &LoadOptions::default(),
        )
        .unwrap();
        Session::new(table, Selections::default()).derive().unwrap()
    }

    #[test]
    fn format_stat_trims_and_keeps_nan_visible() {
        assert_eq!(format_stat(95.0 / 3.0), "31.6667");
        assert_eq!(format_stat(25.0), "25");
        assert_eq!(format_stat(0.5), "0.5");
        assert_eq!(format_stat(f64::NAN), "NaN");
        assert_eq!(format_stat(-0.00001), "0");
    }

    #[test]
    fn text_report_contains_every_section() {
        let rendered = TextRenderer.render(&dashboard()).unwrap();
        assert!(rendered.starts_with("Dataset: 3 row(s) x 2 column(s)"));
        assert!(rendered.contains("Numeric summary"));
        assert!(rendered.contains("31.6667"));
        assert!(rendered.contains("Frequencies: name"));
        assert!(rendered.contains("Word cloud: name"));
        assert!(rendered.contains("Cross-tab: name x age"));
        assert!(!rendered.contains("warning:"));
    }

    #[test]
    fn json_report_serialises_nan_as_null() {
        let table = load(b"n,label\n4,x\n", "csv", &LoadOptions::default()).unwrap();
        let dashboard = Session::new(table, Selections::default()).derive().unwrap();
        let rendered = JsonRenderer.render(&dashboard).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(parsed["numeric"]["columns"][0]["std"].is_null());
        assert_eq!(parsed["numeric"]["columns"][0]["count"], 1);
        assert_eq!(parsed["groups"]["text"][0], "label");
    }
}
