mod common;

use std::fs;

use data_insights::{
    classify::classify,
    dataset::ValueKind,
    crosstab::{TOP_CATEGORIES, cross_tab},
    frequency::summarize_text,
    loader::{LoadOptions, load},
    session::{Selections, Session, Warning},
    stats::summarize_numeric,
    timeline::summarize_temporal,
    wordcloud::WordCloudError,
};

use common::{PEOPLE_CSV, fixture_path};

fn load_csv(text: &str) -> data_insights::dataset::Table {
    load(text.as_bytes(), "csv", &LoadOptions::default()).expect("load csv")
}

#[test]
fn people_csv_end_to_end() {
    let dashboard = Session::new(load_csv(PEOPLE_CSV), Selections::default())
        .derive()
        .expect("derive dashboard");

    assert_eq!(dashboard.groups.numeric, vec!["age"]);
    assert_eq!(dashboard.groups.text, vec!["name"]);
    assert!(dashboard.groups.temporal.is_empty());

    let numeric = dashboard.numeric.expect("numeric summary");
    let age = numeric.stats_for("age").expect("age stats");
    assert_eq!(age.count, 3);
    assert!((age.mean - 31.67).abs() < 0.01);

    let name = &dashboard.text[0];
    let pairs: Vec<(&str, usize)> = name
        .frequencies
        .iter()
        .map(|entry| (entry.value.as_str(), entry.count))
        .collect();
    assert_eq!(pairs, vec![("Alice", 2), ("Bob", 1)]);
    assert_eq!(name.corpus, "Alice Bob Alice");
}

#[test]
fn missing_cells_only_affect_their_own_column() {
    let table = load_csv("a,b\n1,10\n,20\n3,30\n,40\n");
    let summary = summarize_numeric(&table, &["a".to_string(), "b".to_string()]).unwrap();
    let a = summary.stats_for("a").unwrap();
    let b = summary.stats_for("b").unwrap();
    assert_eq!(a.count, 2);
    assert_eq!(a.mean, 2.0);
    assert_eq!(b.count, 4);
    assert_eq!(b.mean, 25.0);
    // Correlation only uses the rows where both are present.
    assert!((summary.correlation.get(0, 1) - 1.0).abs() < 1e-9);
}

#[test]
fn all_empty_text_values_skip_the_word_cloud_with_a_warning() {
    let table = load(
        br#"{"comment": ["", "", ""], "score": [1, 2, 3]}"#,
        "json",
        &LoadOptions::default(),
    )
    .unwrap();
    let dashboard = Session::new(table, Selections::default()).derive().unwrap();
    assert_eq!(dashboard.text.len(), 1);
    assert!(dashboard.text[0].word_cloud.is_none());
    assert_eq!(
        dashboard.warnings,
        vec![Warning::WordCloud {
            column: "comment".into(),
            reason: WordCloudError::EmptyCorpus,
        }]
    );
    assert!(dashboard.numeric.is_some());
    assert!(dashboard.cross_tab.is_some());
}

#[test]
fn classification_is_a_stable_partition() {
    let bytes = fs::read(fixture_path("orders.csv")).unwrap();
    let table = load(&bytes, "csv", &LoadOptions::default()).unwrap();
    let groups = classify(&table);
    assert_eq!(groups, classify(&table));
    assert_eq!(groups.numeric, vec!["order_id", "amount", "quantity"]);
    assert_eq!(groups.text, vec!["customer", "status"]);
    assert_eq!(groups.temporal, vec!["ordered_at"]);

    let mut all: Vec<&String> = groups
        .numeric
        .iter()
        .chain(&groups.text)
        .chain(&groups.temporal)
        .collect();
    let listed = all.len();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), listed);
}

#[test]
fn frequencies_sum_to_non_missing_count() {
    let bytes = fs::read(fixture_path("reviews.json")).unwrap();
    let table = load(&bytes, "json", &LoadOptions::default()).unwrap();
    let summary = summarize_text(&table, "review").unwrap();
    let total: usize = summary.frequencies.iter().map(|entry| entry.count).sum();
    assert_eq!(total, table.column("review").unwrap().non_missing_count());
    assert!(
        summary
            .frequencies
            .windows(2)
            .all(|pair| pair[0].count >= pair[1].count)
    );
    let cloud = summary.word_cloud.expect("word cloud");
    assert_eq!(cloud.words[0].weight, 1.0);
    assert!(cloud.weight_of("boil").is_some() || cloud.weight_of("Boils").is_some());
}

#[test]
fn orders_timeline_counts_days_and_skips_missing() {
    let bytes = fs::read(fixture_path("orders.csv")).unwrap();
    let table = load(&bytes, "csv", &LoadOptions::default()).unwrap();
    let dashboard = Session::new(table, Selections::default()).derive().unwrap();
    let timeline = &dashboard.temporal[0];
    let days: Vec<(String, usize)> = timeline
        .counts
        .iter()
        .map(|entry| (entry.date.to_string(), entry.count))
        .collect();
    assert_eq!(
        days,
        vec![
            ("2024-01-01".to_string(), 1),
            ("2024-01-03".to_string(), 2),
            ("2024-01-04".to_string(), 2),
        ]
    );
    assert_eq!(timeline.unparsed, 0);
}

#[test]
fn slash_dates_in_one_column_share_a_day_order() {
    let month_first = summarize_temporal(&load_csv("when\n05/01/2024\n01/13/2024\n"), "when")
        .expect("month-first timeline");
    let days: Vec<String> = month_first.counts.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(days, vec!["2024-01-13", "2024-05-01"]);

    let day_first = summarize_temporal(&load_csv("when\n05/01/2024\n13/01/2024\n"), "when")
        .expect("day-first timeline");
    let days: Vec<String> = day_first.counts.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(days, vec!["2024-01-05", "2024-01-13"]);
}

#[test]
fn whitespace_only_cells_are_text_not_missing() {
    let table = load_csv("note,score\n  ,1\n   ,2\n");
    let note = table.column("note").unwrap();
    assert_eq!(note.kind(), ValueKind::Text);
    assert_eq!(note.non_missing_count(), 2);

    let dashboard = Session::new(table, Selections::default()).derive().unwrap();
    assert_eq!(dashboard.groups.text, vec!["note"]);
    assert_eq!(dashboard.text[0].frequencies[0].count, 1);
    assert_eq!(
        dashboard.warnings,
        vec![Warning::WordCloud {
            column: "note".into(),
            reason: WordCloudError::EmptyCorpus,
        }]
    );
}

#[test]
fn cross_tab_rows_sum_to_restricted_rows_present() {
    let mut csv = String::from("label,value\n");
    for idx in 0..15 {
        for repeat in 0..(15 - idx) {
            csv.push_str(&format!("cat{idx:02},{}\n", repeat % 3));
        }
    }
    csv.push_str("cat00,\n");
    let table = load_csv(&csv);

    let view = cross_tab(&table, "value", "label").unwrap();
    assert_eq!(view.categories.len(), TOP_CATEGORIES);
    assert_eq!(view.categories.first().map(String::as_str), Some("cat00"));
    assert_eq!(view.categories.last().map(String::as_str), Some("cat09"));
    assert_eq!(view.dropped_missing, 1);
    assert_eq!(view.total() + view.dropped_missing, view.restricted_rows);
    let expected: usize = (0..10).map(|idx| 15 - idx).sum::<usize>() + 1;
    assert_eq!(view.restricted_rows, expected);
}

#[test]
fn selections_pick_the_cross_tab_pair() {
    let bytes = fs::read(fixture_path("orders.csv")).unwrap();
    let table = load(&bytes, "csv", &LoadOptions::default()).unwrap();
    let selections = Selections {
        numeric: Some("quantity".into()),
        text: Some("status".into()),
        ..Selections::default()
    };
    let view = Session::new(table.clone(), selections)
        .derive()
        .unwrap()
        .cross_tab
        .unwrap();
    assert_eq!(view.numeric_column, "quantity");
    assert_eq!(view.categories, vec!["cancelled", "processing", "shipped"]);

    let wrong = Selections {
        numeric: Some("customer".into()),
        ..Selections::default()
    };
    assert!(Session::new(table, wrong).derive().is_err());
}
