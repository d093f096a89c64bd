mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{PEOPLE_CSV, TestWorkspace, fixture_path, xlsx_bytes};

fn binary() -> Command {
    Command::cargo_bin("data-insights").expect("binary exists")
}

#[test]
fn report_prints_describe_table_and_frequencies() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", PEOPLE_CSV);
    binary()
        .args(["report", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Numeric summary"))
        .stdout(contains("31.6667"))
        .stdout(contains("Frequencies: name"))
        .stdout(contains("Alice").and(contains("Bob")))
        .stdout(contains("Cross-tab: name x age"));
}

#[test]
fn report_json_output_parses() {
    let output = binary()
        .args([
            "report",
            "-i",
            fixture_path("orders.csv").to_str().unwrap(),
            "--output",
            "json",
            "--preview-rows",
            "2",
        ])
        .output()
        .expect("run report");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["row_count"], 6);
    assert_eq!(parsed["preview"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["groups"]["temporal"][0], "ordered_at");
    assert_eq!(parsed["cross_tab"]["numeric_column"], "order_id");
}

#[test]
fn unsupported_extension_warns_and_exits_cleanly() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("notes.txt", "a,b\n1,2\n");
    binary()
        .args(["report", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("")
        .stderr(contains("warning: Unsupported file format 'txt'"));
}

#[test]
fn malformed_json_exits_with_decoder_message() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("broken.json", "[{\"a\": 1,");
    binary()
        .args(["report", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("error: Failed to read the JSON file"))
        .stderr(contains("EOF"));
}

#[test]
fn separator_flag_and_config_file_drive_csv_parsing() {
    let fixture = fixture_path("weather_semicolon.csv");
    binary()
        .args([
            "classify",
            "-i",
            fixture.to_str().unwrap(),
            "--separator",
            ";",
        ])
        .assert()
        .success()
        .stdout(contains("numeric: temp"))
        .stdout(contains("text: city"));

    let workspace = TestWorkspace::new();
    let config = workspace.write("session.yml", "separator: semicolon\npreview_rows: 1\n");
    binary()
        .args([
            "preview",
            "-i",
            fixture.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Lisbon"))
        .stdout(contains("Porto").not());
}

#[test]
fn crosstab_subcommand_validates_column_groups() {
    let fixture = fixture_path("orders.csv");
    binary()
        .args([
            "crosstab",
            "-i",
            fixture.to_str().unwrap(),
            "--numeric",
            "quantity",
            "--text",
            "customer",
        ])
        .assert()
        .success()
        .stdout(contains("Cross-tab: customer x quantity"))
        .stdout(contains("Alice"));

    binary()
        .args([
            "crosstab",
            "-i",
            fixture.to_str().unwrap(),
            "--numeric",
            "status",
            "--text",
            "customer",
        ])
        .assert()
        .failure()
        .stderr(contains("not a numeric column"));
}

#[test]
fn stdin_requires_an_explicit_format() {
    binary()
        .args(["preview", "-i", "-"])
        .write_stdin(PEOPLE_CSV)
        .assert()
        .failure()
        .stderr(contains("requires --format"));

    binary()
        .args(["preview", "-i", "-", "--format", "csv"])
        .write_stdin(PEOPLE_CSV)
        .assert()
        .success()
        .stdout(contains("Alice"));
}

#[test]
fn xlsx_upload_reports_numeric_summary() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_bytes(
        "people.xlsx",
        &xlsx_bytes(&[&["name", "age"], &["Alice", "30"], &["Bob", "25"]]),
    );
    binary()
        .args(["report", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Numeric summary"))
        .stdout(contains("27.5"));
}

#[test]
fn unknown_selected_column_is_an_error() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", PEOPLE_CSV);
    binary()
        .args(["report", "-i", input.to_str().unwrap(), "-C", "salary"])
        .assert()
        .failure()
        .stderr(contains("Column 'salary' not found"));
}
