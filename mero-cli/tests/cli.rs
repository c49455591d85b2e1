use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

const PEOPLE: &str = r#"[
    {"name": "Carol", "team": "ops", "age": 41},
    {"name": "alice", "team": "dev", "age": 30},
    {"name": "Bob", "team": "ops", "age": 25},
    {"name": "dave", "age": 35}
]"#;

/// Run `mero` with config and cache directories inside `home`.
fn mero(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mero"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_view_json_sorted_and_filtered() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);

    let output = mero(
        &home,
        &["view", &records, "--filter", "team=OPS", "--sort", "age", "--json"],
    );
    assert!(output.status.success());

    let view = json(&output);
    assert_eq!(view["totalMatched"], 2);
    assert_eq!(view["pageCount"], 1);
    assert_eq!(view["pageRecords"][0]["name"], "Bob");
    assert_eq!(view["pageRecords"][1]["name"], "Carol");
}

#[test]
fn test_view_text_grouped() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);

    let output = mero(&home, &["view", &records, "--group", "team"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("ops (2)\n"));
    assert!(text.contains("\ndev (1)\n"));
    assert!(text.contains("\nOther (1)\n"));
    assert!(text.ends_with("4 matched\n"));
}

#[test]
fn test_view_pagination() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);

    let output = mero(
        &home,
        &["view", &records, "--sort", "name", "--page-size", "3", "--page", "2"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Showing 4-4 of 4 (page 2 of 2)"));
    assert!(text.contains("dave"));
}

#[test]
fn test_query_file_limits_fields() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);
    let query = write(
        home.path(),
        "query.json",
        r#"{
            "fields": [{"key": "name", "filterable": true}],
            "query": {"searchTerm": "ops", "sortKey": "name"}
        }"#,
    );

    let output = mero(&home, &["view", &records, "--query", &query, "--json"]);
    assert!(output.status.success());

    // Search only sees described fields, and sorting by name is not allowed.
    let view = json(&output);
    assert_eq!(view["totalMatched"], 0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"));
}

#[test]
fn test_settings_page_size() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);
    let config = home.path().join("config").join("mero");
    fs::create_dir_all(&config).unwrap();
    fs::write(config.join("config.json"), r#"{"pageSize": 2}"#).unwrap();

    let output = mero(&home, &["view", &records, "--json"]);
    assert!(output.status.success());
    assert_eq!(json(&output)["pageCount"], 2);

    let output = mero(&home, &["view", &records, "--page-size", "4", "--json"]);
    assert_eq!(json(&output)["pageCount"], 1);
}

#[test]
fn test_query_file_falls_back_to_settings_page_size() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);
    let query = write(home.path(), "query.json", r#"{"query": {"sortKey": "age"}}"#);
    let config = home.path().join("config").join("mero");
    fs::create_dir_all(&config).unwrap();
    fs::write(config.join("config.json"), r#"{"pageSize": 2}"#).unwrap();

    let output = mero(&home, &["view", &records, "--query", &query, "--json"]);
    assert!(output.status.success());
    let view = json(&output);
    assert_eq!(view["pageCount"], 2);
    assert_eq!(view["pageRecords"][0]["name"], "Bob");
}

#[test]
fn test_fields_output_is_a_query_file() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);

    let output = mero(&home, &["fields", &records]);
    assert!(output.status.success());

    let file = json(&output);
    let keys: Vec<&str> = file["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["age", "name", "team"]);
    assert_eq!(file["fields"][0]["sortable"], true);
    assert!(file.get("query").is_none());
}

#[test]
fn test_log_file_flag() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);
    let log = home.path().join("run.log");

    let output = mero(
        &home,
        &["-v", "--log-file", &log.to_string_lossy(), "view", &records],
    );
    assert!(output.status.success());
    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("loaded 4 records"));
}

#[test]
fn test_missing_records_file_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.json");

    let output = mero(&home, &["view", &missing.to_string_lossy()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_malformed_records_fail() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "bad.json", r#"{"not": "an array"}"#);

    let output = mero(&home, &["view", &records]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON"));
}

#[test]
fn test_zero_page_is_rejected() {
    let home = TempDir::new().unwrap();
    let records = write(home.path(), "people.json", PEOPLE);

    let output = mero(&home, &["view", &records, "--page", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid query"));
}
