use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const USERS_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/users.json");

/// Runs the binary inside `dir` with no soranks settings inherited from the environment
fn soranks(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("soranks").expect("Binary exists");
    cmd.current_dir(dir.path())
        .env_remove("SORANKS_LOG")
        .env_remove("SORANKS_VERBOSE")
        .env_remove("SORANKS_LOCATION")
        .env_remove("SORANKS_LIMIT")
        .env_remove("SORANKS_MIN_REPUTATION")
        .env_remove("SORANKS_MAX_PAGES")
        .env_remove("SORANKS_API_URL")
        .env_remove("SORANKS_TOKEN_FILE");
    cmd
}

fn read_ranks(path: &std::path::Path) -> Vec<Value> {
    let raw = fs::read_to_string(path).expect("JSON output exists");
    serde_json::from_str(&raw).expect("JSON output is an array")
}

#[test]
fn publish_without_markdown_exits_fatal() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .args(["--json", USERS_FIXTURE, "--publish", "spain/README.md"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Publish requires mdrsp"));
}

#[test]
fn ranks_saved_response_into_json_and_markdown() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("ranks.json");
    let md = dir.path().join("ranks.md");

    soranks(&dir)
        .arg("--json")
        .arg(USERS_FIXTURE)
        .arg("--jsonrsp")
        .arg(&json)
        .arg("--mdrsp")
        .arg(&md)
        .assert()
        .success();

    // Empty locations never match "." and the 320 user ends the scan
    let ranks = read_ranks(&json);
    assert_eq!(ranks.len(), 4);
    assert_eq!(ranks[0]["rank"], 1);
    assert_eq!(ranks[0]["display_name"], "Jon Skeet");
    assert_eq!(ranks[3]["display_name"], "Laura Ruiz");
    assert!(ranks[1].get("website_url").is_none());

    let markdown = fs::read_to_string(&md).unwrap();
    assert!(markdown.starts_with("# soranks\n"));
    assert!(markdown.contains("### Area: WorldWide"));
    assert!(markdown.contains(
        "1|[Jon Skeet](http://stackoverflow.com/users/22656/jon-skeet)|857399|Reading, United Kingdom|http://csharpindepth.com|"
    ));
    assert!(!markdown.contains("nowhere man"));
    assert!(!markdown.contains("pepe"));
}

#[test]
fn location_pattern_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("ranks.json");

    soranks(&dir)
        .arg("--json")
        .arg(USERS_FIXTURE)
        .args(["--location", "SPAIN|españa|espa&#241;a"])
        .arg("--jsonrsp")
        .arg(&json)
        .assert()
        .success();

    let names: Vec<String> = read_ranks(&json)
        .iter()
        .map(|r| r["display_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Carlos G&#243;mez", "Laura Ruiz"]);
}

#[test]
fn limit_caps_the_ranking() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("ranks.json");

    soranks(&dir)
        .arg("--json")
        .arg(USERS_FIXTURE)
        .args(["--limit", "2"])
        .arg("--jsonrsp")
        .arg(&json)
        .assert()
        .success();

    let ranks = read_ranks(&json);
    assert_eq!(ranks.len(), 2);
    assert_eq!(ranks[1]["rank"], 2);
}

#[test]
fn term_prints_users_as_found() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .args(["--json", USERS_FIXTURE, "--location", "spain", "--term"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User data:"))
        .stdout(predicate::str::contains("Laura Ruiz"))
        .stdout(predicate::str::contains("Jon Skeet").not());
}

#[test]
fn no_results_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("ranks.json");
    let md = dir.path().join("ranks.md");

    soranks(&dir)
        .arg("--json")
        .arg(USERS_FIXTURE)
        .args(["--location", "atlantis"])
        .arg("--jsonrsp")
        .arg(&json)
        .arg("--mdrsp")
        .arg(&md)
        .assert()
        .success()
        .stderr(predicate::str::contains("No results found."));

    assert!(!json.exists());
    assert!(!md.exists());
}

#[test]
fn malformed_source_file_exits_fatal() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("users.json");
    fs::write(&source, "{\"items\": [").unwrap();

    soranks(&dir)
        .arg("--json")
        .arg(&source)
        .assert()
        .code(5);
}

#[test]
fn missing_source_file_exits_fatal() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .arg("--json")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(5)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn invalid_location_exits_fatal() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .args(["--json", USERS_FIXTURE, "--location", "(spain"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid location pattern"));
}

#[test]
fn unwritable_output_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("missing").join("ranks.json");

    soranks(&dir)
        .arg("--json")
        .arg(USERS_FIXTURE)
        .arg("--jsonrsp")
        .arg(&json)
        .assert()
        .code(1);
}

#[test]
fn verbose_installs_trace_logger() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .args(["--json", USERS_FIXTURE, "--location", "atlantis", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("location: atlantis"));
}

#[test]
fn log_filter_is_read_from_environment() {
    let dir = TempDir::new().unwrap();

    soranks(&dir)
        .args(["--json", USERS_FIXTURE, "--location", "atlantis"])
        .env("SORANKS_LOG", "error")
        .assert()
        .success()
        .stderr(predicate::str::contains("No results found.").not());
}
