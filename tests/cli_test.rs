//! CLI integration tests for the resource-query binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("resource-query"))
}

// Helper to create a temp JSON file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod parse_command {
    use super::*;

    #[test]
    fn basic_parse() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(
            &dir,
            "params.json",
            r#"{
                "includes": ["author:name,bio"],
                "sort": [{ "field": "name" }]
            }"#,
        );

        cmd()
            .args(["parse", params.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""includes":["author:name,bio"]"#))
            .stdout(predicate::str::contains(r#""modes":{"author":"embed"}"#))
            .stdout(predicate::str::contains(
                r#""sort":[{"field":"name","direction":"asc"}]"#,
            ));
    }

    #[test]
    fn parse_with_pretty() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"limit": 5}"#);

        cmd()
            .args(["parse", params.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn parse_with_output_file() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"limit": 5, "page": 1}"#);
        let output = dir.path().join("options.json");

        cmd()
            .args([
                "parse",
                params.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""limit":5"#));
        assert!(content.contains(r#""page":1"#));
    }

    #[test]
    fn parse_from_stdin() {
        cmd()
            .args(["parse", "-"])
            .write_stdin(r#"{"filter_groups":[{"filters":[{"key":"age","operator":"gt","value":"18"}]}]}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#""filter_groups":[{"filters":[{"key":"age","operator":"gt","value":"18","not":false}],"or":false}]"#,
            ));
    }

    #[test]
    fn parse_with_defaults_file() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"includes": ["author"], "page": 2}"#);
        let defaults = write_temp_file(
            &dir,
            "defaults.json",
            r#"{"mode": "sideload", "limit": 25}"#,
        );

        cmd()
            .args([
                "parse",
                params.to_str().unwrap(),
                "--defaults",
                defaults.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""modes":{"author":"sideload"}"#))
            .stdout(predicate::str::contains(r#""limit":25"#));
    }

    #[test]
    fn page_without_limit_fails() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"page": 2}"#);

        cmd()
            .args(["parse", params.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "cannot use page option without limit option",
            ));
    }

    #[test]
    fn invalid_json_exit_code() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", "{not json");

        cmd()
            .args(["parse", params.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn missing_file_exit_code() {
        cmd()
            .args(["parse", "/nonexistent/params.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn unknown_defaults_key() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", "{}");
        let defaults = write_temp_file(&dir, "defaults.json", r#"{"limt": 25}"#);

        cmd()
            .args([
                "parse",
                params.to_str().unwrap(),
                "--defaults",
                defaults.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown defaults key \"limt\""));
    }

    #[test]
    fn verbose_logs_to_stderr() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"limit": 5}"#);

        cmd()
            .env_remove("RUST_LOG")
            .args(["--verbose", "parse", params.to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains("resource options assembled"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn check_valid() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"limit": 10, "page": 3}"#);

        cmd()
            .args(["check", params.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn check_missing_filters_key() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"filter_groups": [{"or": true}]}"#);

        cmd()
            .args(["check", params.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Rejected (400 Bad Request)"))
            .stderr(predicate::str::contains("'filters' key"));
    }

    #[test]
    fn check_json_valid() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", "{}");

        cmd()
            .args(["check", params.to_str().unwrap(), "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"valid":true}"#));
    }

    #[test]
    fn check_json_rejected() {
        let dir = TempDir::new().unwrap();
        let params = write_temp_file(&dir, "params.json", r#"{"limit": "many"}"#);

        cmd()
            .args(["check", params.to_str().unwrap(), "--json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""status":400"#))
            .stdout(predicate::str::contains("/limit"));
    }

    #[test]
    fn check_json_load_error() {
        cmd()
            .args(["check", "/nonexistent/params.json", "--json"])
            .assert()
            .code(3)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }
}
