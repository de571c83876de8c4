//! CLI contract tests
//!
//! Runs the built binary against resource files in a temp directory and
//! checks formats, --fail-on exit codes, init and graph output.

use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};

fn chartplan(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chartplan"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run chartplan")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A Deployment and its Service, both in service "app"
fn write_simple_input(dir: &Path) -> String {
    let input = json!([
        {
            "key": {"group": "apps", "version": "v1", "kind": "Deployment", "namespace": "default", "name": "web"},
            "service_name": "app",
            "values": {"replicas": 2}
        },
        {
            "key": {"group": "", "version": "v1", "kind": "Service", "namespace": "default", "name": "web"},
            "service_name": "app"
        }
    ]);
    std::fs::write(dir.join("resources.json"), input.to_string()).expect("write input");
    "resources.json".to_string()
}

fn write_privileged_input(dir: &Path) -> String {
    let input = json!([{
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": "agent", "namespace": "ops"},
        "spec": {
            "replicas": 2,
            "template": {"spec": {"containers": [{
                "name": "agent",
                "image": "agent:1.0.0",
                "securityContext": {"privileged": true}
            }]}}
        }
    }]);
    std::fs::write(dir.join("privileged.json"), input.to_string()).expect("write input");
    "privileged.json".to_string()
}

#[test]
fn test_analyze_json_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_simple_input(dir.path());

    let output = chartplan(dir.path(), &["analyze", &input, "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(report["primary_pattern"], "monolith");
    assert_eq!(report["strategy"], "universal");
    assert_eq!(report["sections"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_analyze_summary_is_one_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_simple_input(dir.path());

    let output = chartplan(dir.path(), &["analyze", &input, "-f", "summary"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("1 services, 2 resources"), "got: {text}");
    assert!(text.contains("pattern monolith"));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_simple_input(dir.path());

    let output = chartplan(
        dir.path(),
        &["analyze", &input, "--format", "markdown", "--output", "report.md"],
    );
    assert!(output.status.success());
    let written = std::fs::read_to_string(dir.path().join("report.md")).expect("report written");
    assert!(written.contains("Action Items"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_fail_on_critical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let privileged = write_privileged_input(dir.path());
    let simple = write_simple_input(dir.path());

    let failing = chartplan(
        dir.path(),
        &["analyze", &privileged, "-f", "summary", "--fail-on", "critical"],
    );
    assert_eq!(failing.status.code(), Some(1));

    let passing = chartplan(
        dir.path(),
        &["analyze", &simple, "-f", "summary", "--fail-on", "critical"],
    );
    assert_eq!(passing.status.code(), Some(0));
}

#[test]
fn test_unknown_format_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_simple_input(dir.path());

    let output = chartplan(dir.path(), &["analyze", &input, "--format", "sarif"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = chartplan(dir.path(), &["analyze", "nope.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = chartplan(dir.path(), &["init"]);
    assert!(output.status.success());
    let config = std::fs::read_to_string(dir.path().join("chartplan.toml")).expect("config");
    assert!(config.contains("vendor_api_group"));

    // the written config is picked up by the next run
    let input = write_simple_input(dir.path());
    let output = chartplan(dir.path(), &["analyze", &input, "-f", "json"]);
    assert!(output.status.success());
}

#[test]
fn test_graph_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_simple_input(dir.path());

    let output = chartplan(dir.path(), &["graph", &input, "--json"]);
    assert!(output.status.success());
    let graph: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(graph["groups"].as_array().map(Vec::len), Some(1));
    assert_eq!(graph["groups"][0]["name"], "app");
    assert_eq!(graph["resources"].as_array().map(Vec::len), Some(2));
}
