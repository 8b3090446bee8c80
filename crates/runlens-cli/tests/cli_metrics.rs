use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_target() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../runlens-core/tests/fixtures/target")
}

fn runlens(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runlens").unwrap();
    cmd.current_dir(cwd.path())
        .env_remove("RUNLENS_TARGET_DIR")
        .env_remove("RUNLENS_OUT_DIR")
        .env_remove("RUNLENS_LOG");
    cmd
}

#[test]
fn test_metrics_json() {
    let dir = TempDir::new().unwrap();
    let out = runlens(&dir)
        .arg("metrics")
        .arg("--target-dir")
        .arg(fixture_target())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["schema_version"], 1);
    assert_eq!(v["total_models"], 7);
    assert_eq!(v["total_tests"], 5);
    let accuracy = v["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "Accuracy (%)")
        .unwrap();
    assert!((accuracy["value"].as_f64().unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn test_metrics_text_and_markdown() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .args(["metrics", "--format", "text"])
        .env("RUNLENS_TARGET_DIR", fixture_target())
        .assert()
        .success()
        .stdout(contains("Unknown Timelines (%)").and(contains("20.00")));

    runlens(&dir)
        .args(["metrics", "--format", "markdown"])
        .env("RUNLENS_TARGET_DIR", fixture_target())
        .assert()
        .success()
        .stdout(contains("| Metric | Value |").and(contains("| Completeness (%) | 80.00 |")));
}

#[test]
fn test_missing_artifacts_is_fatal() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .arg("render")
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .assert()
        .code(2)
        .stderr(contains("fatal:").and(contains("manifest.json")));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unknown_chart_is_config_error() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .arg("render")
        .arg("--target-dir")
        .arg(fixture_target())
        .args(["--only", "sunburst"])
        .assert()
        .code(2)
        .stderr(contains("unknown chart 'sunburst'"));
}

#[test]
fn test_bad_policy_is_rejected() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .args(["render", "--on-chart-error", "ignore"])
        .assert()
        .failure()
        .stderr(contains("unknown chart error policy"));
}

#[test]
fn test_charts_lists_every_file() {
    let dir = TempDir::new().unwrap();
    let assert = runlens(&dir).arg("charts").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("metrics_table.png"));
    assert!(stdout.contains("Heatmap of Schema vs Materialization"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(contains("created runlens.yaml"));
    let body = std::fs::read_to_string(dir.path().join("runlens.yaml")).unwrap();
    assert!(body.contains("on_chart_error: abort"));

    runlens(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(contains("already exists"));
}

#[test]
fn test_strict_config_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("runlens.yaml"), "version: 1\npalette: viridis\n").unwrap();
    runlens(&dir)
        .arg("render")
        .arg("--target-dir")
        .arg(fixture_target())
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("palette"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let re = regex::Regex::new(r"^\d+\.\d+\.\d+\n$").unwrap();
    runlens(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::function(move |s: &str| re.is_match(s)));
}

#[test]
fn test_oversized_grid_is_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("runlens.yaml"),
        "version: 1\ncharts:\n  hexbin_gridsize: 1000000\n",
    )
    .unwrap();
    runlens(&dir)
        .arg("render")
        .arg("--target-dir")
        .arg(fixture_target())
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .assert()
        .code(2)
        .stderr(contains("hexbin_gridsize must be between 1 and 1000"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_help_describes_every_command() {
    let dir = TempDir::new().unwrap();
    runlens(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Print the version").and(contains("List the charts")));
}
