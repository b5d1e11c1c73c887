//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temp directory and
//! verify outputs and written bundles.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_workcurves"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("WORKCURVES_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_generate_writes_dataset_bundle() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("dataset.json");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["generate", "--out", path_str(&out), "--days", "40", "--seed", "3"],
    );
    assert_eq!(code, 0, "generate failed");
    assert!(stdout.contains("Days: 40"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 40);
    assert_eq!(json["self_reports"].as_array().unwrap().len(), 40);
}

#[test]
fn test_aggregate_and_report_json() {
    let home = TempDir::new().unwrap();
    let dataset = home.path().join("dataset.json");
    let curves = home.path().join("curves.json");

    let (code, _, _) = run_cli(
        home.path(),
        &["generate", "--out", path_str(&dataset), "--days", "120", "--seed", "11"],
    );
    assert_eq!(code, 0);

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &[
            "aggregate",
            "--input",
            path_str(&dataset),
            "--out",
            path_str(&curves),
            "--strategy",
            "sorted",
            "--verify",
        ],
    );
    assert_eq!(code, 0, "aggregate failed: {stderr}");
    assert!(stdout.contains("Verified"));

    let bundle: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&curves).unwrap()).unwrap();
    let rows = bundle["C"].as_array().unwrap().len();
    assert_eq!(bundle["C_reports"].as_array().unwrap().len(), rows);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["report", "--curves", path_str(&curves), "--format", "json", "--axis", "total"],
    );
    assert_eq!(code, 0);
    let points: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(points.as_array().unwrap().len(), rows * 24);
}

#[test]
fn test_aggregate_rejects_zero_width() {
    let home = TempDir::new().unwrap();
    let dataset = home.path().join("dataset.json");
    let curves = home.path().join("curves.json");

    run_cli(
        home.path(),
        &["generate", "--out", path_str(&dataset), "--days", "10", "--seed", "1"],
    );
    let (code, _, stderr) = run_cli(
        home.path(),
        &[
            "aggregate",
            "--input",
            path_str(&dataset),
            "--out",
            path_str(&curves),
            "--window-width",
            "0",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid parameter 'window_width'"));
    assert!(!curves.exists(), "no partial output on error");
}

#[test]
fn test_aggregate_rejects_ragged_dataset() {
    let home = TempDir::new().unwrap();
    let dataset = home.path().join("bad.json");
    std::fs::write(&dataset, r#"{"data": [[1.0, 2.0]], "self_reports": [0.5]}"#).unwrap();

    let (code, _, stderr) = run_cli(
        home.path(),
        &["aggregate", "--input", path_str(&dataset), "--out", "unused.json"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Shape mismatch"));
}

#[test]
fn test_malformed_default_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dataset = home.path().join("dataset.json");
    let curves = home.path().join("curves.json");

    let (code, _, _) = run_cli(
        home.path(),
        &["generate", "--out", path_str(&dataset), "--days", "30", "--seed", "5"],
    );
    assert_eq!(code, 0);

    let config_dir = home.path().join(".config").join("workcurves");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[aggregation]\nwindow_width = 80.0\noffset = \"ten\"\n",
    )
    .unwrap();

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["aggregate", "--input", path_str(&dataset), "--out", path_str(&curves)],
    );
    assert_eq!(code, 1, "malformed config must not fall back: {stdout}");
    assert!(stderr.contains("Failed to parse configuration"), "{stderr}");
    assert!(!curves.exists());
}

#[test]
fn test_default_config_is_used_when_valid() {
    let home = TempDir::new().unwrap();
    let dataset = home.path().join("dataset.json");
    let curves = home.path().join("curves.json");

    run_cli(
        home.path(),
        &["generate", "--out", path_str(&dataset), "--days", "30", "--seed", "5"],
    );
    std::fs::write(
        home.path().join(".config").join("workcurves").join("config.toml"),
        "[aggregation]\nwindow_width = 80.0\noffset = 10.0\n",
    )
    .unwrap();

    let (code, _, stderr) = run_cli(
        home.path(),
        &["aggregate", "--input", path_str(&dataset), "--out", path_str(&curves)],
    );
    assert_eq!(code, 0, "aggregate failed: {stderr}");

    let bundle: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&curves).unwrap()).unwrap();
    assert_eq!(bundle["window_width"], 80.0);
    assert_eq!(bundle["offset"], 10.0);
}

#[test]
fn test_run_pipeline() {
    let home = TempDir::new().unwrap();
    let out_dir = home.path().join("run");

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["run", "--out-dir", path_str(&out_dir), "--days", "200", "--seed", "42"],
    );
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("Work Curves"));
    assert!(stdout.contains("Pipeline complete!"));
    assert!(out_dir.join("dataset.json").exists());
    assert!(out_dir.join("curves.json").exists());
    assert!(out_dir.join("surface.json").exists());
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    let config_arg = path_str(&config);

    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "aggregation.offset", "10", "--config", config_arg],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["config", "get", "aggregation.offset", "--config", config_arg],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10.0");

    let (code, _, _) = run_cli(
        home.path(),
        &["config", "get", "aggregation.bogus", "--config", config_arg],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_rejects_non_positive_offset() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");

    let (code, _, stderr) = run_cli(
        home.path(),
        &["config", "set", "aggregation.offset", "-5", "--config", path_str(&config)],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("offset"));
    assert!(!config.exists());
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("workcurves"));
}
