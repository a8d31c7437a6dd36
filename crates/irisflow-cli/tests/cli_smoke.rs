//! CLI binary smoke tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("irisflow").unwrap()
}

fn write_config(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("parameters.json");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn template_prints_model_params() {
    cmd()
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model_params\""))
        .stdout(predicate::str::contains("\"max_iter\": 200"))
        .stdout(predicate::str::contains("\"model_standard_scaler\": true"));
}

#[test]
fn run_on_bundled_iris_records_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{"model_params": {"max_iter": 200, "random_state": 0}, "model_standard_scaler": true}"#,
    );
    let tracking = dir.path().join("mlruns");

    cmd()
        .arg("run")
        .arg(&config)
        .arg("--tracking-dir")
        .arg(&tracking)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Model accuracy on test set: \d{1,3}\.\d{2}%").unwrap())
        .stdout(predicate::str::contains("evaluated on 30 rows"));

    assert!(tracking.join("iris-classifier").is_dir());
}

#[test]
fn run_without_model_params_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), r#"{"model_standard_scaler": true}"#);

    cmd()
        .arg("run")
        .arg(&config)
        .arg("--tracking-dir")
        .arg(dir.path().join("mlruns"))
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("mlruns").exists());
}

#[test]
fn run_with_missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), r#"{"model_params": {}}"#);

    cmd()
        .arg("run")
        .arg(&config)
        .args(["--data", "/nonexistent/iris.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn run_logs_accuracy_line_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), r#"{"model_params": {"max_iter": 200}}"#);

    cmd()
        .env("IRISFLOW_LOG", "info")
        .arg("run")
        .arg(&config)
        .arg("--tracking-dir")
        .arg(dir.path().join("mlruns"))
        .assert()
        .success()
        .stderr(
            predicate::str::is_match(
                r"INFO\s+irisflow_classifiers::nodes\] Model accuracy on test set: \d{1,3}\.\d{2}%",
            )
            .unwrap(),
        );
}

#[cfg(unix)]
#[test]
fn run_with_diagram_logs_png_artifact() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    let dot = bin.join("dot");
    std::fs::write(&dot, "#!/bin/sh\necho PNG > \"$4\"\n").unwrap();
    std::fs::set_permissions(&dot, std::fs::Permissions::from_mode(0o755)).unwrap();
    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let config = write_config(
        dir.path(),
        r#"{"model_params": {"max_iter": 200}, "model_standard_scaler": true}"#,
    );
    let tracking = dir.path().join("mlruns");

    cmd()
        .env("PATH", path)
        .current_dir(dir.path())
        .arg("run")
        .arg(&config)
        .arg("--tracking-dir")
        .arg(&tracking)
        .arg("--diagram")
        .assert()
        .success();

    assert!(dir.path().join("pipeline_dot.dot").is_file());
    let runs: Vec<_> = std::fs::read_dir(tracking.join("iris-classifier"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(runs.len(), 1);
    let png = runs[0].join("artifacts/model/pipeline_dot.png");
    assert_eq!(std::fs::read_to_string(png).unwrap(), "PNG\n");
}
