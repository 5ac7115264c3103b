//! Exit-code behavior of the binary.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn invalid_config_exits_with_code_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deploy.toml");
    fs::write(&path, "[readiness]\ntimeout_secs = 0\n").expect("write config");

    cargo_bin_cmd!("deployctl")
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn deploy_with_invalid_config_exits_before_any_tool_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deploy.toml");
    fs::write(
        &path,
        "[images.frontend]\nname = \"same\"\ncontext = \"web\"\n[images.backend]\nname = \"same\"\ncontext = \"api\"\n",
    )
    .expect("write config");

    cargo_bin_cmd!("deployctl")
        .args(["deploy", "--config"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("different image names"));
}

#[test]
fn missing_config_points_at_init() {
    let dir = tempfile::tempdir().expect("tempdir");

    cargo_bin_cmd!("deployctl")
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn malformed_toml_renders_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deploy.toml");
    fs::write(&path, "[target]\nnamespace = apartment\n").expect("write config");

    cargo_bin_cmd!("deployctl")
        .args(["--color", "never", "config", "validate", "-c"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("deployctl::config"));
}

#[test]
fn json_errors_are_machine_readable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deploy.toml");
    fs::write(&path, "[status]\ningress = \"\"\n").expect("write config");

    cargo_bin_cmd!("deployctl")
        .args(["--json", "check", "-c"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"type\":\"error\""));
}
