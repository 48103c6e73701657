mod common;

use assert_cmd::Command;
use common::{fake_rustc, Sandbox};
use predicates::prelude::*;

fn depsweep() -> Command {
    Command::cargo_bin("depsweep").unwrap()
}

#[test]
fn shows_help() {
    depsweep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit language toolchains"));
}

#[test]
fn shows_version() {
    depsweep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    depsweep()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn scan_subcommand_help() {
    depsweep()
        .args(["scan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detect installed toolchains"));
}

#[test]
fn clean_subcommand_help() {
    depsweep()
        .args(["clean", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn info_subcommand_help() {
    depsweep()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one language"));
}

#[test]
fn generates_completions() {
    depsweep()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("depsweep"));
}

#[test]
fn verbose_flag_accepted() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-vvv", "scan", "--lang", "rust"])
        .assert()
        .success();
}

#[test]
fn invalid_config_path_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--config", "/nonexistent/path.toml", "scan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn config_path_from_environment() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("[scan]\nlanguages = [\"klingon\"]\n");
    sandbox
        .cmd()
        .env("DEPSWEEP_CONFIG", &config)
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("klingon"));
}

#[test]
fn unknown_language_is_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["clean", "cobol"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown language: cobol"));
}

#[test]
fn info_describes_toolchain() {
    let sandbox = Sandbox::new();
    fake_rustc(&sandbox);
    sandbox.file(".cargo/registry/cache/serde.crate", 4096);

    sandbox
        .cmd()
        .args(["info", "cargo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Rust\n"))
        .stdout(predicate::str::contains("Version:  1.75.0"))
        .stdout(predicate::str::contains("Source:   rustup"))
        .stdout(predicate::str::contains("Cargo Registry"))
        .stdout(predicate::str::contains("Cargo registry cache"));
}

#[test]
fn info_json_for_missing_toolchain() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .cmd()
        .args(["info", "php", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["id"], "php");
    assert_eq!(json["error"], "php not found in PATH");
    assert!(json.get("installations").is_none());
}
