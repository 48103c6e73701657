//! Integration tests for the scan command.

mod common;

use common::{fake_go, fake_rustc, Sandbox};
use predicates::prelude::*;

#[test]
fn scan_reports_rustup_toolchain() {
    let sandbox = Sandbox::new();
    fake_rustc(&sandbox);
    sandbox.file(".cargo/registry/cache/index/serde-1.0.0.crate", 2048);
    sandbox.file(".rustup/toolchains/stable/lib/librustc.so", 1024);

    sandbox
        .cmd()
        .args(["scan", "--lang", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust"))
        .stdout(predicate::str::contains("1.75.0"))
        .stdout(predicate::str::contains("rustup"))
        .stdout(predicate::str::contains("Rustup Toolchains"))
        .stdout(predicate::str::contains("Cargo Registry"))
        .stdout(predicate::str::contains("Total: 3 KiB across 1 toolchain"));
}

#[test]
fn missing_toolchain_does_not_hide_others() {
    let sandbox = Sandbox::new();
    fake_go(&sandbox);
    sandbox.file("gomod/cache/download/x.zip", 1024);

    sandbox
        .cmd()
        .args(["scan", "--lang", "golang,php"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Golang"))
        .stdout(predicate::str::contains("1.21.3"))
        .stdout(predicate::str::contains("Module Cache"))
        .stdout(predicate::str::contains("❌ PHP"))
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn scan_with_nothing_installed_succeeds() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("across 0 toolchains"));
}

#[test]
fn scan_json_keeps_display_order() {
    let sandbox = Sandbox::new();
    fake_rustc(&sandbox);
    fake_go(&sandbox);

    let output = sandbox
        .cmd()
        .args(["scan", "--json", "--lang", "rust,node,go"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["go", "node", "rust"]);
    assert_eq!(json[0]["installations"][0]["version"], "1.21.3");
    assert_eq!(json[1]["error"], "node not found in PATH");
    assert_eq!(json[2]["installations"][0]["source"], "VersionManager");
}

#[test]
fn scan_respects_jobs() {
    let sandbox = Sandbox::new();
    fake_rustc(&sandbox);

    sandbox
        .cmd()
        .args(["scan", "-j", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.75.0"));
}

#[test]
fn unparseable_version_is_unknown() {
    let sandbox = Sandbox::new();
    sandbox.tool("bin", "node", "echo 'not a version'");

    sandbox
        .cmd()
        .args(["scan", "--lang", "node"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown"));
}

#[test]
fn config_languages_and_show_empty() {
    let sandbox = Sandbox::new();
    fake_rustc(&sandbox);
    let config = sandbox.write_config(
        r#"
[scan]
languages = ["rust", "java"]

[output]
show_empty = false
"#,
    );

    sandbox
        .cmd()
        .args(["--config"])
        .arg(&config)
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust"))
        .stdout(predicate::str::contains("Java").not())
        .stdout(predicate::str::contains("Golang").not());
}

#[test]
fn config_json_output() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("[output]\njson = true\n");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["scan", "--lang", "php"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}
