use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config-descriptions>
    <config-description uri="binding:foo:bar">
        <parameter name="host" type="text" required="true">
            <label>Host</label>
        </parameter>
    </config-description>
    <config-description>
        <parameter name="port" type="integer"/>
    </config-description>
</config-descriptions>
"#;

/// Running the CLI with no arguments should default to the Version command
/// and succeed.
#[test]
fn default_command_prints_version() {
    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("confdesc v"));
}

/// parse should print each descriptor, using --uri for the one without its own URI.
#[test]
fn parse_prints_descriptors_with_inferred_uri() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("cd.xml");
    fs::write(&file, DOCUMENT).expect("write fixture");

    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .arg("parse")
        .arg("--file")
        .arg(&file)
        .arg("--uri")
        .arg("thing:baz:1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config description: binding:foo:bar"))
        .stdout(predicate::str::contains("Config description: thing:baz:1"))
        .stdout(predicate::str::contains("host (text, required) - Host"));
}

/// Without --uri the second descriptor has no identity and parsing fails.
#[test]
fn parse_fails_without_inferred_uri() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("cd.xml");
    fs::write(&file, DOCUMENT).expect("write fixture");

    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .arg("parse")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("The URI '<none>' in node 'config-description' is invalid"));
}

#[test]
fn parse_json_output() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("cd.xml");
    fs::write(&file, r#"<config-description uri="binding:foo:bar"/>"#).expect("write fixture");

    let output = assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .arg("parse")
        .arg("--file")
        .arg(&file)
        .arg("--json")
        .output()
        .expect("run confdesc");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value[0]["uri"], "binding:foo:bar");
    assert_eq!(value[0]["parameters"].as_array().map(Vec::len), Some(0));
}

#[test]
fn json_and_yaml_flags_conflict() {
    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .args(["parse", "--file", "x.xml", "--json", "--yaml"])
        .assert()
        .failure();
}

#[test]
fn check_reports_invalid_uri() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("cd.xml");
    fs::write(&file, r#"<config-description uri="binding:foo bar"/>"#).expect("write fixture");

    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .arg("check")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("binding:foo bar"));
}

#[test]
fn check_uses_default_uri_from_config() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("cd.xml");
    fs::write(&file, r#"<config-description><parameter name="a" type="text"/></config-description>"#)
        .expect("write fixture");
    let cfg = dir.path().join("parser.json");
    fs::write(&cfg, r#"{ "default_uri": "thing:baz:1" }"#).expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("confdesc")
        .arg("check")
        .arg("--file")
        .arg(&file)
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK thing:baz:1 (1 parameters)"));
}
