use std::fs;

use confdesc::commands::{check_command, parse_command, OutputFormat};
use tempfile::tempdir;

#[test]
fn parse_errors_when_file_missing() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("missing.xml").to_string_lossy().to_string();
    let err = parse_command(&file, None, None, OutputFormat::Text).unwrap_err();
    assert!(
        err.to_string().contains("Failed to read config description file"),
        "unexpected error: {err}"
    );
}

#[test]
fn check_errors_on_trailing_content() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("cd.xml");
    fs::write(
        &file,
        r#"<config-description uri="binding:foo:bar"><parameter name="a" type="text"/><junk/></config-description>"#,
    )
    .unwrap();
    let err = check_command(&file.to_string_lossy(), None, None).unwrap_err();
    assert!(err.to_string().contains("Failed to decode config descriptions"));
    assert!(err.root_cause().to_string().contains("unexpected content 'junk'"));
}

#[test]
fn check_errors_when_config_corrupt() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("cd.xml");
    fs::write(&file, r#"<config-description uri="binding:foo:bar"/>"#).unwrap();
    let cfg = temp.path().join("parser.json");
    fs::write(&cfg, "not-json").unwrap();
    let err =
        check_command(&file.to_string_lossy(), None, Some(&*cfg.to_string_lossy())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse parser config JSON"));
}

#[test]
fn check_succeeds_for_valid_document() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("cd.xml");
    fs::write(&file, r#"<config-description><parameter name="a" type="text"/></config-description>"#)
        .unwrap();
    check_command(&file.to_string_lossy(), Some("thing:baz:1"), None).unwrap();
}
