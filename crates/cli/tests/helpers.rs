use std::fs;

use confdesc::{build_context, load_descriptors, resolve_parser_config};
use confdesc_core::{EmptyUriPolicy, ParserConfig};
use tempfile::tempdir;

#[test]
fn resolve_parser_config_defaults_without_path() {
    assert_eq!(resolve_parser_config(None).unwrap(), ParserConfig::default());
}

#[test]
fn build_context_prefers_explicit_uri() {
    let config =
        ParserConfig { default_uri: Some("binding:from-config".into()), ..ParserConfig::default() };
    let ctx = build_context(Some("binding:from-flag"), &config);
    assert_eq!(ctx.config_description_uri(), Some("binding:from-flag"));
}

#[test]
fn build_context_falls_back_to_config_default() {
    let config =
        ParserConfig { default_uri: Some("binding:from-config".into()), ..ParserConfig::default() };
    assert_eq!(build_context(None, &config).config_description_uri(), Some("binding:from-config"));
    assert_eq!(build_context(None, &ParserConfig::default()).config_description_uri(), None);
}

#[test]
fn load_descriptors_applies_config_policy() {
    let temp = tempdir().unwrap();
    let xml = temp.path().join("cd.xml");
    fs::write(&xml, r#"<config-description uri=""/>"#).unwrap();
    let cfg = temp.path().join("parser.yaml");
    fs::write(&cfg, "empty_uri: reject\ndefault_uri: \"thing:baz:1\"\n").unwrap();

    let xml_path = xml.to_string_lossy().to_string();
    let cfg_path = cfg.to_string_lossy().to_string();

    // Lenient default: empty attribute falls back to the --uri value.
    let ok = load_descriptors(&xml_path, Some("thing:baz:1"), None).unwrap();
    assert_eq!(ok[0].uri().as_str(), "thing:baz:1");

    let err = load_descriptors(&xml_path, None, Some(&cfg_path)).unwrap_err();
    let root = err.root_cause().to_string();
    assert!(root.contains("is invalid"), "unexpected error: {root}");
    assert_eq!(
        resolve_parser_config(Some(&cfg_path)).unwrap().empty_uri,
        EmptyUriPolicy::Reject
    );
}
