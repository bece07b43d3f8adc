use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use confdesc_core::config::load_parser_config;
use confdesc_core::{ConfigDescriptionsReader, ConfigDescriptor, ParserConfig, ParsingContext};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests driving several commands) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the parser config at `path`, or the defaults when no path is given.
pub fn resolve_parser_config(path: Option<&str>) -> Result<ParserConfig> {
    match path {
        Some(p) => load_parser_config(Path::new(p)),
        None => Ok(ParserConfig::default()),
    }
}

/// Build the parsing context for one document.
///
/// An explicit `--uri` takes precedence over the config's `default_uri`.
pub fn build_context(uri: Option<&str>, config: &ParserConfig) -> ParsingContext {
    match uri.or(config.default_uri.as_deref()) {
        Some(uri) => ParsingContext::with_config_description_uri(uri),
        None => ParsingContext::new(),
    }
}

/// Read `file` and decode every config description in it.
pub fn load_descriptors(
    file: &str,
    uri: Option<&str>,
    config_path: Option<&str>,
) -> Result<Vec<ConfigDescriptor>> {
    let config = resolve_parser_config(config_path)?;
    let xml = fs::read_to_string(file)
        .with_context(|| format!("Failed to read config description file {file}"))?;
    let ctx = build_context(uri, &config);
    let descriptors = ConfigDescriptionsReader::with_config(&config)
        .read_str(&xml, &ctx)
        .with_context(|| format!("Failed to decode config descriptions in {file}"))?;
    debug!(file, count = descriptors.len(), "config descriptions loaded");
    Ok(descriptors)
}
