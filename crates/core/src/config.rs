//! Parser options, loadable from JSON or YAML.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// How an explicit but empty `uri` attribute is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyUriPolicy {
    /// Behave as if the attribute were absent and use the context fallback.
    #[default]
    Fallback,
    /// Fail with an invalid-URI error.
    Reject,
}

/// Options controlling how config descriptions are decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Policy for `uri=""`.
    pub empty_uri: EmptyUriPolicy,
    /// URI seeded into the parsing context when the caller provides none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_uri: Option<String>,
}

/// Load a parser config from a `.json`, `.yaml` or `.yml` file.
pub fn load_parser_config(path: &Path) -> Result<ParserConfig> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parser config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "json" => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse parser config JSON at {}", path.display())),
        "yaml" | "yml" => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse parser config YAML at {}", path.display())),
        other => Err(anyhow!(
            "Unsupported parser config extension '{}' for {}. Allowed: json, yaml, yml",
            other,
            path.display()
        )),
    }
}
