//! Per-parse side channel shared between decoding stages.

use std::collections::HashMap;

/// Context key under which an outer stage publishes the URI it inferred for
/// the next `config-description` node.
pub const CONFIG_DESCRIPTION_URI_KEY: &str = "config-description.uri";

/// Key/value store threaded through one document parse.
///
/// Create one per parse; it is not meant to be shared between concurrent parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingContext {
    values: HashMap<String, String>,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-seeded with an inferred config-description URI.
    pub fn with_config_description_uri(uri: impl Into<String>) -> Self {
        let mut ctx = Self::new();
        ctx.insert(CONFIG_DESCRIPTION_URI_KEY, uri);
        ctx
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The inferred URI for config descriptions, if an outer stage set one.
    pub fn config_description_uri(&self) -> Option<&str> {
        self.get(CONFIG_DESCRIPTION_URI_KEY)
    }
}
