//! Whitelist validation of a node's attributes.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{ParseError, ParseResult};
use crate::xml::XmlNode;

/// Attributes of one node after validation, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    values: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a whitelisted required attribute.
    ///
    /// Validation already guaranteed presence, so an empty string stands in for
    /// a validator that was configured differently than the caller assumes.
    pub fn required(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Checks a node's attributes against a fixed `name -> required?` whitelist.
#[derive(Debug, Clone)]
pub struct AttributeValidator {
    allowed: Vec<(&'static str, bool)>,
}

impl AttributeValidator {
    pub fn new(allowed: &[(&'static str, bool)]) -> Self {
        Self { allowed: allowed.to_vec() }
    }

    /// Validate and collect the attributes of `node`.
    ///
    /// Namespace declarations and `xsi:*` attributes are structural and are
    /// skipped rather than reported as unknown.
    pub fn read_validated(&self, node: &XmlNode) -> ParseResult<AttributeMap> {
        let mut values = BTreeMap::new();

        for (name, value) in node.attributes() {
            if is_structural(name) {
                continue;
            }
            if !self.allowed.iter().any(|(allowed, _)| allowed == name) {
                return Err(ParseError::UnknownAttribute {
                    node: node.name().to_string(),
                    attribute: name.clone(),
                });
            }
            values.insert(name.clone(), value.clone());
        }

        for (name, required) in &self.allowed {
            if *required && !values.contains_key(*name) {
                return Err(ParseError::MissingAttribute {
                    node: node.name().to_string(),
                    attribute: name.to_string(),
                });
            }
        }

        trace!(node = %node.name(), count = values.len(), "attributes validated");
        Ok(AttributeMap { values })
    }
}

fn is_structural(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:") || name.starts_with("xsi:")
}
