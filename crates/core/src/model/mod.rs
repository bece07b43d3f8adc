//! Descriptor types produced by the decoders.
//!
//! - `ConfigDescriptor`: a URI plus the ordered parameters it describes.
//! - `ParameterDescriptor`: one typed configuration option.
//! - `ParameterType`, `ParameterOption`, `FilterCriteria`: parts of a parameter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::uri::DescriptorUri;

/// A named bundle of parameter definitions for one addressable entity.
///
/// Immutable once built: fields are private and only exposed read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDescriptor {
    uri: DescriptorUri,
    parameters: Vec<ParameterDescriptor>,
}

impl ConfigDescriptor {
    pub fn new(uri: DescriptorUri, parameters: Vec<ParameterDescriptor>) -> Self {
        Self { uri, parameters }
    }

    pub fn uri(&self) -> &DescriptorUri {
        &self.uri
    }

    /// Parameters in document order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Value type of a configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Text,
    Integer,
    Decimal,
    Boolean,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Text => "text",
            ParameterType::Integer => "integer",
            ParameterType::Decimal => "decimal",
            ParameterType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ParameterType::Text),
            "integer" => Ok(ParameterType::Integer),
            "decimal" => Ok(ParameterType::Decimal),
            "boolean" => Ok(ParameterType::Boolean),
            other => Err(format!(
                "unknown parameter type '{other}'. Allowed: text, integer, decimal, boolean"
            )),
        }
    }
}

/// One selectable value of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOption {
    pub value: String,
    pub label: String,
}

/// A filter criterion narrowing which values a parameter accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub name: String,
    pub value: String,
}

/// One typed configuration option within a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ParameterOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterCriteria>,
}

impl ParameterDescriptor {
    /// A parameter with only its name and type set.
    pub fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            kind,
            context: None,
            default: None,
            label: None,
            description: None,
            min: None,
            max: None,
            step: None,
            pattern: None,
            required: false,
            read_only: false,
            multiple: false,
            options: Vec::new(),
            filter: Vec::new(),
        }
    }
}
