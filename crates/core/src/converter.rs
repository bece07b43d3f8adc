//! Converter for `config-description` nodes.

use tracing::{debug, warn};

use crate::config::{EmptyUriPolicy, ParserConfig};
use crate::context::ParsingContext;
use crate::error::{ParseError, ParseResult};
use crate::model::ConfigDescriptor;
use crate::parameter::ParameterListParser;
use crate::registry::NodeDecoder;
use crate::uri::{parse_uri, DescriptorUri};
use crate::validate::AttributeValidator;
use crate::xml::XmlNode;

pub const CONFIG_DESCRIPTION_NODE: &str = "config-description";

/// Builds a [`ConfigDescriptor`] from one `config-description` node.
///
/// The descriptor URI comes from the node's `uri` attribute when it is present
/// and non-empty, otherwise from the fallback an outer stage inferred. The
/// node's children must be `parameter` elements and nothing else.
#[derive(Debug, Clone)]
pub struct ConfigDescriptorConverter {
    attributes: AttributeValidator,
    parameters: ParameterListParser,
    empty_uri: EmptyUriPolicy,
}

impl Default for ConfigDescriptorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDescriptorConverter {
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            attributes: AttributeValidator::new(&[("uri", false)]),
            parameters: ParameterListParser::new(),
            empty_uri: config.empty_uri,
        }
    }

    /// Convert `node`, using `fallback_uri` when the node names no URI itself.
    pub fn convert(
        &self,
        node: &XmlNode,
        fallback_uri: Option<&str>,
    ) -> ParseResult<ConfigDescriptor> {
        let attrs = self.attributes.read_validated(node)?;
        let uri = self.resolve_uri(node, attrs.get("uri"), fallback_uri)?;

        let mut cursor = node.cursor();
        let parameters = self.parameters.parse_list(&mut cursor)?;
        cursor.assert_end_of_node()?;

        debug!(uri = %uri, parameters = parameters.len(), "config description decoded");
        Ok(ConfigDescriptor::new(uri, parameters))
    }

    fn resolve_uri(
        &self,
        node: &XmlNode,
        attribute: Option<&str>,
        fallback: Option<&str>,
    ) -> ParseResult<DescriptorUri> {
        let candidate = match attribute {
            Some(text) if !text.is_empty() => Some(text),
            Some(_) if self.empty_uri == EmptyUriPolicy::Reject => {
                warn!(node = %node.name(), "empty uri attribute rejected by policy");
                return Err(invalid_uri(node, Some(""), "the uri attribute is empty".into()));
            }
            _ => fallback,
        };

        let Some(text) = candidate else {
            return Err(invalid_uri(
                node,
                None,
                "no uri attribute and no inferred URI in the parsing context".into(),
            ));
        };

        parse_uri(text).map_err(|reason| invalid_uri(node, Some(text), reason))
    }
}

impl NodeDecoder<ConfigDescriptor> for ConfigDescriptorConverter {
    fn node_name(&self) -> &'static str {
        CONFIG_DESCRIPTION_NODE
    }

    fn decode(&self, node: &XmlNode, ctx: &ParsingContext) -> ParseResult<ConfigDescriptor> {
        self.convert(node, ctx.config_description_uri())
    }
}

fn invalid_uri(node: &XmlNode, text: Option<&str>, reason: String) -> ParseError {
    ParseError::InvalidUri {
        text: text.map(str::to_string),
        node: node.name().to_string(),
        reason,
    }
}
