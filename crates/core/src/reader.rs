//! Whole-document reading of config descriptions.

use tracing::debug;

use crate::config::ParserConfig;
use crate::context::ParsingContext;
use crate::converter::ConfigDescriptorConverter;
use crate::error::{ParseError, ParseResult};
use crate::model::ConfigDescriptor;
use crate::registry::DecoderRegistry;
use crate::validate::AttributeValidator;
use crate::xml::{XmlContent, XmlDocument, XmlNode};

pub const CONFIG_DESCRIPTIONS_NODE: &str = "config-descriptions";

/// Reads documents whose root is either `config-descriptions` (a list) or a
/// single decodable node such as `config-description`.
#[derive(Debug)]
pub struct ConfigDescriptionsReader {
    registry: DecoderRegistry<ConfigDescriptor>,
    root_attributes: AttributeValidator,
}

impl Default for ConfigDescriptionsReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDescriptionsReader {
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        let mut registry = DecoderRegistry::new();
        registry.register(ConfigDescriptorConverter::with_config(config));
        Self::with_registry(registry)
    }

    /// Use a custom registry, e.g. one with extra decoders registered.
    pub fn with_registry(registry: DecoderRegistry<ConfigDescriptor>) -> Self {
        Self { registry, root_attributes: AttributeValidator::new(&[]) }
    }

    pub fn registry(&self) -> &DecoderRegistry<ConfigDescriptor> {
        &self.registry
    }

    /// Parse XML text and decode every descriptor in it.
    pub fn read_str(&self, xml: &str, ctx: &ParsingContext) -> ParseResult<Vec<ConfigDescriptor>> {
        let document = XmlDocument::parse_str(xml)?;
        self.read_document(&document, ctx)
    }

    pub fn read_document(
        &self,
        document: &XmlDocument,
        ctx: &ParsingContext,
    ) -> ParseResult<Vec<ConfigDescriptor>> {
        let root = document.root();
        let descriptors = if root.name() == CONFIG_DESCRIPTIONS_NODE {
            self.read_list(root, ctx)?
        } else {
            vec![self.registry.decode(root, ctx)?]
        };
        debug!(root = %root.name(), count = descriptors.len(), "document decoded");
        Ok(descriptors)
    }

    fn read_list(&self, root: &XmlNode, ctx: &ParsingContext) -> ParseResult<Vec<ConfigDescriptor>> {
        self.root_attributes.read_validated(root)?;

        root.content()
            .iter()
            .map(|content| match content {
                XmlContent::Element(child) => self.registry.decode(child, ctx),
                XmlContent::Text(_) => Err(ParseError::UnexpectedContent {
                    node: root.name().to_string(),
                    found: content.describe().to_string(),
                }),
            })
            .collect()
    }
}
