//! Dispatch of nodes to decoders by node name.

use std::collections::HashMap;

use tracing::trace;

use crate::context::ParsingContext;
use crate::error::{ParseError, ParseResult};
use crate::xml::XmlNode;

/// Trait implemented by decoders that turn one kind of node into a `T`.
pub trait NodeDecoder<T>: Send + Sync {
    /// Name of the node this decoder handles.
    fn node_name(&self) -> &'static str;
    fn decode(&self, node: &XmlNode, ctx: &ParsingContext) -> ParseResult<T>;
}

/// Registry for node decoders; nodes are routed by their name.
pub struct DecoderRegistry<T> {
    decoders: HashMap<String, Box<dyn NodeDecoder<T>>>,
}

impl<T> Default for DecoderRegistry<T> {
    fn default() -> Self {
        Self { decoders: HashMap::new() }
    }
}

impl<T> DecoderRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder, replacing any previous one for the same node name.
    pub fn register<D: NodeDecoder<T> + 'static>(&mut self, decoder: D) -> &mut Self {
        self.decoders.insert(decoder.node_name().to_string(), Box::new(decoder));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn NodeDecoder<T>> {
        self.decoders.get(name).map(|d| &**d)
    }

    /// Return a sorted list of registered node names for error messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.decoders.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Decode `node` with the decoder registered for its name.
    pub fn decode(&self, node: &XmlNode, ctx: &ParsingContext) -> ParseResult<T> {
        let decoder = self.get(node.name()).ok_or_else(|| ParseError::UnsupportedNode {
            node: node.name().to_string(),
            known: self.names().join(", "),
        })?;
        trace!(node = %node.name(), "dispatching to decoder");
        decoder.decode(node, ctx)
    }
}

impl<T> std::fmt::Debug for DecoderRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry").field("decoders", &self.names()).finish()
    }
}
