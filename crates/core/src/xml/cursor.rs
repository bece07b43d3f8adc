use tracing::trace;

use super::{XmlContent, XmlNode};
use crate::error::{ParseError, ParseResult};

/// Forward-only cursor over the content of a single node.
///
/// Decoders pull children off the cursor as they recognise them; whatever is
/// still left when they are done is reported by [`NodeCursor::assert_end_of_node`].
#[derive(Debug, Clone)]
pub struct NodeCursor<'a> {
    node: &'a XmlNode,
    position: usize,
}

impl<'a> NodeCursor<'a> {
    pub fn new(node: &'a XmlNode) -> Self {
        Self { node, position: 0 }
    }

    pub fn node_name(&self) -> &'a str {
        self.node.name()
    }

    pub fn has_more_children(&self) -> bool {
        self.position < self.node.content().len()
    }

    /// Look at the next piece of content without consuming it.
    pub fn peek(&self) -> Option<&'a XmlContent> {
        self.node.content().get(self.position)
    }

    /// Next child element if (and only if) it is named `name`.
    pub fn next_if_named(&mut self, name: &str) -> Option<&'a XmlNode> {
        match self.peek() {
            Some(XmlContent::Element(child)) if child.name() == name => {
                self.position += 1;
                trace!(parent = %self.node.name(), child = %name, "consumed child");
                Some(child)
            }
            _ => None,
        }
    }

    /// Consume the next piece of content, whatever it is.
    pub fn next_child(&mut self) -> Option<&'a XmlContent> {
        let next = self.peek()?;
        self.position += 1;
        Some(next)
    }

    /// Fails unless every piece of content has been consumed.
    pub fn assert_end_of_node(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(leftover) => Err(ParseError::UnexpectedContent {
                node: self.node.name().to_string(),
                found: leftover.describe().to_string(),
            }),
        }
    }
}
