//! In-memory XML node tree consumed by the decoders.
//!
//! The tree is deliberately small:
//! - `XmlDocument`: a parsed document with exactly one root element.
//! - `XmlNode`: an element with ordered attributes and ordered content.
//! - `XmlContent`: either a child element or a non-blank run of text.
//! - `NodeCursor`: a forward cursor over one node's content, used by decoders
//!   to consume children and to assert nothing is left behind.

mod cursor;
mod document;

pub use cursor::NodeCursor;
pub use document::XmlDocument;

use thiserror::Error;

/// Error raised while reading raw XML into a node tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed markup reported by the tokenizer.
    #[error("XML parse error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The document ended while elements were still open.
    #[error("Unexpected end of XML; unclosed element '{0}'")]
    UnexpectedEof(String),

    /// The document contains no root element.
    #[error("XML document has no root element")]
    Empty,

    /// A second top-level element (or stray text) after the root.
    #[error("XML document has content after the root element: '{0}'")]
    TrailingContent(String),

    /// Names or text that are not valid UTF-8.
    #[error("Invalid UTF-8 in XML: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// One piece of an element's content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    Element(XmlNode),
    Text(String),
}

impl XmlContent {
    /// Short label used in diagnostics: the element name, or `#text`.
    pub fn describe(&self) -> &str {
        match self {
            XmlContent::Element(node) => node.name(),
            XmlContent::Text(_) => "#text",
        }
    }
}

/// An XML element with its local name, attributes, and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<XmlContent>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Vec::new(), content: Vec::new() }
    }

    /// Builder-style attribute setter; mostly useful for tests.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child setter; mostly useful for tests.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.content.push(XmlContent::Element(child));
        self
    }

    /// Builder-style text setter; mostly useful for tests.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(XmlContent::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn content(&self) -> &[XmlContent] {
        &self.content
    }

    /// Child elements only, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.content.iter().filter_map(|c| match c {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// Concatenated text content of this node (child elements ignored).
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|c| match c {
                XmlContent::Text(t) => Some(t.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn cursor(&self) -> NodeCursor<'_> {
        NodeCursor::new(self)
    }

    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push((name, value));
    }

    pub(crate) fn push_content(&mut self, content: XmlContent) {
        self.content.push(content);
    }
}
