//! Reads XML text into an [`XmlDocument`] using quick-xml.

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use super::{XmlContent, XmlError, XmlNode};

/// A parsed XML document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlNode,
}

impl XmlDocument {
    /// Parse a whole document from text.
    ///
    /// Names are reduced to their local part (`config-description:config-descriptions`
    /// becomes `config-descriptions`). Comments, processing instructions, the XML
    /// declaration and the doctype are dropped. Text is trimmed and blank runs are
    /// discarded.
    pub fn parse_str(input: &str) -> Result<Self, XmlError> {
        trace!(input_len = input.len(), "parsing XML document");
        let mut reader = Reader::from_str(input);

        // Open elements, innermost last, plus the pending text of each.
        let mut stack: Vec<(XmlNode, String)> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let event = reader.read_event().map_err(|e| XmlError::Syntax {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(ref e) => {
                    flush_text(&mut stack);
                    ensure_no_second_root(&root, e)?;
                    let node = element_from_start(e, reader.buffer_position() as u64)?;
                    stack.push((node, String::new()));
                }
                Event::Empty(ref e) => {
                    flush_text(&mut stack);
                    ensure_no_second_root(&root, e)?;
                    let node = element_from_start(e, reader.buffer_position() as u64)?;
                    attach(&mut stack, &mut root, node);
                }
                Event::End(_) => {
                    flush_text(&mut stack);
                    if let Some((node, _)) = stack.pop() {
                        attach(&mut stack, &mut root, node);
                    }
                }
                Event::Text(e) => {
                    let text = e.decode().map_err(|e| XmlError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    push_text(&mut stack, &root, &text, reader.buffer_position() as u64)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(e.as_ref())?;
                    push_text(&mut stack, &root, text, reader.buffer_position() as u64)?;
                }
                Event::GeneralRef(e) => {
                    let raw = e.decode().map_err(|e| XmlError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    let resolved = resolve_entity(&raw, reader.buffer_position() as u64)?;
                    push_text(&mut stack, &root, &resolved, reader.buffer_position() as u64)?;
                }
                Event::Eof => break,
                // Comments, PIs, declaration and doctype carry nothing we decode.
                _ => {}
            }
        }

        if let Some((open, _)) = stack.pop() {
            return Err(XmlError::UnexpectedEof(open.name().to_string()));
        }
        root.map(|root| Self { root }).ok_or(XmlError::Empty)
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    pub fn into_root(self) -> XmlNode {
        self.root
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlNode, XmlError> {
    let local_name = start.local_name();
    let name = std::str::from_utf8(local_name.as_ref())?;
    let mut node = XmlNode::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Syntax { position, message: e.to_string() })?;
        let key = attr.key;
        let qualified = std::str::from_utf8(key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Syntax { position, message: e.to_string() })?;
        // Keep prefixes on attributes so namespace plumbing (xmlns:*, xsi:*)
        // stays distinguishable from real attributes.
        node.push_attribute(qualified, value.into_owned());
    }

    trace!(element = %node.name(), attributes = node.attributes().len(), "element start");
    Ok(node)
}

fn ensure_no_second_root(root: &Option<XmlNode>, start: &BytesStart<'_>) -> Result<(), XmlError> {
    if root.is_some() {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        return Err(XmlError::TrailingContent(name));
    }
    Ok(())
}

fn attach(stack: &mut [(XmlNode, String)], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some((parent, _)) => parent.push_content(XmlContent::Element(node)),
        None => *root = Some(node),
    }
}

fn push_text(
    stack: &mut [(XmlNode, String)],
    root: &Option<XmlNode>,
    text: &str,
    position: u64,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some((_, pending)) => {
            pending.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None if root.is_some() => Err(XmlError::TrailingContent(text.trim().to_string())),
        // Stray text before the root element.
        None => Err(XmlError::Syntax {
            position,
            message: format!("text outside of the root element: '{}'", text.trim()),
        }),
    }
}

fn flush_text(stack: &mut [(XmlNode, String)]) {
    if let Some((node, pending)) = stack.last_mut() {
        let trimmed = pending.trim();
        if !trimmed.is_empty() {
            node.push_content(XmlContent::Text(trimmed.to_string()));
        }
        pending.clear();
    }
}

fn resolve_entity(raw: &str, position: u64) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    let invalid = |what: String| XmlError::Syntax { position, message: what };
    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).map_err(|_| invalid(format!("invalid hex entity: #{rest}")))?
        } else {
            rest.parse::<u32>().map_err(|_| invalid(format!("invalid decimal entity: #{rest}")))?
        };
        let ch = char::from_u32(code).ok_or_else(|| invalid(format!("invalid unicode: {code}")))?;
        return Ok(ch.to_string());
    }

    Err(invalid(format!("unknown entity: &{raw};")))
}
