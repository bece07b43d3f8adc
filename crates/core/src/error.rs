//! Error types shared by every decoder in the crate.

use thiserror::Error;

use crate::xml::XmlError;

/// Error raised while turning a node tree into descriptors.
///
/// Every variant carries the name of the node it was raised for so a failure
/// deep inside a document can still be located by a human.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The node carries an attribute outside its whitelist.
    #[error("The attribute '{attribute}' in node '{node}' is not supported!")]
    UnknownAttribute { node: String, attribute: String },

    /// A whitelisted attribute marked as required is missing.
    #[error("The attribute '{attribute}' in node '{node}' is missing!")]
    MissingAttribute { node: String, attribute: String },

    /// No usable URI text was found, or the text is not a valid absolute URI.
    #[error(
        "The URI '{}' in node '{node}' is invalid: {reason}",
        .text.as_deref().unwrap_or("<none>")
    )]
    InvalidUri { text: Option<String>, node: String, reason: String },

    /// Content is left over after all expected children were consumed.
    #[error("The node '{node}' contains unexpected content '{found}'!")]
    UnexpectedContent { node: String, found: String },

    /// A child element that the parent does not know how to hold.
    #[error("The node '{parent}' contains an unexpected child '{found}'; expected one of: {expected}")]
    UnexpectedNode { parent: String, found: String, expected: String },

    /// An attribute or element value that cannot be interpreted.
    #[error("The value '{value}' of '{field}' in node '{node}' is invalid: {reason}")]
    InvalidValue { node: String, field: String, value: String, reason: String },

    /// No decoder is registered for the node name.
    #[error("No decoder registered for node '{node}' (known: {known})")]
    UnsupportedNode { node: String, known: String },

    /// The document itself could not be read.
    #[error(transparent)]
    Xml(#[from] XmlError),
}

/// Copyable discriminant of [`ParseError`], handy for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownAttribute,
    MissingAttribute,
    InvalidUri,
    UnexpectedContent,
    UnexpectedNode,
    InvalidValue,
    UnsupportedNode,
    Xml,
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnknownAttribute { .. } => ParseErrorKind::UnknownAttribute,
            ParseError::MissingAttribute { .. } => ParseErrorKind::MissingAttribute,
            ParseError::InvalidUri { .. } => ParseErrorKind::InvalidUri,
            ParseError::UnexpectedContent { .. } => ParseErrorKind::UnexpectedContent,
            ParseError::UnexpectedNode { .. } => ParseErrorKind::UnexpectedNode,
            ParseError::InvalidValue { .. } => ParseErrorKind::InvalidValue,
            ParseError::UnsupportedNode { .. } => ParseErrorKind::UnsupportedNode,
            ParseError::Xml(_) => ParseErrorKind::Xml,
        }
    }
}

/// Convenience result type for decoding operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_uri_message_names_text_and_node() {
        let err = ParseError::InvalidUri {
            text: Some("bad uri".into()),
            node: "config-description".into(),
            reason: "illegal character ' '".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'bad uri'"), "unexpected message: {msg}");
        assert!(msg.contains("'config-description'"), "unexpected message: {msg}");
    }

    #[test]
    fn invalid_uri_message_marks_missing_text() {
        let err = ParseError::InvalidUri {
            text: None,
            node: "config-description".into(),
            reason: "no URI given".into(),
        };
        assert!(err.to_string().contains("'<none>'"));
        assert_eq!(err.kind(), ParseErrorKind::InvalidUri);
    }
}
