//! confdesc-core
//!
//! Core library for decoding XML config descriptions: an identifying URI plus
//! an ordered list of typed parameter definitions.
//!
//! This crate holds the XML node tree, the attribute whitelist validator, the
//! parameter decoder, the `config-description` converter, and the registry
//! that routes nodes to decoders by name.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod model;
pub mod parameter;
pub mod reader;
pub mod registry;
pub mod uri;
pub mod validate;
pub mod xml;

pub use config::{EmptyUriPolicy, ParserConfig};
pub use context::{ParsingContext, CONFIG_DESCRIPTION_URI_KEY};
pub use converter::ConfigDescriptorConverter;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use model::{ConfigDescriptor, ParameterDescriptor, ParameterType};
pub use reader::ConfigDescriptionsReader;
pub use uri::DescriptorUri;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
