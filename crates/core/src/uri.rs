//! Descriptor URIs: RFC 3986 URI references kept exactly as written.
//!
//! The text is validated but never normalised, so `as_str()` always returns
//! the source text. Accepted shapes:
//! - absolute opaque: `binding:foo:bar`, `thing-type:hue:bulb`
//! - absolute hierarchical: `http://example.com/a?b#c`
//! - relative references: `hue`, `foo/bar`, `../x`
//!
//! A scheme must be followed by a non-empty part (`binding:` is rejected).
//! Authorities are only checked for their character set, so registry-style
//! authorities such as `a:99999` are accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// A syntactically valid URI reference that remembers its original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorUri {
    text: String,
    scheme_end: Option<usize>,
}

impl DescriptorUri {
    /// Validate `text` as a URI reference, returning a human-readable reason on failure.
    pub fn parse(text: &str) -> Result<Self, String> {
        let scheme_end = validate(text)?;
        Ok(Self { text: text.to_string(), scheme_end })
    }

    /// The URI exactly as it appeared in the document.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Scheme as written (case preserved), if the reference is absolute.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme_end.map(|end| &self.text[..end])
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme_end.is_some()
    }
}

impl fmt::Display for DescriptorUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for DescriptorUri {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DescriptorUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Parse `text` as a descriptor URI.
pub fn parse_uri(text: &str) -> Result<DescriptorUri, String> {
    DescriptorUri::parse(text)
}

/// Returns the byte length of the scheme, if any.
fn validate(text: &str) -> Result<Option<usize>, String> {
    if text.is_empty() {
        return Err("the URI is empty".to_string());
    }
    check_characters(text)?;

    let (before_fragment, fragment) = match text.find('#') {
        Some(i) => (&text[..i], Some((i + 1, &text[i + 1..]))),
        None => (text, None),
    };
    if let Some((offset, fragment)) = fragment {
        if let Some(i) = fragment.find('#') {
            return Err(format!("illegal character '#' in fragment at index {}", offset + i));
        }
    }

    let scheme_end = scheme_end(before_fragment)?;
    let rest = match scheme_end {
        Some(end) => {
            let rest = &before_fragment[end + 1..];
            if rest.is_empty() {
                return Err(format!("expected scheme-specific part at index {}", end + 1));
            }
            rest
        }
        None => before_fragment,
    };
    let rest_offset = scheme_end.map_or(0, |end| end + 1);

    // Opaque URIs (`scheme:` not followed by `/`) only need the character check.
    if scheme_end.is_some() && !rest.starts_with('/') {
        return Ok(scheme_end);
    }

    let (hier, _query) = match rest.find('?') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    let path = match hier.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            check_authority(&after[..end], rest_offset + 2)?;
            &after[end..]
        }
        None => hier,
    };

    if let Some(i) = path.find(['[', ']']) {
        let offset = text.len() - rest.len() + (hier.len() - path.len()) + i;
        return Err(format!("illegal character {:?} in path at index {offset}", &path[i..i + 1]));
    }

    Ok(scheme_end)
}

/// Every character must be RFC 3986 unreserved/reserved or a `%XX` escape.
fn check_characters(text: &str) -> Result<(), String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'%' {
            let escape_ok = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !escape_ok {
                return Err(format!("malformed escape sequence at index {i}"));
            }
            i += 3;
            continue;
        }
        if !is_uri_char(c) {
            let ch = text[i..].chars().next().unwrap_or('?');
            return Err(format!("illegal character {ch:?} at index {i}"));
        }
        i += 1;
    }
    Ok(())
}

/// A scheme is present when a `:` comes before any `/`, `?` or `#`.
fn scheme_end(text: &str) -> Result<Option<usize>, String> {
    let Some(colon) = text.find(':') else {
        return Ok(None);
    };
    if text[..colon].contains(['/', '?']) {
        return Ok(None);
    }
    if colon == 0 {
        return Err("expected scheme name at index 0".to_string());
    }

    let scheme = &text[..colon];
    let mut chars = scheme.char_indices();
    if let Some((_, first)) = chars.next() {
        if !first.is_ascii_alphabetic() {
            return Err(format!("illegal character {first:?} in scheme name at index 0"));
        }
    }
    for (i, c) in chars {
        if !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return Err(format!("illegal character {c:?} in scheme name at index {i}"));
        }
    }
    Ok(Some(colon))
}

/// Brackets are only allowed around an IPv6 literal host.
fn check_authority(authority: &str, offset: usize) -> Result<(), String> {
    let Some(open) = authority.find('[') else {
        return match authority.find(']') {
            Some(i) => Err(format!("illegal character ']' in authority at index {}", offset + i)),
            None => Ok(()),
        };
    };
    let close = authority[open..]
        .find(']')
        .map(|i| open + i)
        .ok_or_else(|| format!("unterminated IPv6 address at index {}", offset + open))?;

    let literal = &authority[open + 1..close];
    let ipv6_ok = !literal.is_empty()
        && literal.contains(':')
        && literal.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
    if !ipv6_ok {
        return Err(format!("malformed IPv6 address at index {}", offset + open));
    }

    let tail = &authority[close + 1..];
    if tail.contains(['[', ']']) || !(tail.is_empty() || tail.starts_with(':')) {
        return Err(format!("illegal content after IPv6 address at index {}", offset + close + 1));
    }
    Ok(())
}

fn is_uri_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            // unreserved
            b'-' | b'.' | b'_' | b'~'
            // gen-delims
            | b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@'
            // sub-delims
            | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_text_verbatim() {
        for text in [
            "binding:foo:bar",
            "thing-type:hue:bulb",
            "http://example.com",
            "Binding:Foo",
            "http://a/b/../c",
            "HTTP://EXAMPLE.COM/x",
            "file:foo",
        ] {
            assert_eq!(parse_uri(text).unwrap().as_str(), text);
        }
    }

    #[test]
    fn reports_scheme_as_written() {
        let uri = parse_uri("Binding:Foo").unwrap();
        assert_eq!(uri.scheme(), Some("Binding"));
        assert!(uri.is_absolute());
        let parsed: DescriptorUri = "Binding:Foo".parse().unwrap();
        assert_eq!(parsed, uri);
    }

    #[test]
    fn accepts_relative_references() {
        for text in ["hue", "foo/bar", "../x", "/abs/path", "?q=1", "#frag", "a/b:c"] {
            let uri = parse_uri(text).unwrap_or_else(|e| panic!("{text}: {e}"));
            assert!(!uri.is_absolute(), "{text} should be relative");
        }
    }

    #[test]
    fn accepts_hierarchical_escaped_and_registry_authorities() {
        assert!(parse_uri("http://example.com/a%20b?x=1#frag").is_ok());
        assert!(parse_uri("http://a:99999/").is_ok());
        assert!(parse_uri("http://[::1]:8080/x").is_ok());
        assert!(parse_uri("binding:foo?x=[1]").is_ok());
    }

    #[test]
    fn rejects_empty_scheme_specific_part() {
        assert!(parse_uri("binding:").unwrap_err().contains("scheme-specific part"));
        assert!(parse_uri("binding:#frag").is_err());
    }

    #[test]
    fn rejects_bad_scheme_names() {
        assert!(parse_uri(":foo").unwrap_err().contains("scheme name"));
        assert!(parse_uri("1http:foo").unwrap_err().contains("scheme name"));
    }

    #[test]
    fn rejects_illegal_characters() {
        assert!(parse_uri("binding:foo bar").unwrap_err().contains("illegal character ' '"));
        assert!(parse_uri("binding:<foo>").is_err());
        assert!(parse_uri(" binding:foo").is_err());
    }

    #[test]
    fn rejects_misplaced_brackets_and_fragments() {
        assert!(parse_uri("http://a/b[1]").unwrap_err().contains("in path"));
        assert!(parse_uri("http://[zz]/").is_err());
        assert!(parse_uri("http://a]b/").is_err());
        assert!(parse_uri("a#b#c").unwrap_err().contains("fragment"));
    }

    #[test]
    fn rejects_broken_escapes_and_empty_text() {
        assert!(parse_uri("binding:foo%zz").unwrap_err().contains("escape"));
        assert!(parse_uri("").is_err());
    }

    #[test]
    fn serializes_as_source_text() {
        let uri = parse_uri("http://example.com").unwrap();
        assert_eq!(serde_json::to_value(&uri).unwrap(), "http://example.com");
    }
}
