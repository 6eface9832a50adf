//! Identifier and string escaping for selector serialization.
//! Spec: <https://drafts.csswg.org/cssom/#serialize-an-identifier>

use core::fmt;
use cssparser::{serialize_identifier, serialize_string};

/// Display adapter over [`serialize_identifier`].
struct Identifier<'text>(&'text str);

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize_identifier(self.0, formatter)
    }
}

/// Display adapter over [`serialize_string`].
struct QuotedString<'text>(&'text str);

impl fmt::Display for QuotedString<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize_string(self.0, formatter)
    }
}

/// Escape a string so it can be used as a CSS identifier.
/// Spec: CSSOM — serialize an identifier
pub fn escape_identifier(ident: &str) -> String {
    Identifier(ident).to_string()
}

/// Escape a string and wrap it in double quotes so it can be used as a CSS string.
/// Spec: CSSOM — serialize a string
pub fn escape_string(text: &str) -> String {
    QuotedString(text).to_string()
}
