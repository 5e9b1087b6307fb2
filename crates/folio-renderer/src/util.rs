//! Shared utility functions for rendering.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped by `encodeURIComponent`: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for use as a URL component (fragment, query value).
///
/// # Examples
///
/// ```
/// use folio_renderer::encode_component;
///
/// assert_eq!(encode_component("Intro"), "Intro");
/// assert_eq!(encode_component("Getting started"), "Getting%20started");
/// ```
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT_ENCODE_SET).to_string()
}

/// Map a document heading level to an HTML heading tag.
///
/// Document headings render one level below the page title: level 1 becomes
/// `h2`, and everything from level 5 down shares `h6`.
#[must_use]
pub(crate) fn heading_tag(level: u8) -> &'static str {
    match level.saturating_add(1) {
        0..=2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
