use std::collections::HashSet;

use ammonia::{Builder, UrlRelative};
use once_cell::sync::Lazy;

/// Strips every tag and keeps the text content. Descriptions and log notes are
/// rendered as plain text by the client.
static PLAIN_TEXT: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::new())
        .clean_content_tags(HashSet::from(["script", "style"]))
        .url_relative(UrlRelative::Deny);
    builder
});

pub fn sanitize_text(input: &str) -> String {
    let cleaned = PLAIN_TEXT.clean(input).to_string();
    decode_basic_entities(cleaned.trim())
}

/// ammonia escapes text for HTML output; the API returns JSON so the
/// common entities are turned back into characters.
fn decode_basic_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_scripts() {
        let out = sanitize_text("Hi <b>there</b><script>alert(1)</script>");
        assert_eq!(out, "Hi there");
    }

    #[test]
    fn keeps_plain_punctuation() {
        assert_eq!(sanitize_text("R&D: 3 > 2"), "R&D: 3 > 2");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_text("  spaced  "), "spaced");
    }
}
