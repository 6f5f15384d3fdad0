//! Inline link placeholders
//!
//! Content files mark hyperlinks with `[[label]]` and keep the target URLs in
//! a separate ordered list. Placeholders are paired with URLs left to right.
//! Authoring mistakes (too few URLs, unbalanced brackets) never fail a parse.

use regex::Regex;
use std::sync::LazyLock;

/// URL used for placeholders that have no matching entry in the link list
pub const DEFAULT_FALLBACK_URL: &str = "#";

/// Shortest `[[...]]` span; placeholders do not nest and labels may span lines
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\[(.*?)\]\]").expect("placeholder pattern is valid"));

/// A piece of rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    /// Literal text
    PlainText {
        /// The text content
        content: String,
    },

    /// A hyperlink
    LinkText {
        /// Visible link text
        label: String,
        /// Link target
        url: String,
    },
}

impl TextSegment {
    /// Create a plain text segment
    pub fn plain(content: impl Into<String>) -> Self {
        TextSegment::PlainText {
            content: content.into(),
        }
    }

    /// Create a link segment
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        TextSegment::LinkText {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Visible text of the segment
    pub fn text(&self) -> &str {
        match self {
            TextSegment::PlainText { content } => content,
            TextSegment::LinkText { label, .. } => label,
        }
    }

    /// Link target, if this is a link
    pub fn url(&self) -> Option<&str> {
        match self {
            TextSegment::PlainText { .. } => None,
            TextSegment::LinkText { url, .. } => Some(url),
        }
    }
}

/// Concatenate the visible text of `segments`
pub fn visible_text(segments: &[TextSegment]) -> String {
    segments.iter().map(TextSegment::text).collect()
}

/// Number of `[[label]]` placeholders in `text`
pub fn placeholder_count(text: &str) -> usize {
    PLACEHOLDER.find_iter(text).count()
}

/// Split `text` into plain and link segments using [`DEFAULT_FALLBACK_URL`]
pub fn parse_inline_links<S: AsRef<str>>(text: &str, links: &[S]) -> Vec<TextSegment> {
    parse_inline_links_with_fallback(text, links, DEFAULT_FALLBACK_URL)
}

/// Split `text` into plain and link segments
///
/// Each `[[label]]` consumes the next URL of `links`; once the list is
/// exhausted `fallback_url` is used instead. Empty literal spans are dropped.
pub fn parse_inline_links_with_fallback<S: AsRef<str>>(
    text: &str,
    links: &[S],
    fallback_url: &str,
) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut urls = links.iter().map(S::as_ref);
    let mut cursor = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&mut segments, &text[cursor..whole.start()]);

        let label = caps.get(1).map_or("", |m| m.as_str());
        let url = urls.next().unwrap_or(fallback_url);
        segments.push(TextSegment::link(label, url));

        cursor = whole.end();
    }
    push_plain(&mut segments, &text[cursor..]);

    segments
}

fn push_plain(segments: &mut Vec<TextSegment>, content: &str) {
    if !content.is_empty() {
        segments.push(TextSegment::plain(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_links_with_surrounding_text() {
        let segments = parse_inline_links(
            "Works at [[Acme]] and [[Beta]] labs",
            &["https://acme.example", "https://beta.example"],
        );
        assert_eq!(
            segments,
            vec![
                TextSegment::plain("Works at "),
                TextSegment::link("Acme", "https://acme.example"),
                TextSegment::plain(" and "),
                TextSegment::link("Beta", "https://beta.example"),
                TextSegment::plain(" labs"),
            ]
        );
        assert_eq!(visible_text(&segments), "Works at Acme and Beta labs");
    }

    #[test]
    fn test_missing_link_uses_fallback() {
        let links: [&str; 0] = [];
        assert_eq!(
            parse_inline_links("[[Solo]]", &links),
            vec![TextSegment::link("Solo", "#")]
        );
    }

    #[test]
    fn test_custom_fallback() {
        let segments =
            parse_inline_links_with_fallback("[[a]] [[b]]", &["u1"], "about:blank");
        assert_eq!(segments[2], TextSegment::link("b", "about:blank"));
    }

    #[test]
    fn test_adjacent_placeholders_have_no_empty_text() {
        assert_eq!(
            parse_inline_links("[[A]][[B]]", &["u1", "u2"]),
            vec![TextSegment::link("A", "u1"), TextSegment::link("B", "u2")]
        );
    }

    #[test]
    fn test_non_greedy_match() {
        let segments = parse_inline_links("[[a]] text [[b]]", &["u1", "u2"]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], TextSegment::plain(" text "));
    }

    #[test]
    fn test_unbalanced_brackets_stay_plain() {
        let links: [&str; 0] = [];
        assert_eq!(
            parse_inline_links("open [[only", &links),
            vec![TextSegment::plain("open [[only")]
        );
        assert_eq!(
            parse_inline_links("close only]] here", &links),
            vec![TextSegment::plain("close only]] here")]
        );
        assert_eq!(
            parse_inline_links("[[[x]] y", &["u1"]),
            vec![TextSegment::link("[x", "u1"), TextSegment::plain(" y")]
        );
    }

    #[test]
    fn test_label_may_span_lines() {
        assert_eq!(
            parse_inline_links("see [[Acme\nLab]] and [[Beta]] now", &["u1", "u2"]),
            vec![
                TextSegment::plain("see "),
                TextSegment::link("Acme\nLab", "u1"),
                TextSegment::plain(" and "),
                TextSegment::link("Beta", "u2"),
                TextSegment::plain(" now"),
            ]
        );
        assert_eq!(placeholder_count("[[a\nb]] [[c]]"), 2);
    }

    #[test]
    fn test_empty_label_consumes_url() {
        assert_eq!(
            parse_inline_links("[[]] then [[x]]", &["u1", "u2"]),
            vec![
                TextSegment::link("", "u1"),
                TextSegment::plain(" then "),
                TextSegment::link("x", "u2"),
            ]
        );
    }

    #[test]
    fn test_extra_links_ignored() {
        assert_eq!(
            parse_inline_links("plain", &["u1"]),
            vec![TextSegment::plain("plain")]
        );
        let links: [&str; 0] = [];
        assert!(parse_inline_links("", &links).is_empty());
    }

    #[test]
    fn test_parse_is_restartable() {
        let links = vec!["u1".to_string()];
        let first = parse_inline_links("[[x]]", &links);
        let second = parse_inline_links("[[x]]", &links);
        assert_eq!(first, second);
    }

    #[test]
    fn test_placeholder_count() {
        assert_eq!(placeholder_count("[[a]] and [[b]] but not [[c"), 2);
        assert_eq!(placeholder_count("none"), 0);
    }
}
