//! Markup to plain text, keeping only what a reader would see.

use regex::Regex;
use scraper::{Html, Node};
use std::sync::LazyLock;

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

static BLANK_RUNS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Strip markup down to visible plain text.
///
/// Text inside `script`, `style`, and `noscript` is dropped; remaining text
/// nodes are joined with newlines; runs of blank lines collapse to a single
/// blank line; the whole result is trimmed. Malformed markup parses leniently
/// and still yields best-effort text.
pub fn visible_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => HIDDEN_ELEMENTS.contains(&el.name()),
                _ => false,
            });
            if hidden {
                continue;
            }
            raw.push_str(text);
            raw.push('\n');
        }
    }
    BLANK_RUNS_RE.replace_all(&raw, "\n\n").trim().to_string()
}
