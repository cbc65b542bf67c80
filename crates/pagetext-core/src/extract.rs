//! Visible-text extraction from an HTML document.
//!
//! Text nodes are collected in document order, trimmed one by one, and the
//! non-empty pieces are joined with a single space. When the markup has a
//! `<body>` only that subtree is read; otherwise the whole document is.

use html5ever::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, HtmlTreeSink, Selector};

/// Elements whose character data is never rendered as text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RAW_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?(?:</script\s*>|$)|<style\b.*?(?:</style\s*>|$)").unwrap()
});
static BODY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body(?:[\s/>]|$)").unwrap());

/// Whether the markup itself contains a `<body>` start tag.
///
/// html5ever always synthesizes a body element, so the parsed tree cannot
/// answer this. Comments and script/style contents are ignored; an unclosed
/// script or style runs to the end of the input.
pub fn has_body_tag(html: &str) -> bool {
    let without_comments = COMMENT_RE.replace_all(html, "");
    let markup = RAW_TEXT_RE.replace_all(&without_comments, "");
    BODY_TAG_RE.is_match(&markup)
}

/// Parse with scripting disabled so `<noscript>` contents become ordinary
/// elements and text instead of one raw text node.
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

/// Extract the visible text of `html`.
///
/// Returns an empty string when the document (or its body) has no
/// non-whitespace text.
pub fn extract_text(html: &str) -> String {
    let document = parse_document(html);

    let body = if has_body_tag(html) {
        document.select(&BODY).next()
    } else {
        None
    };
    let root = match body {
        Some(body) => *body,
        None => document.tree.root(),
    };

    let fragments: Vec<&str> = root
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            })
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect();

    fragments.join(" ")
}
