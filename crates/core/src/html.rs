//! Text extraction from embed-widget markup.
//!
//! The embed endpoint returns a `<blockquote>` fragment whose paragraphs hold
//! the post body. Anchors keep their visible text, every other tag is
//! dropped, and entities are decoded by the HTML parser.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::text::normalize_text;

static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static PROFILE_HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:twitter\.com|x\.com)/(\w+)").unwrap());

/// Extracts normalized post text from an embed HTML fragment.
///
/// Paragraphs are trimmed, empty ones discarded, and the rest joined with a
/// blank line between them. `<br>` inside a paragraph becomes a newline.
///
/// # Example
///
/// ```rust
/// use postgrab_core::extract_embed_text;
///
/// let html = r#"<blockquote><p>Hello <a href="https://t.co/x">world</a> &amp; friends</p></blockquote>"#;
/// assert_eq!(extract_embed_text(html), "Hello world & friends");
/// ```
pub fn extract_embed_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    let paragraphs: Vec<String> = fragment
        .select(&PARAGRAPH_SELECTOR)
        .map(paragraph_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    normalize_text(&paragraphs.join("\n\n"))
}

/// Collects the visible text of one paragraph.
fn paragraph_text(paragraph: ElementRef<'_>) -> String {
    let mut output = String::new();

    for node in paragraph.descendants() {
        match node.value() {
            Node::Text(text) => output.push_str(text),
            Node::Element(element) if element.name() == "br" => output.push('\n'),
            _ => {}
        }
    }

    output
}

/// Derives an `@handle` from an author profile URL.
pub fn handle_from_profile_url(url: &str) -> Option<String> {
    PROFILE_HANDLE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("@{}", m.as_str()))
}
