//! Whitespace and newline canonicalization shared by every provider.

use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes post text.
///
/// 1. Runs of horizontal whitespace collapse to a single space.
/// 2. Three or more consecutive newlines collapse to two.
/// 3. Every line is trimmed.
/// 4. The whole text is trimmed.
///
/// Carriage returns count as horizontal whitespace, so `\r\n` line endings
/// come out as `\n`.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let collapsed = HORIZONTAL_WS_RE.replace_all(text, " ");
    let collapsed = BLANK_RUN_RE.replace_all(&collapsed, "\n\n");

    collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
