//! Resolved post output type and its output formats.

use serde::{Deserialize, Serialize};

use crate::{PostgrabError, Result};

/// Output format options for a [`ResolvedPost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Author line followed by the body text.
    Text,
    /// JSON object with camelCase keys.
    Json,
}

/// The normalized result of resolving a post URL.
///
/// `text` is never empty and carries no leading or trailing whitespace.
/// `author_handle` starts with `@` unless the source could not provide one,
/// in which case it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPost {
    /// Normalized body text.
    pub text: String,
    /// Author display name.
    pub author_name: String,
    /// Author handle including the leading `@`.
    pub author_handle: String,
    /// The URL the caller asked for.
    pub tweet_url: String,
}

impl ResolvedPost {
    pub fn new(text: String, author_name: String, author_handle: String, tweet_url: String) -> Self {
        Self { text, author_name, author_handle, tweet_url }
    }

    /// Converts the post to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(|e| PostgrabError::Internal(e.to_string())),
        }
    }

    /// Gets the post as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| PostgrabError::Internal(e.to_string()))
    }

    /// Gets the post as plain text with an author header.
    pub fn to_text(&self) -> String {
        let header = match (self.author_name.is_empty(), self.author_handle.is_empty()) {
            (false, false) => format!("{} ({})", self.author_name, self.author_handle),
            (false, true) => self.author_name.clone(),
            (true, false) => self.author_handle.clone(),
            (true, true) => String::new(),
        };

        if header.is_empty() { self.text.clone() } else { format!("{}\n\n{}", header, self.text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolvedPost {
        ResolvedPost::new(
            "Hello\n\nworld".to_string(),
            "Alice".to_string(),
            "@alice".to_string(),
            "https://x.com/alice/status/42".to_string(),
        )
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = sample().to_json().unwrap();
        assert_eq!(json["text"], "Hello\n\nworld");
        assert_eq!(json["authorName"], "Alice");
        assert_eq!(json["authorHandle"], "@alice");
        assert_eq!(json["tweetUrl"], "https://x.com/alice/status/42");
    }

    #[test]
    fn test_text_format() {
        assert_eq!(sample().to_text(), "Alice (@alice)\n\nHello\n\nworld");
    }

    #[test]
    fn test_text_format_without_handle() {
        let post = ResolvedPost { author_handle: String::new(), ..sample() };
        assert_eq!(post.to_format(OutputFormat::Text).unwrap(), "Alice\n\nHello\n\nworld");
    }

    #[test]
    fn test_json_format_string() {
        let out = sample().to_format(OutputFormat::Json).unwrap();
        let back: ResolvedPost = serde_json::from_str(&out).unwrap();
        assert_eq!(back, sample());
    }
}
