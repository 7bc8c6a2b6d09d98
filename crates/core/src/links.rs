//! Short-link rewriting.
//!
//! The platform appends a `t.co` short-link to posts that carry media or a
//! quoted post, and replaces every link in the body with one as well. This
//! module removes the appended link and resolves the rest against the
//! entity metadata supplied with the post.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::text::normalize_text;

static TRAILING_SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://t\.co/\w+\s*$").unwrap());
static SHORT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://t\.co/\w+").unwrap());

/// Path fragments marking an expansion that points back into the platform.
const MEDIA_MARKERS: [&str; 3] = ["/status/", "/photo/", "/video/"];

/// A short-link and the destination it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntity {
    /// The `t.co` token as it appears in the text.
    #[serde(rename = "url")]
    pub short_url: String,
    /// The real destination.
    pub expanded_url: String,
}

impl LinkEntity {
    pub fn new(short_url: impl Into<String>, expanded_url: impl Into<String>) -> Self {
        Self { short_url: short_url.into(), expanded_url: expanded_url.into() }
    }

    /// True when the expansion is a post, photo or video on the platform itself.
    pub fn is_media(&self) -> bool {
        MEDIA_MARKERS.iter().any(|marker| self.expanded_url.contains(marker))
    }
}

/// Rewrites short-links in already normalized text.
///
/// A short-link at the very end of the text is always dropped. Every other
/// short-link is replaced by its expansion when that points off-platform,
/// and dropped when it points at media, a quoted post, or has no entity.
pub fn resolve_short_links(text: &str, entities: &[LinkEntity]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = TRAILING_SHORT_LINK_RE.replace(text, "");

    let rewritten = SHORT_LINK_RE.replace_all(&stripped, |caps: &Captures<'_>| {
        let token = &caps[0];
        match entities.iter().find(|entity| entity.short_url == token) {
            Some(entity) if entity.is_media() => {
                tracing::debug!(link = token, "dropping media short-link");
                String::new()
            }
            Some(entity) => {
                tracing::debug!(link = token, expanded = %entity.expanded_url, "expanding short-link");
                entity.expanded_url.clone()
            }
            None => String::new(),
        }
    });

    normalize_text(&rewritten)
}
