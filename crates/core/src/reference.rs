//! Post URL normalization.
//!
//! Maps every accepted host alias onto the canonical `x.com` host and pulls
//! the numeric post identifier out of the `/status/<digits>` path segment.
//! No network access happens here; a [`PostReference`] only exists for input
//! that matches the accepted grammar.
//!
//! # Example
//!
//! ```rust
//! use postgrab_core::PostReference;
//!
//! let reference = PostReference::parse("https://vxtwitter.com/alice/status/42?s=20").unwrap();
//! assert_eq!(reference.post_id, "42");
//! assert_eq!(reference.canonical_url, "https://x.com/alice/status/42?s=20");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::{PostgrabError, Result};

/// Host aliases accepted in place of the canonical host.
pub const HOST_ALIASES: [&str; 6] = ["twitter", "x", "vxtwitter", "fxtwitter", "fixupx", "fixvx"];

/// Host every alias is rewritten to.
pub const CANONICAL_HOST: &str = "https://x.com";

static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^https?://(?:www\.)?(?:{})\.com", HOST_ALIASES.join("|"))).unwrap()
});

static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://x\.com/[^/?#\s]+/status/(\d+)").unwrap());

/// A validated reference to a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    /// URL exactly as supplied (surrounding whitespace removed).
    pub raw_url: String,
    /// Numeric post identifier.
    pub post_id: String,
    /// URL with the host rewritten to [`CANONICAL_HOST`].
    pub canonical_url: String,
}

impl PostReference {
    /// Parses a user supplied post URL.
    ///
    /// Fails with [`PostgrabError::InvalidUrl`] when the host is not one of
    /// [`HOST_ALIASES`] or the path carries no `/<account>/status/<digits>`.
    pub fn parse(url: &str) -> Result<Self> {
        let raw_url = url.trim();
        let canonical_url = HOST_RE.replace(raw_url, CANONICAL_HOST).into_owned();

        let post_id = STATUS_RE
            .captures(&canonical_url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| PostgrabError::InvalidUrl(raw_url.to_string()))?;

        Ok(Self { raw_url: raw_url.to_string(), post_id, canonical_url })
    }
}

impl FromStr for PostReference {
    type Err = PostgrabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PostReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_url)
    }
}
