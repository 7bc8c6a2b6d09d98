//! HTTP configuration and the single GET helper every provider uses.
//!
//! Each call builds its own client so no connection state is shared
//! between resolutions.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{PostgrabError, Result};

/// HTTP client configuration for provider requests.
///
/// Controls the per-attempt timeout, the User-Agent and the base URL of each
/// provider. Base URLs are overridable so the providers can be pointed at a
/// local double.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-attempt timeout in seconds for the mirror and syndication providers.
    pub timeout: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Base URL of the alternate-API mirror.
    pub mirror_base: String,
    /// Base URL of the syndication endpoint.
    pub syndication_base: String,
    /// Base URL of the embed (oEmbed) endpoint.
    pub oembed_base: String,
    /// Language hint passed to the syndication endpoint.
    pub lang: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            mirror_base: "https://api.vxtwitter.com".to_string(),
            syndication_base: "https://cdn.syndication.twimg.com".to_string(),
            oembed_base: "https://publish.twitter.com".to_string(),
            lang: "ja".to_string(),
        }
    }
}

/// Why a single HTTP attempt produced no body.
#[derive(Debug)]
pub enum AttemptError {
    /// HTTP 429.
    RateLimited,
    /// Any other non-2xx status.
    Status(StatusCode),
    /// The per-attempt timeout expired.
    Timeout,
    /// Connection, DNS or body read failure.
    Network(reqwest::Error),
}

impl AttemptError {
    /// Rate limiting and transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AttemptError::Status(_))
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::RateLimited => f.write_str("rate limited (429)"),
            AttemptError::Status(status) => write!(f, "unexpected status {status}"),
            AttemptError::Timeout => f.write_str("timed out"),
            AttemptError::Network(e) => write!(f, "network error: {e}"),
        }
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { AttemptError::Timeout } else { AttemptError::Network(err) }
    }
}

/// Joins `path` onto a provider base URL.
pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url> {
    let base = Url::parse(base).map_err(|e| PostgrabError::InvalidUrl(format!("{base}: {e}")))?;
    base.join(path).map_err(|e| PostgrabError::InvalidUrl(format!("{path}: {e}")))
}

/// Performs one GET and returns the body of a 2xx response.
///
/// `timeout` of `None` leaves the client without an explicit deadline.
pub(crate) async fn get_body(
    url: Url, config: &FetchConfig, timeout: Option<Duration>,
) -> std::result::Result<String, AttemptError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(AttemptError::Network)?;

    let response = client
        .get(url)
        .header(USER_AGENT, &config.user_agent)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AttemptError::RateLimited);
    }
    if !status.is_success() {
        return Err(AttemptError::Status(status));
    }

    Ok(response.text().await?)
}
