//! Embed-widget (oEmbed) fallback provider.
//!
//! One GET without retry or explicit timeout. The body text is scraped from
//! the returned HTML fragment and the handle is derived from the author's
//! profile URL.

use async_trait::async_trait;
use serde::Deserialize;

use super::{Provider, ProviderOutcome};
use crate::fetch::{FetchConfig, endpoint, get_body};
use crate::html::{extract_embed_text, handle_from_profile_url};
use crate::{PostReference, ResolvedPost, Result};

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    html: Option<String>,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    author_url: String,
}

/// Provider backed by the embed endpoint (`/oembed`).
#[derive(Debug, Clone)]
pub struct OEmbedProvider {
    config: FetchConfig,
}

impl OEmbedProvider {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Provider for OEmbedProvider {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn attempt(&self, reference: &PostReference) -> Result<ProviderOutcome> {
        let mut url = endpoint(&self.config.oembed_base, "oembed")?;
        url.query_pairs_mut()
            .append_pair("url", &reference.raw_url)
            .append_pair("omit_script", "true");

        let body = match get_body(url, &self.config, None).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(provider = self.name(), error = %e, "request failed");
                return Ok(ProviderOutcome::TransientFailure);
            }
        };
        tracing::trace!(provider = self.name(), body = %body, "raw response");

        let response: OEmbedResponse = serde_json::from_str(&body)?;
        let Some(html) = response.html.filter(|html| !html.trim().is_empty()) else {
            tracing::debug!(provider = self.name(), "response carries no html");
            return Ok(ProviderOutcome::NotApplicable);
        };

        let author_handle = handle_from_profile_url(&response.author_url).unwrap_or_default();

        Ok(ProviderOutcome::from_post(ResolvedPost::new(
            extract_embed_text(&html),
            response.author_name,
            author_handle,
            reference.raw_url.clone(),
        )))
    }
}
