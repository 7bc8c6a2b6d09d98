//! Alternate-API mirror provider.
//!
//! One GET, no retry. The mirror's text is already expanded, so only the
//! text normalizer runs on it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{Provider, ProviderOutcome};
use crate::fetch::{FetchConfig, endpoint, get_body};
use crate::text::normalize_text;
use crate::{PostReference, ResolvedPost, Result};

#[derive(Debug, Deserialize)]
struct MirrorResponse {
    text: Option<String>,
    user_name: Option<String>,
    user_screen_name: Option<String>,
}

/// Provider backed by the alternate-API mirror (`/Twitter/status/{id}`).
#[derive(Debug, Clone)]
pub struct MirrorProvider {
    config: FetchConfig,
}

impl MirrorProvider {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Provider for MirrorProvider {
    fn name(&self) -> &'static str {
        "mirror"
    }

    async fn attempt(&self, reference: &PostReference) -> Result<ProviderOutcome> {
        let url = endpoint(&self.config.mirror_base, &format!("Twitter/status/{}", reference.post_id))?;
        let timeout = Duration::from_secs(self.config.timeout);

        let body = match get_body(url, &self.config, Some(timeout)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(provider = self.name(), error = %e, "request failed");
                return Ok(ProviderOutcome::TransientFailure);
            }
        };
        tracing::trace!(provider = self.name(), body = %body, "raw response");

        let response: MirrorResponse = serde_json::from_str(&body)?;
        let non_empty = |field: Option<String>| field.filter(|value| !value.is_empty());

        let (Some(text), Some(name), Some(handle)) = (
            non_empty(response.text),
            non_empty(response.user_name),
            non_empty(response.user_screen_name),
        ) else {
            tracing::debug!(provider = self.name(), "response missing text or author fields");
            return Ok(ProviderOutcome::NotApplicable);
        };

        Ok(ProviderOutcome::from_post(ResolvedPost::new(
            normalize_text(&text),
            name,
            format!("@{handle}"),
            reference.raw_url.clone(),
        )))
    }
}
