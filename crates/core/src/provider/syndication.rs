//! Syndication endpoint provider.
//!
//! Retries rate-limited and failed requests under a [`RetryPolicy`] and
//! understands both the short-post and the long-form response shapes.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{Provider, ProviderOutcome};
use crate::fetch::{AttemptError, FetchConfig, endpoint, get_body};
use crate::links::{LinkEntity, resolve_short_links};
use crate::retry::RetryPolicy;
use crate::text::normalize_text;
use crate::{PostReference, ResolvedPost, Result};

#[derive(Debug, Default, Deserialize)]
struct SyndicationResponse {
    text: Option<String>,
    full_text: Option<String>,
    user: Option<SyndicationUser>,
    note_tweet: Option<NoteTweet>,
    entities: Option<EntitySet>,
}

#[derive(Debug, Deserialize)]
struct SyndicationUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    screen_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct NoteTweet {
    note_tweet_results: Option<NoteTweetResults>,
}

#[derive(Debug, Default, Deserialize)]
struct NoteTweetResults {
    result: Option<NoteTweetResult>,
}

#[derive(Debug, Default, Deserialize)]
struct NoteTweetResult {
    text: Option<String>,
    entity_set: Option<EntitySet>,
}

#[derive(Debug, Default, Deserialize)]
struct EntitySet {
    urls: Option<Vec<LinkEntity>>,
}

/// Text and the entity list that belongs to it.
#[derive(Debug, PartialEq)]
struct TextShape<'a> {
    label: &'static str,
    text: &'a str,
    entities: &'a [LinkEntity],
}

type ShapeRule = for<'a> fn(&'a SyndicationResponse) -> Option<TextShape<'a>>;

/// Extraction rules in priority order; the first populated shape wins.
const SHAPE_RULES: [ShapeRule; 3] = [long_form_shape, full_text_shape, text_shape];

impl SyndicationResponse {
    fn long_form(&self) -> Option<&NoteTweetResult> {
        self.note_tweet.as_ref()?.note_tweet_results.as_ref()?.result.as_ref()
    }

    fn top_level_entities(&self) -> &[LinkEntity] {
        self.entities.as_ref().and_then(|set| set.urls.as_deref()).unwrap_or_default()
    }

    fn select_shape(&self) -> Option<TextShape<'_>> {
        SHAPE_RULES.iter().find_map(|rule| rule(self))
    }
}

fn populated(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|text| !text.is_empty())
}

fn long_form_shape(response: &SyndicationResponse) -> Option<TextShape<'_>> {
    let result = response.long_form()?;
    let text = populated(result.text.as_ref())?;
    // A present long-form list wins even when empty.
    let entities = match result.entity_set.as_ref().and_then(|set| set.urls.as_deref()) {
        Some(urls) => urls,
        None => response.top_level_entities(),
    };
    Some(TextShape { label: "long_form", text, entities })
}

fn full_text_shape(response: &SyndicationResponse) -> Option<TextShape<'_>> {
    let text = populated(response.full_text.as_ref())?;
    Some(TextShape { label: "full_text", text, entities: response.top_level_entities() })
}

fn text_shape(response: &SyndicationResponse) -> Option<TextShape<'_>> {
    let text = populated(response.text.as_ref())?;
    Some(TextShape { label: "text", text, entities: response.top_level_entities() })
}

/// Provider backed by the syndication endpoint (`/tweet-result`).
#[derive(Debug, Clone)]
pub struct SyndicationProvider {
    config: FetchConfig,
    retry: RetryPolicy,
}

impl SyndicationProvider {
    pub fn new(config: FetchConfig, retry: RetryPolicy) -> Self {
        Self { config, retry }
    }

    fn parse(&self, body: &str, reference: &PostReference) -> Result<ProviderOutcome> {
        let response: SyndicationResponse = serde_json::from_str(body)?;

        let (Some(shape), Some(user)) = (response.select_shape(), response.user.as_ref()) else {
            tracing::debug!(provider = self.name(), "response missing text or user");
            return Ok(ProviderOutcome::NotApplicable);
        };

        tracing::debug!(
            provider = self.name(),
            shape = shape.label,
            chars = shape.text.chars().count(),
            links = shape.entities.len(),
            "selected text shape"
        );

        let text = resolve_short_links(&normalize_text(shape.text), shape.entities);

        Ok(ProviderOutcome::from_post(ResolvedPost::new(
            text,
            user.name.clone(),
            format!("@{}", user.screen_name),
            reference.raw_url.clone(),
        )))
    }
}

#[async_trait]
impl Provider for SyndicationProvider {
    fn name(&self) -> &'static str {
        "syndication"
    }

    async fn attempt(&self, reference: &PostReference) -> Result<ProviderOutcome> {
        let mut url = endpoint(&self.config.syndication_base, "tweet-result")?;
        url.query_pairs_mut()
            .append_pair("id", &reference.post_id)
            .append_pair("lang", &self.config.lang)
            .append_pair("token", "x");
        let timeout = Duration::from_secs(self.config.timeout);

        let fetched = self
            .retry
            .run(
                |attempt| {
                    tracing::debug!(provider = self.name(), attempt, "requesting");
                    get_body(url.clone(), &self.config, Some(timeout))
                },
                AttemptError::is_retryable,
            )
            .await;

        match fetched {
            Ok(body) => {
                tracing::trace!(provider = self.name(), body = %body, "raw response");
                self.parse(&body, reference)
            }
            Err(e) => {
                tracing::warn!(provider = self.name(), error = %e, "giving up");
                Ok(ProviderOutcome::TransientFailure)
            }
        }
    }
}
