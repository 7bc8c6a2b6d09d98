//! Post resolution API.
//!
//! The main entry point is the [`Resolver`], which validates a post URL and
//! then tries its providers strictly in order, returning the first success.
//! The default chain is mirror, then syndication, then embed.
//!
//! # Example
//!
//! ```rust,no_run
//! use postgrab_core::resolve_post;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let post = resolve_post("https://x.com/alice/status/42").await?;
//! println!("{} {}: {}", post.author_name, post.author_handle, post.text);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use crate::fetch::FetchConfig;
use crate::provider::{MirrorProvider, OEmbedProvider, Provider, ProviderOutcome, SyndicationProvider};
use crate::retry::RetryPolicy;
use crate::{PostReference, PostgrabError, ResolvedPost, Result};

/// Configuration for the default provider chain.
///
/// # Example
///
/// ```rust
/// use postgrab_core::ResolverConfig;
///
/// let config = ResolverConfig::builder()
///     .timeout(5)
///     .max_attempts(2)
///     .build();
/// assert_eq!(config.fetch.timeout, 5);
/// assert_eq!(config.retry.max_attempts, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// HTTP settings shared by all providers.
    pub fetch: FetchConfig,
    /// Retry policy for the syndication provider.
    pub retry: RetryPolicy,
}

impl ResolverConfig {
    /// Creates a new builder for ResolverConfig.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::new()
    }
}

/// Builder for ResolverConfig.
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ResolverConfig::default() }
    }

    /// Sets the per-attempt timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the mirror base URL.
    pub fn mirror_base(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.mirror_base = value.into();
        self
    }

    /// Sets the syndication base URL.
    pub fn syndication_base(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.syndication_base = value.into();
        self
    }

    /// Sets the embed base URL.
    pub fn oembed_base(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.oembed_base = value.into();
        self
    }

    /// Sets the language hint for the syndication endpoint.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.lang = value.into();
        self
    }

    /// Sets the syndication attempt budget.
    pub fn max_attempts(mut self, value: u32) -> Self {
        self.config.retry.max_attempts = value;
        self
    }

    /// Sets the backoff unit between syndication attempts.
    pub fn retry_delay(mut self, value: Duration) -> Self {
        self.config.retry.base_delay = value;
        self
    }

    /// Builds the ResolverConfig.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

/// Ordered chain of providers.
///
/// Providers run one after another; a later provider only runs after every
/// earlier one failed, and none runs twice within one resolution.
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
}

impl Resolver {
    /// Creates a resolver with the default chain and configuration.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Creates a resolver with the default chain and custom configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        Self::with_providers(vec![
            Box::new(MirrorProvider::new(config.fetch.clone())),
            Box::new(SyndicationProvider::new(config.fetch.clone(), config.retry)),
            Box::new(OEmbedProvider::new(config.fetch)),
        ])
    }

    /// Creates a resolver over an explicit provider chain.
    pub fn with_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Names of the configured providers, in order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolves a post URL.
    ///
    /// Fails with [`PostgrabError::InvalidUrl`] before any network call when
    /// the URL is malformed, and with [`PostgrabError::NotFound`] when every
    /// provider failed.
    pub async fn resolve(&self, url: &str) -> Result<ResolvedPost> {
        let reference = PostReference::parse(url)?;
        self.resolve_reference(&reference).await
    }

    /// Resolves an already validated reference.
    pub async fn resolve_reference(&self, reference: &PostReference) -> Result<ResolvedPost> {
        for provider in &self.providers {
            tracing::debug!(provider = provider.name(), post_id = %reference.post_id, "trying provider");

            match provider.attempt(reference).await {
                Ok(ProviderOutcome::Success(post)) => {
                    tracing::info!(
                        provider = provider.name(),
                        post_id = %reference.post_id,
                        chars = post.text.chars().count(),
                        "post resolved"
                    );
                    return Ok(post);
                }
                Ok(ProviderOutcome::NotApplicable) => {
                    tracing::debug!(provider = provider.name(), "no usable data");
                }
                Ok(ProviderOutcome::TransientFailure) => {
                    tracing::warn!(provider = provider.name(), "transient failure");
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "provider fault");
                }
            }
        }

        tracing::warn!(post_id = %reference.post_id, "no provider could resolve post");
        Err(PostgrabError::NotFound)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a post URL with the default configuration.
pub async fn resolve_post(url: &str) -> Result<ResolvedPost> {
    Resolver::new().resolve(url).await
}
