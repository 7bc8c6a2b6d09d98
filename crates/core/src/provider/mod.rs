//! Post data providers.
//!
//! Each provider turns a [`PostReference`] into a [`ProviderOutcome`].
//! Expected failures (bad schema, rate limiting, timeouts, non-2xx) are
//! reported as outcomes; `Err` is reserved for faults such as a body that is
//! not JSON at all.

pub mod mirror;
pub mod oembed;
pub mod syndication;

use async_trait::async_trait;

use crate::{PostReference, ResolvedPost, Result};

pub use mirror::MirrorProvider;
pub use oembed::OEmbedProvider;
pub use syndication::SyndicationProvider;

/// What a single provider achieved for one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider produced a post with a non-empty body.
    Success(ResolvedPost),
    /// The provider answered but had no usable data.
    NotApplicable,
    /// Network error, timeout, non-2xx, or retries exhausted.
    TransientFailure,
}

impl ProviderOutcome {
    /// Wraps a post, downgrading to [`ProviderOutcome::NotApplicable`] when its body is empty.
    pub(crate) fn from_post(post: ResolvedPost) -> Self {
        if post.text.is_empty() { ProviderOutcome::NotApplicable } else { ProviderOutcome::Success(post) }
    }
}

/// A source of post data tried by the resolver.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempts to resolve `reference`.
    async fn attempt(&self, reference: &PostReference) -> Result<ProviderOutcome>;
}
