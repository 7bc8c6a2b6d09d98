pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod html;
pub mod links;
pub mod post;
#[cfg(feature = "fetch")]
pub mod provider;
pub mod reference;
#[cfg(feature = "fetch")]
pub mod resolver;
#[cfg(feature = "fetch")]
pub mod retry;
pub mod text;

pub use error::{PostgrabError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{AttemptError, FetchConfig};
pub use html::{extract_embed_text, handle_from_profile_url};
pub use links::{LinkEntity, resolve_short_links};
pub use post::{OutputFormat, ResolvedPost};
#[cfg(feature = "fetch")]
pub use provider::{MirrorProvider, OEmbedProvider, Provider, ProviderOutcome, SyndicationProvider};
pub use reference::{CANONICAL_HOST, HOST_ALIASES, PostReference};
#[cfg(feature = "fetch")]
pub use resolver::{Resolver, ResolverConfig, ResolverConfigBuilder, resolve_post};
#[cfg(feature = "fetch")]
pub use retry::RetryPolicy;
pub use text::normalize_text;
