//! Service configuration loaded from environment variables.
//!
//! ## Variables
//!
//! - `POSTGRAB_LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `POSTGRAB_TIMEOUT_SECS` - Per-attempt provider timeout (default: 10)
//! - `POSTGRAB_USER_AGENT` - User-Agent sent to providers (default: browser-like)
//! - `POSTGRAB_MAX_ATTEMPTS` - Syndication attempt budget (default: 3)
//! - `POSTGRAB_REQUEST_TIMEOUT_SECS` - Whole-request timeout (default: none)
//! - `RUST_LOG` - Log filter (default: `info`)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result};
use postgrab_core::ResolverConfig;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub request_timeout_secs: Option<u64>,
    pub resolver: ResolverConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file, if present, should be loaded before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr = parse_or(&lookup, "POSTGRAB_LISTEN", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let request_timeout_secs = parse_opt(&lookup, "POSTGRAB_REQUEST_TIMEOUT_SECS")?;

        let mut resolver = ResolverConfig::builder()
            .timeout(parse_or(&lookup, "POSTGRAB_TIMEOUT_SECS", 10)?)
            .max_attempts(parse_or(&lookup, "POSTGRAB_MAX_ATTEMPTS", 3)?);
        if let Some(user_agent) = lookup("POSTGRAB_USER_AGENT") {
            resolver = resolver.user_agent(user_agent);
        }

        Ok(Self { listen_addr, request_timeout_secs, resolver: resolver.build() })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| value.trim().parse().with_context(|| format!("{key} has an invalid value: {value}")))
        .transpose()
}
