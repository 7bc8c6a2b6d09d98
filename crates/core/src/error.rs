//! Error types for Postgrab operations.
//!
//! This module defines the main error type [`PostgrabError`]. Only
//! [`PostgrabError::InvalidUrl`] and [`PostgrabError::NotFound`] are ever
//! returned by the resolver itself. Decode errors describe a fault inside a
//! single provider and are absorbed by the fallback chain.
//!
//! # Example
//!
//! ```rust
//! use postgrab_core::{PostReference, PostgrabError};
//!
//! match PostReference::parse("https://example.com/not-a-post") {
//!     Ok(reference) => println!("post id: {}", reference.post_id),
//!     Err(PostgrabError::InvalidUrl(input)) => println!("rejected: {input}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Main error type for post resolution.
#[derive(Error, Debug)]
pub enum PostgrabError {
    /// The input is not a recognised post URL.
    ///
    /// Carries the rejected input so callers can echo it back.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The reference was well-formed but no provider returned usable data.
    #[error("Post could not be retrieved from any source")]
    NotFound,

    /// A provider answered with a body that could not be decoded.
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Unexpected fault outside the provider chain.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for PostgrabError {
    fn from(err: serde_json::Error) -> Self {
        PostgrabError::DecodeError(err.to_string())
    }
}

/// Result type alias for PostgrabError.
pub type Result<T> = std::result::Result<T, PostgrabError>;
