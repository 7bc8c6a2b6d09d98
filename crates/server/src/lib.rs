//! HTTP front end for the post resolver.
//!
//! Exposes `POST /api/fetch-tweet`, which wraps [`postgrab_core::Resolver`]
//! in the `{success, data?, error?}` JSON envelope.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::app_router;
pub use state::AppState;
