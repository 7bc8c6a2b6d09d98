use std::any::Any;
use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::handlers::{fetch_post_handler, health_handler};
use crate::state::AppState;

/// Builds the application router.
///
/// `request_timeout` caps a whole request when set; an expired request is
/// answered with the 500 envelope. Without it, the resolver's per-attempt
/// timeouts are the only deadlines.
///
/// # Endpoints
///
/// - `GET  /health`          - Liveness check
/// - `POST /api/fetch-tweet` - Resolve a post URL
pub fn app_router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/fetch-tweet", post(fetch_post_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let router = match request_timeout {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_service_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    };

    router.layer(CorsLayer::permissive()).layer(CatchPanicLayer::custom(panic_response))
}

async fn handle_service_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out");
    } else {
        tracing::error!(error = %err, "unhandled service error");
    }
    AppError::Internal
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    AppError::Internal.into_response()
}
