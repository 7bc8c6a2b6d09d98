//! Request handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use postgrab_core::ResolvedPost;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{ApiResponse, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchPostRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

/// Resolves a post URL to its text and author.
///
/// # Endpoint
///
/// `POST /api/fetch-tweet` with body `{"url": "https://x.com/<account>/status/<id>"}`
///
/// # Response Codes
///
/// - **200 OK**: `{"success": true, "data": {text, authorName, authorHandle, tweetUrl}}`
/// - **400 Bad Request**: missing body/`url`, or not a post URL
/// - **404 Not Found**: no provider could retrieve the post
/// - **500 Internal Server Error**: unexpected fault
pub async fn fetch_post_handler(
    State(state): State<AppState>, payload: Result<Json<FetchPostRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ResolvedPost>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        AppError::bad_request("Request body must be JSON with a url field")
    })?;

    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("URL is required"))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("fetch_post", %request_id, url = %url);

    let post = state.resolver.resolve(&url).instrument(span).await?;

    Ok(Json(ApiResponse::ok(post)))
}
