use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postgrab_core::PostgrabError;
use serde::Serialize;

/// JSON envelope returned by every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    InvalidUrl,
    NotFound,
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, "validation_error", message.clone()),
            AppError::InvalidUrl => (
                StatusCode::BAD_REQUEST,
                "invalid_url",
                "Enter a valid X/Twitter post URL".to_string(),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Could not retrieve the post. Check that the URL is correct.".to_string(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An error occurred while fetching the post".to_string(),
            ),
        }
    }
}

impl From<PostgrabError> for AppError {
    fn from(err: PostgrabError) -> Self {
        match err {
            PostgrabError::InvalidUrl(_) => AppError::InvalidUrl,
            PostgrabError::NotFound => AppError::NotFound,
            other => {
                tracing::error!(error = %other, "unexpected resolver error");
                AppError::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body: ApiResponse<()> =
            ApiResponse { success: false, data: None, error: Some(ErrorInfo { code, message }) };

        (status, Json(body)).into_response()
    }
}
