use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use marks_db::StoreError;

/// Error taxonomy for the programmatic surface. The wire shape is
/// `{"error": "..."}` plus the status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session, or a token the provider's secret doesn't verify.
    #[error("Unauthorized")]
    Unauthorized,

    /// Session valid but no owner row matches its email.
    #[error("User not found")]
    UserNotFound,

    /// Empty or absent title/url.
    #[error("Missing fields")]
    MissingFields,

    #[error("Internal error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(_) => ApiError::MissingFields,
            other => {
                error!("store error: {}", other);
                ApiError::Internal
            }
        }
    }
}
