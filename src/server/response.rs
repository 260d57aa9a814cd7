use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::views;
use crate::error::Error;

/// Failure of a page request. Rendered as the generic 404 or 500 page; the
/// cause is logged, never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    NotFound,
    Internal,
}

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound => PageError::NotFound,
            Error::Forbidden | Error::Unauthorized => {
                tracing::warn!("Admin login required");
                PageError::NotFound
            }
            other => {
                tracing::error!("Request failed: {other}");
                PageError::Internal
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, views::not_found()).into_response(),
            PageError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, views::internal_error()).into_response()
            }
        }
    }
}

/// Body of a `/shorten` response: `{"short_id": ...}` or `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResponse {
    Created { short_id: String },
    Failed { error: String },
}

impl ShortenResponse {
    #[must_use]
    pub fn created(short_id: impl Into<String>) -> Self {
        Self::Created {
            short_id: short_id.into(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }
}

/// Maps a link creation failure to a JSON error. Storage details stay in the log.
pub fn shorten_error(err: Error) -> (StatusCode, Json<ShortenResponse>) {
    let (status, message) = match err {
        Error::Forbidden | Error::Unauthorized => {
            tracing::warn!("Admin login required");
            (StatusCode::NOT_FOUND, "Admin login required".to_string())
        }
        Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!("Failed to create link: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    };
    (status, Json(ShortenResponse::failed(message)))
}
