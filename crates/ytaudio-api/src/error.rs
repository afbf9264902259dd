//! API error types.
//!
//! Failures inside a job are caught at the handler boundary, mapped to the
//! public taxonomy, and surfaced as `{"error": "<public message>"}` with the
//! matching status code. Internal detail is logged server-side only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use ytaudio_jobs::JobError;
use ytaudio_media::MediaError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Rate limited by YouTube. Please try again later.")]
    RateLimited,

    #[error("Failed to fetch audio stream from source: {0}")]
    UpstreamTransport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::VideoNotFound => Self::NotFound("Video unavailable.".to_string()),
            MediaError::VideoPrivate => Self::Forbidden("Video is private.".to_string()),
            MediaError::AgeRestricted => {
                Self::Forbidden("Video is age-restricted and requires login.".to_string())
            }
            MediaError::RateLimited => Self::RateLimited,
            MediaError::UpstreamTransport(msg) => Self::UpstreamTransport(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(e: JobError) -> Self {
        match e {
            JobError::Media(media) => media.into(),
            JobError::EmptyBatch => Self::BadRequest("No video IDs provided".to_string()),
            JobError::BatchTooLarge { .. } => Self::BadRequest(
                "Too many videos requested. Maximum 20 videos per batch.".to_string(),
            ),
            JobError::Io(io) => Self::Internal(io.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail never reaches the caller
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal error");
                "An unexpected error occurred".to_string()
            }
            ApiError::UpstreamTransport(detail) => {
                error!(detail = %detail, "Upstream transport error");
                "Failed to fetch audio stream from source".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_error_mapping() {
        assert_eq!(
            ApiError::from(MediaError::VideoNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MediaError::VideoPrivate).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(MediaError::AgeRestricted).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(MediaError::RateLimited).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::from(MediaError::UpstreamTransport("timeout".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(MediaError::extraction_failed("boom", Some(1))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_batch_errors_are_bad_requests() {
        assert_eq!(
            ApiError::from(JobError::EmptyBatch).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(JobError::BatchTooLarge {
                submitted: 21,
                cap: 20
            })
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
