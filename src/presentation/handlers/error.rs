use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ScoringError, TranscriptionServiceError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

/// Error returned by every handler, rendered as `{error, detail}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            error,
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = self.error, detail = %self.detail, "Request failed");
        } else {
            tracing::warn!(status = %self.status, error = self.error, detail = %self.detail, "Request rejected");
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.error.to_string(),
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        let detail = err.to_string();
        match err {
            ScoringError::Validation(msg) => Self::validation(msg),
            ScoringError::ModelUnavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Model Unavailable", detail)
            }
            ScoringError::InferenceFailure(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Inference Failed", detail)
            }
            ScoringError::Timeout(_) => Self::new(StatusCode::GATEWAY_TIMEOUT, "Timeout", detail),
        }
    }
}

impl From<TranscriptionServiceError> for ApiError {
    fn from(err: TranscriptionServiceError) -> Self {
        let detail = err.to_string();
        match err {
            TranscriptionServiceError::Validation(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Audio Validation Error", detail)
            }
            TranscriptionServiceError::Disabled => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Transcription Disabled",
                "Speech-to-text is not enabled on this server",
            ),
            TranscriptionServiceError::ModelUnavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Model Unavailable", detail)
            }
            TranscriptionServiceError::Failure(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Transcription Failed",
                detail,
            ),
            TranscriptionServiceError::Timeout(_) => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "Timeout", detail)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Audio Validation Error",
                err.body_text(),
            );
        }
        Self::validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
