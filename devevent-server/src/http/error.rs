//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devevent_core::ValidationError;
use serde_json::json;

use crate::error::StoreError;
use crate::media::MediaError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed request outside field validation (400)
    BadRequest { message: String },

    /// Uniqueness or dependency conflict (409)
    Conflict { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Missing server setting (500)
    Configuration { message: String },

    /// Store error (500, logged)
    Store(StoreError),

    /// Media upload failed (500, logged)
    Media(MediaError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Configuration { message } => {
                tracing::error!("Configuration error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "configuration_error",
                        "message": message
                    }),
                )
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                internal()
            }
            Self::Media(e) => {
                tracing::error!("Media upload error: {}", e);
                internal()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "internal_error",
            "message": "an internal error occurred"
        }),
    )
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(e) => Self::Validation(e),
            StoreError::Conflict(message) => Self::Conflict { message },
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            StoreError::Configuration(message) => Self::Configuration { message },
            other => Self::Store(other),
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::EmptyPayload => Self::BadRequest {
                message: "image file is empty".into(),
            },
            MediaError::NotConfigured => Self::Configuration {
                message: "media store is not configured".into(),
            },
            other => Self::Media(other),
        }
    }
}
