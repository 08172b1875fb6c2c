use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("contacts feed unavailable: {message}")]
    FeedUnavailable { path: String, message: String },
    #[error("contacts feed malformed: {message}")]
    FeedMalformed { message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl AppError {
    pub fn feed_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FeedUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn feed_malformed(message: impl Into<String>) -> Self {
        Self::FeedMalformed {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::FeedUnavailable { path, message } => {
                tracing::error!(path = %path, error = %message, "contacts feed unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "feed_unavailable",
                    "contacts feed could not be read".to_string(),
                )
            }
            Self::FeedMalformed { message } => {
                tracing::error!(error = %message, "contacts feed malformed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "feed_malformed",
                    "contacts feed could not be parsed".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details: json!({}),
            }),
        )
            .into_response()
    }
}
