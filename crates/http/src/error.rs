//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Error response body returned by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "Failed to retrieve books list"}))]
pub struct ErrorBody {
    /// Human readable, endpoint specific failure description
    pub error: String,
}

/// Application error types that map to HTTP responses.
///
/// Only `message` ever reaches the client. The `source` of an internal error
/// is logged together with a generated error id and then dropped.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error with a public message and a private cause
    pub fn internal<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to API consumers
    pub fn public_message(&self) -> &str {
        match self {
            AppError::NotFound { message } | AppError::Internal { message, .. } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let status = self.status();

        match &self {
            AppError::Internal { source, .. } => tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = ?source,
                "Request error"
            ),
            AppError::NotFound { message } => tracing::debug!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                message = %message,
                "Request error"
            ),
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
