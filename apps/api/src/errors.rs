use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders the same envelope: `{statusCode, error, timestamp}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The model service could not be reached or rejected the call.
    #[error("Model invocation failed: {0}")]
    Upstream(String),

    /// The model replied, but the reply failed the envelope check.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_)
            | AppError::MalformedResponse(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable name of the failure class, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound(_) => "NotFound",
            AppError::Upstream(_) => "UpstreamError",
            AppError::MalformedResponse(_) => "MalformedResponse",
            AppError::Database(_) | AppError::Internal(_) => "InternalError",
        }
    }

    /// Message shown to the caller. Database and internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream model error: {msg}");
                self.to_string()
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed model response: {msg}");
                self.to_string()
            }
            AppError::Validation(_) | AppError::NotFound(_) => self.to_string(),
        }
    }
}

/// Malformed request bodies are reported through the same envelope as every other error.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// ISO-8601 UTC timestamp used in every response envelope.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "statusCode": status.as_u16(),
            "error": self.public_message(),
            "timestamp": timestamp_now(),
        }));

        (status, body).into_response()
    }
}
