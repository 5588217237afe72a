//! Application error type and its HTTP mapping.
//!
//! - [`AppError::Validation`] - client fault (bad emoji, bad host, bad body) → 400
//! - [`AppError::NotFound`] - unknown site or counter on a read → 404
//! - [`AppError::Internal`] - store failure or timeout → 500, details hidden

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::emoji_key::EmojiError;
use crate::utils::hostname::HostnameError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for system faults (the ones worth logging).
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal { .. })
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<EmojiError> for AppError {
    fn from(e: EmojiError) -> Self {
        match e {
            EmojiError::NoEmojiFound => AppError::bad_request(e.to_string(), json!({})),
            EmojiError::InvalidEncoding(ref encoded) => {
                tracing::error!(emoji = %encoded, "Undecodable emoji key in store");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<HostnameError> for AppError {
    fn from(e: HostnameError) -> Self {
        AppError::bad_request(e.to_string(), json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request body", json!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_emoji_error_is_client_fault() {
        let err: AppError = EmojiError::NoEmojiFound.into();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "no emoji found");
    }

    #[test]
    fn test_corrupt_stored_key_is_server_fault() {
        let err: AppError = EmojiError::InvalidEncoding("abc".to_string()).into();
        assert!(err.is_internal());
        assert_eq!(err.to_error_info().message, "Database error");
    }

    #[test]
    fn test_hostname_error_is_client_fault() {
        let err: AppError = HostnameError::NoHostnameFound.into();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_error_info().code, "validation_error");
    }
}
