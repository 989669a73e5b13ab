//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::cart_store::CartStoreError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::WeakPassword(_) | AuthError::InvalidOrExpiredToken => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidOrExpiredToken => "Invalid or expired reset token".to_string(),
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl AppError {
    /// Whether this error should be reported to Sentry.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) | Self::BadRequest(_) => {
                false
            }
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::PasswordHash | AuthError::Repository(_)
            ),
        }
    }
}

impl From<CartStoreError> for AppError {
    fn from(err: CartStoreError) -> Self {
        Self::Internal(format!("cart session: {err}"))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_errors_map_to_client_codes() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidOrExpiredToken)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::WeakPassword("too short".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_server_errors_reported() {
        assert!(!AppError::NotFound("x".into()).is_server_error());
        assert!(!AppError::BadRequest("x".into()).is_server_error());
        assert!(!AppError::Database(RepositoryError::NotFound).is_server_error());
        assert!(AppError::Internal("x".into()).is_server_error());
        assert!(
            AppError::Database(RepositoryError::DataCorruption("bad".into())).is_server_error()
        );
    }
}
