//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! # Response shapes
//!
//! - Validation failures: `400` with a field → messages map
//! - Top-level failures: `{"error": "..."}` with `400` or `403`
//! - Duplicate registration: the same `email` field error as validation
//! - Missing resources: `404` with an empty body
//! - Server errors: `500 {"error": "Internal server error"}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use hotel_booking_core::FieldErrors;
use hotel_booking_core::validation::messages;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found")]
    NotFound,

    /// Caller is not authenticated or not allowed to act.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// The caller sent no usable credentials.
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::Forbidden("Authentication credentials were not provided.".to_owned())
    }

    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Session(_) => true,
            Self::Auth(err) => !matches!(
                err,
                AuthError::InvalidCredentials | AuthError::UserAlreadyExists
            ),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }

        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Forbidden(message) => {
                (StatusCode::FORBIDDEN, Json(json!({"error": message}))).into_response()
            }
            Self::Auth(AuthError::UserAlreadyExists) => (
                StatusCode::BAD_REQUEST,
                Json(FieldErrors::single("email", messages::EMAIL_TAKEN)),
            )
                .into_response(),
            Self::Auth(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid email or password."})),
            )
                .into_response(),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
            }
            Self::Database(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    fn pool_timeout() -> AppError {
        AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn body_of(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::not_authenticated()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation(FieldErrors::single("name", "x"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(pool_timeout()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_is_field_map() {
        let response =
            AppError::Validation(FieldErrors::single("name", "This field may not be blank."))
                .into_response();
        let body: serde_json::Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({"name": ["This field may not be blank."]}));
    }

    #[tokio::test]
    async fn test_duplicate_user_is_an_email_error() {
        let response = AppError::Auth(AuthError::UserAlreadyExists).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({"email": [messages::EMAIL_TAKEN]}));
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::NotFound.into_response();
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = pool_timeout().into_response();
        let body: serde_json::Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
