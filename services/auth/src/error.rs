//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::repositories::StoreError;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// Username already registered
    #[error("Username already exists")]
    Conflict,

    /// Bad credentials, or a missing/invalid session token
    #[error("Invalid credentials")]
    Authentication,

    /// Backing store failure; the caller may retry
    #[error("Credential store unavailable: {0}")]
    Store(#[source] StoreError),

    /// Hashing, signing or task failure
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => AuthError::Conflict,
            other => AuthError::Store(other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Conflict => (StatusCode::CONFLICT, self.to_string()),
            AuthError::Authentication => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::Store(e) => {
                error!("Credential store error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AuthError::Internal(e) => {
                error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::DatabaseError;

    #[test]
    fn test_duplicate_username_maps_to_conflict() {
        let err: AuthError = StoreError::DuplicateUsername("alice".to_string()).into();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AuthError::Validation("Username is required".into()), StatusCode::BAD_REQUEST),
            (AuthError::Conflict, StatusCode::CONFLICT),
            (AuthError::Authentication, StatusCode::UNAUTHORIZED),
            (
                StoreError::Backend(DatabaseError::Configuration("down".into())).into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AuthError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
