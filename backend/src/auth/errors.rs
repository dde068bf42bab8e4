//! Custom error types specific to authentication failures.
//!
//! Each variant maps to one HTTP status and a fixed, user-facing message.
//! Token problems of any kind collapse into [`AuthError::Unauthenticated`].

use crate::api::common::{ApiResponse, error_response, json_rejection_to_http};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No user has the submitted username.
    #[error("User with username {username} not found")]
    NotFound { username: String },

    /// The user exists but the password does not match.
    #[error("Unauthorised - incorrect password")]
    Unauthorized,

    /// The presented token is missing, malformed, expired or badly signed.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// A token could not be signed.
    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    /// The request body is not a JSON object of the expected shape.
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    /// The credential store could not be read.
    #[error("Credential store error: {0}")]
    Store(anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::Unauthorized | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidBody(rejection) => rejection.status(),
            AuthError::SigningFailure(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AuthError::SigningFailure(message) => {
                tracing::error!("Token signing failed: {}", message);
                error_response(status, "Internal server error").into_response()
            }
            AuthError::Store(source) => {
                tracing::error!("Credential store error: {:#}", source);
                error_response(status, "Internal server error").into_response()
            }
            AuthError::InvalidBody(rejection) => json_rejection_to_http(rejection).into_response(),
            other => (status, Json(ApiResponse::message(other.to_string()))).into_response(),
        }
    }
}
