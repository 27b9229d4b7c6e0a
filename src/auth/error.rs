use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the auth flow.
///
/// `InvalidCredentials` covers both unknown-email and wrong-password with a
/// single message, so responses cannot be used to probe which field was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed")]
    Validation { details: String },

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    Unauthorized,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AuthError::Validation { details } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "details": details }),
            ),
            AuthError::DuplicateEmail => (
                StatusCode::CONFLICT,
                json!({ "message": "Email already exist" }),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid email or password" }),
            ),
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid or expired token" }),
            ),
            AuthError::Hashing(_) | AuthError::Token(_) | AuthError::Database(_) => {
                error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
