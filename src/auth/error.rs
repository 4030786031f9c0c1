use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for authentication and authorization
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Expired authorization token")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    TokenGenerationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Missing authorization token".to_string())
            }
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid authorization token".to_string())
            }
            AuthError::ExpiredToken => {
                (StatusCode::UNAUTHORIZED, "Authorization token has expired".to_string())
            }
            AuthError::TokenGenerationError(msg) | AuthError::ConfigError(msg) => {
                tracing::error!("Auth configuration failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal authentication error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
