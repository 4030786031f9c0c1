use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::models::Role;

/// Error types for reseller directory and product catalog operations
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Reseller {0} not found")]
    ResellerNotFound(i32),

    #[error("Product {0} not found")]
    ProductNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Role {0} may not perform this operation")]
    RoleNotAllowed(Role),
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DirectoryError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            DirectoryError::ResellerNotFound(_) | DirectoryError::ProductNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            DirectoryError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DirectoryError::RoleNotAllowed(_) => (StatusCode::FORBIDDEN, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
