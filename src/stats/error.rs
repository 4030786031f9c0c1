use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::models::Role;
use crate::orders::error::OrderError;

/// Error types for the statistics view
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Role {0} may not read the statistics")]
    RoleNotAllowed(Role),
}

impl From<OrderError> for StatsError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Database(e) => StatsError::Database(e),
            other => {
                tracing::error!("Unexpected order error in statistics: {}", other);
                StatsError::Database(sqlx::Error::Protocol(other.to_string()))
            }
        }
    }
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StatsError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            StatsError::RoleNotAllowed(_) => (StatusCode::FORBIDDEN, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
