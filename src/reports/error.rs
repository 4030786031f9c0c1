use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::models::Role;
use crate::directory::error::DirectoryError;
use crate::orders::error::OrderError;

/// Error types for the daily report views
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Role {0} may not read this report")]
    RoleNotAllowed(Role),
}

impl From<OrderError> for ReportError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Database(e) => ReportError::Database(e),
            other => {
                // Order lookups for the reports only fail on I/O.
                tracing::error!("Unexpected order error in report: {}", other);
                ReportError::Database(sqlx::Error::Protocol(other.to_string()))
            }
        }
    }
}

impl From<DirectoryError> for ReportError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Database(e) => ReportError::Database(e),
            other => {
                tracing::error!("Unexpected directory error in report: {}", other);
                ReportError::Database(sqlx::Error::Protocol(other.to_string()))
            }
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ReportError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ReportError::RoleNotAllowed(_) => (StatusCode::FORBIDDEN, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
