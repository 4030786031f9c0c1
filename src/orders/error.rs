use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;

use crate::auth::models::Role;
use crate::directory::error::DirectoryError;

/// Error types for order operations.
///
/// Each variant is a distinct outcome the caller can act on; the validation
/// failures map to 400, the date conflict to 409, ownership and role
/// failures to 403, and persistence failures to 500.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Order not found")]
    NotFound,

    #[error("Reseller not found")]
    ResellerNotFound,

    #[error("No product selected for the order")]
    EmptyLines,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Product {0} appears more than once in the order")]
    DuplicateProduct(i32),

    #[error("Delivery date {0} appears more than once in the request")]
    DuplicateDate(NaiveDate),

    #[error("An order for delivery date {0} already exists")]
    DateConflict(NaiveDate),

    #[error("Past the daily cutoff for delivery date {0}")]
    CutoffLocked(NaiveDate),

    #[error("Product {0} is not orderable")]
    NotOrderable(i32),

    #[error("Order belongs to another reseller")]
    Forbidden,

    #[error("Role {0} may not perform this operation")]
    RoleNotAllowed(Role),

    /// A batch creation failed partway through. The dates in `created` were
    /// persisted and remain in the system; `failed` was not.
    #[error("Order for {failed} failed after {} date(s) were created", created.len())]
    PartialCreate {
        created: Vec<NaiveDate>,
        failed: NaiveDate,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<DirectoryError> for OrderError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Database(e) => OrderError::Database(e),
            DirectoryError::ResellerNotFound(_) => OrderError::ResellerNotFound,
            DirectoryError::ProductNotFound(id) => OrderError::NotOrderable(id),
            DirectoryError::Validation(msg) => OrderError::Validation(msg),
            DirectoryError::RoleNotAllowed(role) => OrderError::RoleNotAllowed(role),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            OrderError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "A database error occurred" }),
                )
            }
            OrderError::NotFound | OrderError::ResellerNotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            OrderError::EmptyLines
            | OrderError::InvalidQuantity(_)
            | OrderError::DuplicateProduct(_)
            | OrderError::DuplicateDate(_)
            | OrderError::NotOrderable(_)
            | OrderError::CutoffLocked(_)
            | OrderError::Validation(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            OrderError::DateConflict(_) => {
                (StatusCode::CONFLICT, json!({ "error": self.to_string() }))
            }
            OrderError::Forbidden | OrderError::RoleNotAllowed(_) => {
                (StatusCode::FORBIDDEN, json!({ "error": self.to_string() }))
            }
            OrderError::PartialCreate { created, failed } => {
                // The caller must learn exactly which dates were persisted.
                tracing::error!(
                    "Partial batch creation: {} date(s) persisted, {} failed",
                    created.len(),
                    failed
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": self.to_string(),
                        "created_dates": created,
                        "failed_date": failed,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();

        let cases = [
            (OrderError::NotFound.into_response(), StatusCode::NOT_FOUND),
            (
                OrderError::EmptyLines.into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::DuplicateProduct(3).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::DateConflict(date).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                OrderError::CutoffLocked(date).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::Forbidden.into_response(),
                StatusCode::FORBIDDEN,
            ),
            (
                OrderError::PartialCreate {
                    created: vec![date],
                    failed: date,
                }
                .into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
