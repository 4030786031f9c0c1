// HTTP handlers for the directory cascade operations.
//
// Reseller and product CRUD live in the external admin tooling; what this
// backend owns is the contract that contact changes and deletions stay
// consistent with the order snapshots, so those two operations (plus the
// product cascade) are exposed here, admin-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::models::{AuthenticatedAccount, Role};
use crate::directory::error::DirectoryError;
use crate::directory::models::UpdateResellerRequest;

/// Handler for PATCH /api/resellers/:id
/// Updates a reseller's contact data and syncs future order snapshots
#[utoipa::path(
    patch,
    path = "/api/resellers/{id}",
    params(("id" = i32, Path, description = "Reseller ID")),
    request_body = UpdateResellerRequest,
    responses(
        (status = 200, description = "Reseller updated and future orders synced"),
        (status = 400, description = "Invalid contact data"),
        (status = 403, description = "Requires the administrator role"),
        (status = 404, description = "Reseller not found")
    ),
    tag = "directory"
)]
pub async fn update_reseller_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<i32>,
    Json(request): Json<UpdateResellerRequest>,
) -> Result<StatusCode, DirectoryError> {
    if account.role != Role::Admin {
        return Err(DirectoryError::RoleNotAllowed(account.role));
    }

    request
        .validate()
        .map_err(|e| DirectoryError::Validation(e.to_string()))?;

    state.directory.update_reseller(id, &request).await?;
    Ok(StatusCode::OK)
}

/// Handler for DELETE /api/resellers/:id
/// Deletes a reseller and cascade-deletes its future orders
#[utoipa::path(
    delete,
    path = "/api/resellers/{id}",
    params(("id" = i32, Path, description = "Reseller ID")),
    responses(
        (status = 204, description = "Reseller and its future orders removed"),
        (status = 403, description = "Requires the administrator role"),
        (status = 404, description = "Reseller not found")
    ),
    tag = "directory"
)]
pub async fn delete_reseller_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<i32>,
) -> Result<StatusCode, DirectoryError> {
    if account.role != Role::Admin {
        return Err(DirectoryError::RoleNotAllowed(account.role));
    }

    state.directory.delete_reseller(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/products/:id
/// Deletes a product, removing it from catalogs and future orders
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product removed from catalogs and future orders"),
        (status = 403, description = "Requires the administrator role"),
        (status = 404, description = "Product not found")
    ),
    tag = "directory"
)]
pub async fn delete_product_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<i32>,
) -> Result<StatusCode, DirectoryError> {
    if account.role != Role::Admin {
        return Err(DirectoryError::RoleNotAllowed(account.role));
    }

    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
