// HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::AuthenticatedAccount;
use crate::orders::{CreateOrdersRequest, OrderError, OrderResponse, UpdateOrderRequest};

/// Handler for POST /api/orders
/// Creates one order per requested delivery date for the authenticated reseller
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrdersRequest,
    responses(
        (status = 201, description = "Orders created, one per delivery date", body = Vec<OrderResponse>),
        (status = 400, description = "Empty lines, duplicate product/date, cutoff passed, or product not orderable"),
        (status = 403, description = "Only resellers may create orders"),
        (status = 409, description = "An order already exists for one of the requested dates"),
        (status = 500, description = "Persistence failure; the body lists which dates were created")
    ),
    tag = "orders"
)]
pub async fn create_orders_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<CreateOrdersRequest>,
) -> Result<(StatusCode, Json<Vec<OrderResponse>>), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::Validation(e.to_string()))?;

    let orders = state.order_service.create_orders(&account, request).await?;

    Ok((StatusCode::CREATED, Json(orders)))
}

/// Handler for GET /api/orders
/// Lists orders scoped by role: all of them for the administrator
/// (with reseller snapshot), own orders for a reseller
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Role-scoped order list", body = Vec<OrderResponse>),
        (status = 403, description = "Bakers and shippers have no order listing")
    ),
    tag = "orders"
)]
pub async fn list_orders_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<Vec<OrderResponse>>, OrderError> {
    let orders = state.order_service.list_orders(&account).await?;
    Ok(Json(orders))
}

/// Handler for PATCH /api/orders/:id
/// Replaces the line set of one order; the delivery date is immutable
#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid lines or cutoff passed for the stored date"),
        (status = 403, description = "Order belongs to another reseller"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn update_order_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::Validation(e.to_string()))?;

    let order = state
        .order_service
        .update_order(order_id, &account, request)
        .await?;

    Ok(Json(order))
}

/// Handler for DELETE /api/orders/:id
/// Deletes an order before its cutoff
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order removed"),
        (status = 400, description = "Cutoff passed for the stored delivery date"),
        (status = 403, description = "Order belongs to another reseller"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn delete_order_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, OrderError> {
    state.order_service.delete_order(order_id, &account).await?;
    Ok(StatusCode::NO_CONTENT)
}
