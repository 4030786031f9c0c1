// HTTP handlers for the daily report views

use axum::{extract::State, Json};

use crate::auth::models::AuthenticatedAccount;
use crate::reports::{Manifest, ProductionLine, ReportError};

/// Handler for GET /api/reports/shipments
/// Today's per-reseller shipment manifests (administrator, shipper)
#[utoipa::path(
    get,
    path = "/api/reports/shipments",
    responses(
        (status = 200, description = "Today's shipment manifests", body = Vec<Manifest>),
        (status = 403, description = "Requires the administrator or shipper role")
    ),
    tag = "reports"
)]
pub async fn get_shipments_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<Vec<Manifest>>, ReportError> {
    let manifests = state.report_service.daily_shipments(&account).await?;
    Ok(Json(manifests))
}

/// Handler for GET /api/reports/production
/// Today's production requirements with scaled ingredients (administrator, baker)
#[utoipa::path(
    get,
    path = "/api/reports/production",
    responses(
        (status = 200, description = "Today's production requirements", body = Vec<ProductionLine>),
        (status = 403, description = "Requires the administrator or baker role")
    ),
    tag = "reports"
)]
pub async fn get_production_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<Vec<ProductionLine>>, ReportError> {
    let production = state.report_service.daily_production(&account).await?;
    Ok(Json(production))
}
