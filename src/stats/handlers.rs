// HTTP handler for the administrator statistics view

use axum::{extract::State, Json};

use crate::auth::models::AuthenticatedAccount;
use crate::stats::{SalesStats, StatsError};

/// Handler for GET /api/stats
/// Best sellers, revenue and order counts over the rolling window (admin only)
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Sales statistics", body = SalesStats),
        (status = 403, description = "Requires the administrator role")
    ),
    tag = "stats"
)]
pub async fn get_stats_handler(
    State(state): State<crate::AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<SalesStats>, StatsError> {
    let stats = state.stats_service.sales_stats(&account).await?;
    Ok(Json(stats))
}
