//! Dashboard handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::DashboardStats;
use crate::error::{ErrorResponse, MarketError};

/// `GET /api/dashboard/stats` — Figures for the caller's role.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    summary = "Dashboard statistics",
    description = "Admins get platform totals, dealers their listings and sales, customers their pickups and spending.",
    responses(
        (status = 200, description = "Role-specific figures", body = DashboardStats),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, MarketError> {
    Ok(Json(state.dashboard.stats_for(&caller.user).await?))
}

/// Dashboard routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(dashboard_stats))
}
