//! Reference data handlers: material rates, tips, value calculator.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{EstimateRequest, MessageResponse, RateUpdateEntry, TipParams};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::{Rate, RateUpdate, Role, Tip};
use crate::error::{ErrorResponse, MarketError};
use crate::service::Estimate;

/// `GET /api/rates` — Current buying prices.
///
/// # Errors
///
/// Returns [`MarketError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/rates",
    tag = "Reference",
    summary = "List material rates",
    responses(
        (status = 200, description = "Rates", body = Vec<Rate>),
    )
)]
pub async fn list_rates(State(state): State<AppState>) -> Result<impl IntoResponse, MarketError> {
    Ok(Json(state.reference.rates().await?))
}

/// `PUT /api/rates` — Update prices by material (admins only).
///
/// # Errors
///
/// Returns [`MarketError`] for non-admins or a malformed entry.
#[utoipa::path(
    put,
    path = "/api/rates",
    tag = "Reference",
    summary = "Update material rates",
    description = "Entries are matched by exact material name; unknown materials are skipped. Omitted `trend` resets to `stable`, omitted `icon` to ♻️.",
    request_body = Vec<RateUpdateEntry>,
    responses(
        (status = 200, description = "Rates updated", body = MessageResponse),
        (status = 400, description = "Malformed entry", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
pub async fn update_rates(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(entries): ApiJson<Vec<RateUpdateEntry>>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Admin)?;
    let updates = entries
        .into_iter()
        .map(RateUpdateEntry::into_update)
        .collect::<Result<Vec<RateUpdate>, _>>()?;
    state.reference.update_rates(&updates).await?;
    Ok(Json(MessageResponse::new("Rates updated successfully")))
}

/// `GET /api/tips` — Seller advice, optionally of one category.
///
/// # Errors
///
/// Returns [`MarketError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/tips",
    tag = "Reference",
    summary = "List tips",
    params(TipParams),
    responses(
        (status = 200, description = "Tips", body = Vec<Tip>),
    )
)]
pub async fn list_tips(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TipParams>,
) -> Result<impl IntoResponse, MarketError> {
    let category = params.category.filter(|c| !c.is_empty());
    Ok(Json(state.reference.tips(category.as_deref()).await?))
}

/// `POST /api/calculate-estimate` — Value a weight of material.
///
/// # Errors
///
/// Returns [`MarketError`] on missing input or an unknown material.
#[utoipa::path(
    post,
    path = "/api/calculate-estimate",
    tag = "Reference",
    summary = "Estimate scrap value",
    description = "Multiplies the current rate of the material by the weight.",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Estimate", body = Estimate),
        (status = 400, description = "Material and weight are required", body = ErrorResponse),
        (status = 404, description = "Material rate not found", body = ErrorResponse),
    )
)]
pub async fn calculate_estimate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EstimateRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let (material, weight) = req.into_parts();
    Ok(Json(state.reference.estimate(&material, weight).await?))
}

/// Reference routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rates", get(list_rates).put(update_rates))
        .route("/tips", get(list_tips))
        .route("/calculate-estimate", post(calculate_estimate))
}
