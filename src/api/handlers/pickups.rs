//! Pickup handlers: book, list, update status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{CreatePickupRequest, PickupResponse, UpdatePickupRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::{Pickup, PickupId, Role};
use crate::error::{ErrorResponse, MarketError};

/// `GET /api/pickups` — Bookings visible to the caller.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/pickups",
    tag = "Pickups",
    summary = "List pickups",
    description = "Customers see their own bookings; dealers and admins see every booking.",
    responses(
        (status = 200, description = "Bookings", body = Vec<Pickup>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn list_pickups(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, MarketError> {
    Ok(Json(state.pickups.list_for(&caller.user).await?))
}

/// `POST /api/pickups` — Book a collection (customers only).
///
/// # Errors
///
/// Returns [`MarketError`] if the caller is not a customer or a field is
/// missing or invalid.
#[utoipa::path(
    post,
    path = "/api/pickups",
    tag = "Pickups",
    summary = "Schedule pickup",
    description = "Values the scrap at the current rate for the material; materials without a rate are valued at 0.",
    request_body = CreatePickupRequest,
    responses(
        (status = 201, description = "Pickup scheduled", body = PickupResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 403, description = "Customer access required", body = ErrorResponse),
    )
)]
pub async fn create_pickup(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<CreatePickupRequest>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Customer)?;
    let pickup = state.pickups.book(&caller.user, req.into_request()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(PickupResponse {
            message: "Pickup scheduled successfully".to_string(),
            pickup,
        }),
    ))
}

/// `PUT /api/pickups/{id}` — Change a booking's status (owner or admin).
///
/// # Errors
///
/// Returns [`MarketError`] for an unknown id or status, or a foreign
/// booking.
#[utoipa::path(
    put,
    path = "/api/pickups/{id}",
    tag = "Pickups",
    summary = "Update pickup",
    description = "Any of `scheduled`, `completed`, `cancelled` may follow any other.",
    params(
        ("id" = String, Path, description = "Pickup id"),
    ),
    request_body = UpdatePickupRequest,
    responses(
        (status = 200, description = "Pickup updated", body = PickupResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Pickup not found", body = ErrorResponse),
    )
)]
pub async fn update_pickup(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdatePickupRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let id = PickupId::from_string(id);
    let pickup = state
        .pickups
        .set_status(&caller.user, &id, req.into_status()?)
        .await?;
    Ok(Json(PickupResponse {
        message: "Pickup updated successfully".to_string(),
        pickup,
    }))
}

/// Pickup routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pickups", get(list_pickups).post(create_pickup))
        .route("/pickups/{id}", put(update_pickup))
}
