//! Admin user directory handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{MessageResponse, UpdateUserRequest, UserResponse};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::{Role, User};
use crate::error::{ErrorResponse, MarketError};

/// `GET /api/admin/users` — Every account (admins only).
///
/// # Errors
///
/// Returns [`MarketError::Forbidden`] for non-admins.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    summary = "List users",
    responses(
        (status = 200, description = "Accounts", body = Vec<User>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Admin)?;
    Ok(Json(state.accounts.list_users().await?))
}

/// `PUT /api/admin/users/{id}` — Block, unblock or change role.
///
/// # Errors
///
/// Returns [`MarketError`] for non-admins, an unknown id or an unknown
/// status or role.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    summary = "Update user",
    description = "Only the supplied fields change.",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Unknown status or role", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Admin)?;
    let user = state.accounts.update_user(id, req.into_changes()?).await?;
    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// `DELETE /api/admin/users/{id}` — Remove an account.
///
/// # Errors
///
/// Returns [`MarketError`] for non-admins, an unknown id, or an account
/// still referenced by listings, pickups or orders.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    summary = "Delete user",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Account still referenced", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Admin)?;
    state.accounts.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Admin routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", put(update_user).delete(delete_user))
}
