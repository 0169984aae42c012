//! Account handlers: register, login, logout, profile, password.

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::ProfileChanges;
use crate::error::{ErrorResponse, MarketError};

/// `POST /api/auth/register` — Create an account and sign it in.
///
/// # Errors
///
/// Returns [`MarketError`] on a missing field, an unknown role or a
/// duplicate email.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    summary = "Register",
    description = "Creates an active customer or dealer account and returns a session cookie.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let signed_in = state.accounts.register(req.into_registration()?).await?;
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, signed_in.set_cookie)],
        Json(UserResponse {
            message: "User registered successfully".to_string(),
            user: signed_in.user,
        }),
    ))
}

/// `POST /api/auth/login` — Check credentials and open a session.
///
/// # Errors
///
/// Returns [`MarketError`] on missing fields, bad credentials or a
/// blocked account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Log in",
    description = "Verifies email and password. Blocked accounts are refused and get no session.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 403, description = "Account is blocked", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let (email, password) = req.into_credentials()?;
    let signed_in = state.accounts.login(&email, &password).await?;
    Ok((
        [(SET_COOKIE, signed_in.set_cookie)],
        Json(UserResponse {
            message: "Login successful".to_string(),
            user: signed_in.user,
        }),
    ))
}

/// `POST /api/auth/logout` — End the current session.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 200, description = "Session ended", body = MessageResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, MarketError> {
    let clear_cookie = state.accounts.logout(caller.session_id).await?;
    tracing::info!(user_id = caller.user.id, "user logged out");
    Ok((
        [(SET_COOKIE, clear_cookie)],
        Json(MessageResponse::new("Logout successful")),
    ))
}

/// `GET /api/auth/profile` — The signed-in account.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    summary = "Get profile",
    responses(
        (status = 200, description = "Current account", body = ProfileResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn get_profile(caller: CurrentUser) -> Result<impl IntoResponse, MarketError> {
    Ok(Json(ProfileResponse { user: caller.user }))
}

/// `PUT /api/auth/profile` — Edit name, phone, address or trading name.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "Auth",
    summary = "Update profile",
    description = "Only the supplied fields change.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let changes = ProfileChanges::from(req);
    let user = state.accounts.update_profile(caller.user.id, &changes).await?;
    Ok(Json(UserResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

/// `POST /api/auth/change-password` — Replace the caller's password.
///
/// # Errors
///
/// Returns [`MarketError::InvalidRequest`] on a missing field, a wrong
/// current password, an unchanged password or a confirmation mismatch.
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = "Auth",
    summary = "Change password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Rejected change", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, MarketError> {
    state
        .accounts
        .change_password(&caller.user, req.into_change()?)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Account routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/auth/change-password", post(change_password))
}
