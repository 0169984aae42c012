//! Order handlers: place and list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateTransactionRequest, TransactionResponse};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::{Role, Transaction};
use crate::error::{ErrorResponse, MarketError};

/// `GET /api/transactions` — Orders visible to the caller.
///
/// # Errors
///
/// Returns [`MarketError::Unauthenticated`] without a session.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    summary = "List transactions",
    description = "Admins see every order, dealers the orders they sold, customers the orders they placed.",
    responses(
        (status = 200, description = "Orders", body = Vec<Transaction>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, MarketError> {
    Ok(Json(state.orders.list_for(&caller.user).await?))
}

/// `POST /api/transactions` — Place an order (customers only).
///
/// # Errors
///
/// Returns [`MarketError`] if the caller is not a customer, a field is
/// missing or the dealer is unknown.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    summary = "Place order",
    description = "The amount is recorded as sent and stock is not touched. Cash on delivery (`cod`) orders start `pending`, all others `completed`.",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Order placed", body = TransactionResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 403, description = "Customer access required", body = ErrorResponse),
        (status = 404, description = "Dealer not found", body = ErrorResponse),
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Customer)?;
    let transaction = state.orders.place(&caller.user, req.into_order()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            message: "Order placed successfully".to_string(),
            transaction,
        }),
    ))
}

/// Order routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions).post(create_transaction))
}
