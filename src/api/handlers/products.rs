//! Catalog handlers: browse, create, edit, delete and moderate listings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    CreateProductRequest, MessageResponse, ProductListParams, ProductResponse,
    UpdateProductRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::domain::{Product, ProductChanges, ProductStatus, Role};
use crate::error::{ErrorResponse, MarketError};

/// `GET /api/products` — Browse listings.
///
/// # Errors
///
/// Returns [`MarketError::InvalidRequest`] if an admin asks for an
/// unknown status.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    summary = "List products",
    description = "Anonymous callers and customers see approved listings only. Dealers also see their own listings at any status. Admins filter by `status` (default `approved`, `all` for everything).",
    params(ProductListParams),
    responses(
        (status = 200, description = "Matching listings", body = Vec<Product>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    ApiQuery(params): ApiQuery<ProductListParams>,
) -> Result<impl IntoResponse, MarketError> {
    let query = params.into_query(caller.as_ref().map(|c| &c.user))?;
    let products = state.catalog.list(&query).await?;
    Ok(Json(products))
}

/// `POST /api/products` — List a new product (dealers only).
///
/// # Errors
///
/// Returns [`MarketError`] if the caller is not a dealer or a field is
/// missing or invalid.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    summary = "Create product",
    description = "New listings start as `pending` and stay hidden from customers until an admin approves them.",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Listing created", body = ProductResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Dealer access required", body = ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> Result<impl IntoResponse, MarketError> {
    caller.require_role(Role::Dealer)?;
    let product = state.catalog.create(&caller.user, req.into_draft()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

/// `PUT /api/products/{id}` — Edit a listing (owner or admin).
///
/// # Errors
///
/// Returns [`MarketError`] for an unknown id, a foreign listing or an
/// invalid price or stock.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Update product",
    description = "Only the supplied fields change.",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Listing updated", body = ProductResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let changes = ProductChanges::from(req);
    let product = state.catalog.update(&caller.user, id, &changes).await?;
    Ok(Json(ProductResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// `DELETE /api/products/{id}` — Remove a listing (owner or admin).
///
/// # Errors
///
/// Returns [`MarketError`] for an unknown id or a foreign listing.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Delete product",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, MarketError> {
    state.catalog.delete(&caller.user, id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

async fn moderate(
    state: &AppState,
    caller: &CurrentUser,
    id: i64,
    status: ProductStatus,
) -> Result<Json<ProductResponse>, MarketError> {
    caller.require_role(Role::Admin)?;
    let product = state.catalog.moderate(id, status).await?;
    let message = match status {
        ProductStatus::Rejected => "Product rejected successfully",
        _ => "Product approved successfully",
    };
    Ok(Json(ProductResponse {
        message: message.to_string(),
        product,
    }))
}

/// `POST /api/products/{id}/approve` — Publish a listing (admins only).
///
/// Also mounted at `/api/admin/products/{id}/approve`.
///
/// # Errors
///
/// Returns [`MarketError`] for non-admins or an unknown id.
#[utoipa::path(
    post,
    path = "/api/products/{id}/approve",
    tag = "Products",
    summary = "Approve product",
    description = "Sets the status to `approved` whatever it was before.",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Listing approved", body = ProductResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn approve_product(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, MarketError> {
    moderate(&state, &caller, id, ProductStatus::Approved).await
}

/// `POST /api/products/{id}/reject` — Hide a listing (admins only).
///
/// Also mounted at `/api/admin/products/{id}/reject`.
///
/// # Errors
///
/// Returns [`MarketError`] for non-admins or an unknown id.
#[utoipa::path(
    post,
    path = "/api/products/{id}/reject",
    tag = "Products",
    summary = "Reject product",
    description = "Sets the status to `rejected` whatever it was before.",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Listing rejected", body = ProductResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn reject_product(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, MarketError> {
    moderate(&state, &caller, id, ProductStatus::Rejected).await
}

/// Catalog routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/approve", post(approve_product))
        .route("/products/{id}/reject", post(reject_product))
        .route("/admin/products/{id}/approve", post(approve_product))
        .route("/admin/products/{id}/reject", post(reject_product))
}
