//! REST API layer: route handlers, DTOs, extractors, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api`, `/health` at the root,
//! and every other path is served from the static frontend directory.

pub mod dto;
pub mod extract;
pub mod handlers;

#[cfg(test)]
mod router_tests;

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::ErrorResponse;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "EcoScrap API",
        description = "Marketplace backend connecting scrap sellers, dealers and moderators."
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_profile,
        handlers::auth::update_profile,
        handlers::auth::change_password,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::approve_product,
        handlers::products::reject_product,
        handlers::pickups::list_pickups,
        handlers::pickups::create_pickup,
        handlers::pickups::update_pickup,
        handlers::transactions::list_transactions,
        handlers::transactions::create_transaction,
        handlers::reference::list_rates,
        handlers::reference::update_rates,
        handlers::reference::list_tips,
        handlers::reference::calculate_estimate,
        handlers::admin::list_users,
        handlers::admin::update_user,
        handlers::admin::delete_user,
        handlers::dashboard::dashboard_stats,
        handlers::system::health_handler,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "Auth", description = "Accounts and sessions"),
        (name = "Products", description = "Marketplace listings and moderation"),
        (name = "Pickups", description = "Scrap collection bookings"),
        (name = "Transactions", description = "Orders"),
        (name = "Reference", description = "Material rates, tips and the value calculator"),
        (name = "Admin", description = "User directory"),
        (name = "Dashboard", description = "Role-specific figures"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete router: REST endpoints, health check, optional
/// Swagger UI, and the static frontend as fallback.
pub fn build_router(static_dir: &Path) -> Router<AppState> {
    let frontend =
        ServeDir::new(static_dir).not_found_service(handlers::system::not_found.into_service());

    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .method_not_allowed_fallback(handlers::system::method_not_allowed);

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router.fallback_service(frontend)
}

/// [`build_router`] wrapped in the request timeout, HTTP tracing and
/// permissive CORS layers.
pub fn build_app(static_dir: &Path, request_timeout: Duration) -> Router<AppState> {
    build_router(static_dir)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
