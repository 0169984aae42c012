//! REST endpoint handlers organized by resource.
//!
//! Handlers check the caller's role first, then convert the request DTO
//! and call one service method.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod pickups;
pub mod products;
pub mod reference;
pub mod system;
pub mod transactions;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`. Unmatched paths below the
/// prefix get the JSON 404 body, unsupported methods the JSON 405 body.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(products::routes())
        .merge(pickups::routes())
        .merge(transactions::routes())
        .merge(reference::routes())
        .merge(admin::routes())
        .merge(dashboard::routes())
        .fallback(system::not_found)
        .method_not_allowed_fallback(system::method_not_allowed)
}
