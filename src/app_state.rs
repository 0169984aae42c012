//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::{PasswordHasher, SessionCookies};
use crate::persistence::MarketStore;
use crate::service::{
    AccountService, CatalogService, DashboardService, OrderService, PickupService,
    ReferenceService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Accounts, sessions and the admin user directory.
    pub accounts: Arc<AccountService>,
    /// Product listings and approvals.
    pub catalog: Arc<CatalogService>,
    /// Pickup bookings.
    pub pickups: Arc<PickupService>,
    /// Orders.
    pub orders: Arc<OrderService>,
    /// Rates, tips and the value calculator.
    pub reference: Arc<ReferenceService>,
    /// Dashboard figures.
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wires every service to one store.
    #[must_use]
    pub fn new(
        store: Arc<dyn MarketStore>,
        hasher: PasswordHasher,
        cookies: SessionCookies,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(Arc::clone(&store), hasher, cookies)),
            catalog: Arc::new(CatalogService::new(Arc::clone(&store))),
            pickups: Arc::new(PickupService::new(Arc::clone(&store))),
            orders: Arc::new(OrderService::new(Arc::clone(&store))),
            reference: Arc::new(ReferenceService::new(Arc::clone(&store))),
            dashboard: Arc::new(DashboardService::new(store)),
        }
    }
}
