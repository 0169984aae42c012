//! Service layer: business rules on top of a [`crate::persistence::MarketStore`].
//!
//! Each service is a thin, stateless coordinator holding a shared handle
//! to the store. Ownership and value rules live here; role gates that
//! depend only on the caller's role are checked in the handlers.

pub mod account_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod order_service;
pub mod pickup_service;
pub mod reference_service;

pub use account_service::{AccountService, PasswordChange, Registration, SignedIn};
pub use catalog_service::{CatalogService, ProductDraft};
pub use dashboard_service::DashboardService;
pub use order_service::{OrderRequest, OrderService};
pub use pickup_service::{PickupRequest, PickupService};
pub use reference_service::{Estimate, ReferenceService};
