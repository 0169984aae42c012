//! Domain layer: typed entities, identifiers, and the rules that decide
//! which rows a caller may see.
//!
//! Nothing in here touches storage or HTTP. Services in
//! [`crate::service`] combine these types with a
//! [`crate::persistence::MarketStore`].

pub mod pickup;
pub mod product;
pub mod record_id;
pub mod reference;
pub mod session;
pub mod stats;
pub mod status;
pub mod transaction;
pub mod user;

pub use pickup::{Pickup, estimate_value};
pub use product::{NewProduct, Product, ProductChanges, ProductQuery, ProductVisibility};
pub use record_id::{PickupId, TransactionId};
pub use reference::{NewRate, NewTip, Rate, RateUpdate, Tip};
pub use session::Session;
pub use stats::{AdminStats, CustomerStats, DashboardStats, DealerStats};
pub use status::{PickupStatus, ProductStatus, RateTrend, Role, TransactionStatus, UserStatus};
pub use transaction::{Transaction, TransactionScope};
pub use user::{NewUser, ProfileChanges, User, UserAdminChanges};
