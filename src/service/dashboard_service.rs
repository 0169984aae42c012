//! Dashboard service: role-specific totals computed per request.

use std::sync::Arc;

use crate::domain::{DashboardStats, Role, User};
use crate::error::MarketError;
use crate::persistence::MarketStore;

/// Computes dashboard figures; nothing is cached.
#[derive(Debug, Clone)]
pub struct DashboardService {
    store: Arc<dyn MarketStore>,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Returns the figures for `caller`'s role.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn stats_for(&self, caller: &User) -> Result<DashboardStats, MarketError> {
        Ok(match caller.role {
            Role::Admin => DashboardStats::Admin(self.store.admin_stats().await?),
            Role::Dealer => DashboardStats::Dealer(self.store.dealer_stats(&caller.email).await?),
            Role::Customer => {
                DashboardStats::Customer(self.store.customer_stats(&caller.email).await?)
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::user::sample_user;
    use crate::domain::{NewProduct, ProductStatus};
    use crate::persistence::memory::MemoryStore;

    #[tokio::test]
    async fn dealer_sees_own_pending_count() {
        let store = Arc::new(MemoryStore::new());
        for name in ["a", "b"] {
            let product = NewProduct {
                dealer_email: "d@x.com".to_string(),
                dealer_name: "D".to_string(),
                name: name.to_string(),
                price: 1.0,
                category: "metals".to_string(),
                description: String::new(),
                stock: 1,
                image: String::new(),
            };
            assert!(store.insert_product(product).await.is_ok());
        }
        assert!(store.set_product_status(1, ProductStatus::Approved).await.is_ok());

        let svc = DashboardService::new(store);
        let dealer = sample_user(1, "d@x.com", Role::Dealer);
        let Ok(DashboardStats::Dealer(stats)) = svc.stats_for(&dealer).await else {
            panic!("dealer stats");
        };
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.pending_approval, 1);
        assert_eq!(stats.orders_received, 0);
    }

    #[tokio::test]
    async fn role_selects_the_variant() {
        let svc = DashboardService::new(Arc::new(MemoryStore::new()));
        let admin = sample_user(1, "a@x.com", Role::Admin);
        let customer = sample_user(2, "c@x.com", Role::Customer);
        assert!(matches!(svc.stats_for(&admin).await, Ok(DashboardStats::Admin(_))));
        assert!(matches!(
            svc.stats_for(&customer).await,
            Ok(DashboardStats::Customer(_))
        ));
    }
}
