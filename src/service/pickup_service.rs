//! Pickup service: booking scrap collections and tracking their status.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::{Pickup, PickupId, PickupStatus, Role, User, estimate_value};
use crate::error::MarketError;
use crate::persistence::MarketStore;

/// Validated booking form.
#[derive(Debug, Clone)]
pub struct PickupRequest {
    /// Material name, matched exactly against the rate table.
    pub material: String,
    /// Weight in kilograms.
    pub weight: f64,
    /// Requested collection day.
    pub date: NaiveDate,
    /// Requested time slot.
    pub time: String,
    /// Collection address.
    pub address: String,
}

/// Books and updates pickups.
#[derive(Debug, Clone)]
pub struct PickupService {
    store: Arc<dyn MarketStore>,
}

impl PickupService {
    /// Creates a new `PickupService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Books a pickup for `customer`, valuing it at the current rate.
    /// Materials without a rate are accepted and valued at 0.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn book(&self, customer: &User, request: PickupRequest) -> Result<Pickup, MarketError> {
        let rate = self.store.find_rate(&request.material).await?;
        let estimated_value = estimate_value(rate.as_ref(), request.weight);

        let pickup = Pickup {
            id: PickupId::new(),
            user_email: customer.email.clone(),
            user_name: customer.name.clone(),
            material: request.material,
            weight: request.weight,
            date: request.date,
            time: request.time,
            address: request.address,
            estimated_value,
            status: PickupStatus::Scheduled,
            booked_date: Utc::now().date_naive(),
        };
        self.store.insert_pickup(&pickup).await?;

        tracing::info!(
            pickup_id = %pickup.id,
            user_id = customer.id,
            material = %pickup.material,
            estimated_value,
            "pickup scheduled"
        );
        Ok(pickup)
    }

    /// Lists pickups: customers see their own, dealers and admins see all.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn list_for(&self, caller: &User) -> Result<Vec<Pickup>, MarketError> {
        let owner = match caller.role {
            Role::Admin | Role::Dealer => None,
            Role::Customer => Some(caller.email.as_str()),
        };
        self.store.list_pickups(owner).await
    }

    /// Overwrites a pickup's status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] for an unknown id.
    /// - [`MarketError::Forbidden`] unless the caller booked it or is an
    ///   admin.
    pub async fn set_status(
        &self,
        caller: &User,
        pickup_id: &PickupId,
        status: PickupStatus,
    ) -> Result<Pickup, MarketError> {
        let pickup = self
            .store
            .find_pickup(pickup_id)
            .await?
            .ok_or_else(pickup_not_found)?;
        crate::auth::require_owner_or_admin(caller, &pickup.user_email)?;

        let pickup = self
            .store
            .set_pickup_status(pickup_id, status)
            .await?
            .ok_or_else(pickup_not_found)?;
        tracing::info!(pickup_id = %pickup.id, status = %status, "pickup updated");
        Ok(pickup)
    }
}

fn pickup_not_found() -> MarketError {
    MarketError::NotFound("Pickup not found".to_string())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::user::sample_user;
    use crate::domain::{NewRate, RateTrend};
    use crate::persistence::memory::MemoryStore;

    async fn service() -> PickupService {
        let store = Arc::new(MemoryStore::new());
        let copper = NewRate {
            material: "Copper".to_string(),
            rate_per_kg: 650.0,
            trend: RateTrend::Up,
            icon: "🔌".to_string(),
        };
        assert!(store.insert_rate_if_absent(copper).await.is_ok());
        PickupService::new(store)
    }

    fn request(material: &str, weight: f64) -> PickupRequest {
        PickupRequest {
            material: material.to_string(),
            weight,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
            time: "10:00".to_string(),
            address: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn value_is_rate_times_weight() {
        let svc = service().await;
        let customer = sample_user(1, "c@x.com", Role::Customer);
        let Ok(pickup) = svc.book(&customer, request("Copper", 10.0)).await else {
            panic!("book");
        };
        assert!((pickup.estimated_value - 6500.0).abs() < f64::EPSILON);
        assert_eq!(pickup.status, PickupStatus::Scheduled);
        assert!(pickup.id.as_str().starts_with("PU"));

        let Ok(unknown) = svc.book(&customer, request("Gold", 10.0)).await else {
            panic!("book unknown");
        };
        assert!(unknown.estimated_value.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn customers_see_only_their_own() {
        let svc = service().await;
        let alice = sample_user(1, "alice@x.com", Role::Customer);
        let bob = sample_user(2, "bob@x.com", Role::Customer);
        let dealer = sample_user(3, "d@x.com", Role::Dealer);
        assert!(svc.book(&alice, request("Copper", 1.0)).await.is_ok());
        assert!(svc.book(&bob, request("Copper", 2.0)).await.is_ok());

        let Ok(mine) = svc.list_for(&alice).await else {
            panic!("list");
        };
        assert_eq!(mine.len(), 1);
        assert!(mine.iter().all(|p| p.user_email == "alice@x.com"));
        assert!(matches!(svc.list_for(&dealer).await.map(|p| p.len()), Ok(2)));
    }

    #[tokio::test]
    async fn status_changes_need_owner_or_admin() {
        let svc = service().await;
        let alice = sample_user(1, "alice@x.com", Role::Customer);
        let bob = sample_user(2, "bob@x.com", Role::Customer);
        let admin = sample_user(3, "a@x.com", Role::Admin);
        let Ok(pickup) = svc.book(&alice, request("Copper", 1.0)).await else {
            panic!("book");
        };

        assert!(matches!(
            svc.set_status(&bob, &pickup.id, PickupStatus::Cancelled).await,
            Err(MarketError::Forbidden(_))
        ));
        let Ok(done) = svc.set_status(&admin, &pickup.id, PickupStatus::Completed).await else {
            panic!("admin update");
        };
        assert_eq!(done.status, PickupStatus::Completed);
        let Ok(back) = svc.set_status(&alice, &pickup.id, PickupStatus::Scheduled).await else {
            panic!("owner update");
        };
        assert_eq!(back.status, PickupStatus::Scheduled);
        assert!(matches!(
            svc.set_status(&admin, &PickupId::new(), PickupStatus::Completed).await,
            Err(MarketError::NotFound(_))
        ));
    }
}
