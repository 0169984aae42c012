//! Order service: recording customer purchases.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Transaction, TransactionId, TransactionScope, TransactionStatus, User};
use crate::error::MarketError;
use crate::persistence::MarketStore;

/// Validated order form. The amount is taken as given.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Seller; must be a registered user.
    pub dealer_email: String,
    /// Cart lines, stored verbatim.
    pub items: Vec<serde_json::Value>,
    /// Order total.
    pub amount: f64,
    /// Payment method; `"cod"` leaves the order pending.
    pub payment_method: String,
    /// Delivery address.
    pub address: String,
}

/// Places and lists orders.
#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<dyn MarketStore>,
}

impl OrderService {
    /// Creates a new `OrderService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Records an order placed by `customer`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidRequest`] for an empty cart.
    /// - [`MarketError::NotFound`] if the dealer is not a registered user.
    pub async fn place(
        &self,
        customer: &User,
        request: OrderRequest,
    ) -> Result<Transaction, MarketError> {
        if request.items.is_empty() {
            return Err(MarketError::InvalidRequest(
                "items must not be empty".to_string(),
            ));
        }
        let Some(dealer) = self.store.find_user_by_email(&request.dealer_email).await? else {
            return Err(MarketError::NotFound("Dealer not found".to_string()));
        };

        let now = Utc::now();
        let txn = Transaction {
            id: TransactionId::new(),
            customer_email: customer.email.clone(),
            customer_name: customer.name.clone(),
            dealer_email: dealer.email,
            items: request.items,
            amount: request.amount,
            status: TransactionStatus::for_payment_method(&request.payment_method),
            payment_method: request.payment_method,
            address: request.address,
            date: now.date_naive(),
            timestamp: now,
        };
        self.store.insert_transaction(&txn).await?;

        tracing::info!(
            transaction_id = %txn.id,
            user_id = customer.id,
            amount = txn.amount,
            status = %txn.status,
            "order placed"
        );
        Ok(txn)
    }

    /// Lists orders visible to `caller`: all for admins, sales for
    /// dealers, purchases for customers.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn list_for(&self, caller: &User) -> Result<Vec<Transaction>, MarketError> {
        self.store
            .list_transactions(&TransactionScope::for_caller(caller))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, Role, UserStatus};
    use crate::persistence::memory::MemoryStore;

    async fn add_user(store: &MemoryStore, email: &str, role: Role) -> User {
        let Ok(user) = store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash: String::new(),
                name: email.to_string(),
                phone: "1".to_string(),
                address: "x".to_string(),
                role,
                status: UserStatus::Active,
                business_name: None,
            })
            .await
        else {
            panic!("insert user");
        };
        user
    }

    fn request(dealer: &str, method: &str) -> OrderRequest {
        OrderRequest {
            dealer_email: dealer.to_string(),
            items: vec![serde_json::json!({"product_id": 1, "quantity": 2})],
            amount: 250.0,
            payment_method: method.to_string(),
            address: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn status_follows_payment_method() {
        let store = Arc::new(MemoryStore::new());
        let customer = add_user(&store, "c@x.com", Role::Customer).await;
        add_user(&store, "d@x.com", Role::Dealer).await;
        let svc = OrderService::new(store);

        let Ok(cod) = svc.place(&customer, request("d@x.com", "cod")).await else {
            panic!("cod order");
        };
        assert_eq!(cod.status, TransactionStatus::Pending);
        assert!(cod.id.as_str().starts_with("TXN"));

        let Ok(upi) = svc.place(&customer, request("d@x.com", "upi")).await else {
            panic!("upi order");
        };
        assert_eq!(upi.status, TransactionStatus::Completed);
        assert_ne!(cod.id, upi.id);
    }

    #[tokio::test]
    async fn unknown_dealer_and_empty_cart_rejected() {
        let store = Arc::new(MemoryStore::new());
        let customer = add_user(&store, "c@x.com", Role::Customer).await;
        add_user(&store, "d@x.com", Role::Dealer).await;
        let svc = OrderService::new(store);

        assert!(matches!(
            svc.place(&customer, request("ghost@x.com", "cod")).await,
            Err(MarketError::NotFound(_))
        ));
        let mut empty = request("d@x.com", "cod");
        empty.items.clear();
        assert!(matches!(
            svc.place(&customer, empty).await,
            Err(MarketError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn listing_is_role_scoped() {
        let store = Arc::new(MemoryStore::new());
        let c1 = add_user(&store, "c1@x.com", Role::Customer).await;
        let c2 = add_user(&store, "c2@x.com", Role::Customer).await;
        let d1 = add_user(&store, "d1@x.com", Role::Dealer).await;
        add_user(&store, "d2@x.com", Role::Dealer).await;
        let admin = add_user(&store, "a@x.com", Role::Admin).await;
        let svc = OrderService::new(store);

        assert!(svc.place(&c1, request("d1@x.com", "cod")).await.is_ok());
        assert!(svc.place(&c2, request("d2@x.com", "card")).await.is_ok());
        assert!(svc.place(&c2, request("d1@x.com", "card")).await.is_ok());

        assert!(matches!(svc.list_for(&admin).await.map(|t| t.len()), Ok(3)));
        assert!(matches!(svc.list_for(&d1).await.map(|t| t.len()), Ok(2)));
        assert!(matches!(svc.list_for(&c1).await.map(|t| t.len()), Ok(1)));
    }
}
