//! In-process store used when `PERSISTENCE_ENABLED=false` and by tests.
//!
//! All tables sit behind one [`tokio::sync::RwLock`], so every trait call
//! is atomic: readers run concurrently, writers are serialized, and a
//! multi-row change such as a rate batch is never observed half-applied.
//! Contents are lost when the process exits.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DUPLICATE_EMAIL, MarketStore, USER_STILL_REFERENCED};
use crate::domain::{
    AdminStats, CustomerStats, DealerStats, NewProduct, NewRate, NewTip, NewUser, Pickup, PickupId,
    PickupStatus, Product, ProductChanges, ProductQuery, ProductStatus, ProfileChanges, Rate,
    RateUpdate, Session, Tip, Transaction, TransactionScope, User, UserAdminChanges,
};
use crate::error::MarketError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    sessions: HashMap<Uuid, Session>,
    products: BTreeMap<i64, Product>,
    pickups: Vec<Pickup>,
    transactions: Vec<Transaction>,
    rates: BTreeMap<i64, Rate>,
    tips: BTreeMap<i64, Tip>,
    next_user_id: i64,
    next_product_id: i64,
    next_rate_id: i64,
    next_tip_id: i64,
}

impl Tables {
    fn user_is_referenced(&self, email: &str) -> bool {
        self.products.values().any(|p| p.dealer_email == email)
            || self.pickups.iter().any(|p| p.user_email == email)
            || self
                .transactions
                .iter()
                .any(|t| t.customer_email == email || t.dealer_email == email)
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Volatile [`MarketStore`] backed by ordered maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, MarketError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(MarketError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        let id = next_id(&mut tables.next_user_id);
        let stored = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            phone: user.phone,
            address: user.address,
            role: user.role,
            status: user.status,
            business_name: user.business_name,
            join_date: Utc::now(),
        };
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, MarketError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, MarketError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }

    async fn update_user_admin(
        &self,
        id: i64,
        changes: UserAdminChanges,
    ) -> Result<Option<User>, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<bool, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .users
            .get_mut(&id)
            .map(|user| user.password_hash = password_hash.to_string())
            .is_some())
    }

    async fn delete_user(&self, id: i64) -> Result<bool, MarketError> {
        let mut tables = self.tables.write().await;
        let Some(email) = tables.users.get(&id).map(|u| u.email.clone()) else {
            return Ok(false);
        };
        if tables.user_is_referenced(&email) {
            return Err(MarketError::Conflict(USER_STILL_REFERENCED.to_string()));
        }
        tables.users.remove(&id);
        tables.sessions.retain(|_, s| s.user_id != id);
        Ok(true)
    }

    async fn insert_session(&self, session: &Session) -> Result<(), MarketError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&session.user_id) {
            return Err(MarketError::NotFound("User not found".to_string()));
        }
        tables.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, MarketError> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), MarketError> {
        self.tables.write().await.sessions.remove(&id);
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, MarketError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(u64::try_from(before.saturating_sub(tables.sessions.len())).unwrap_or(u64::MAX))
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, MarketError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_product_id);
        let stored = Product {
            id,
            dealer_email: product.dealer_email,
            dealer_name: product.dealer_name,
            name: product.name,
            price: product.price,
            category: product.category,
            description: product.description,
            status: ProductStatus::Pending,
            stock: product.stock,
            rating: 0.0,
            image: product.image,
            created_at: Utc::now(),
        };
        tables.products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, MarketError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| query.admits(p))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn update_product(
        &self,
        id: i64,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables.products.get_mut(&id).map(|product| {
            changes.apply(product);
            product.clone()
        }))
    }

    async fn set_product_status(
        &self,
        id: i64,
        status: ProductStatus,
    ) -> Result<Option<Product>, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables.products.get_mut(&id).map(|product| {
            product.status = status;
            product.clone()
        }))
    }

    async fn delete_product(&self, id: i64) -> Result<bool, MarketError> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    async fn insert_pickup(&self, pickup: &Pickup) -> Result<(), MarketError> {
        self.tables.write().await.pickups.push(pickup.clone());
        Ok(())
    }

    async fn find_pickup(&self, id: &PickupId) -> Result<Option<Pickup>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables.pickups.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_pickups(&self, owner_email: Option<&str>) -> Result<Vec<Pickup>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pickups
            .iter()
            .filter(|p| owner_email.is_none_or(|email| p.user_email == email))
            .cloned()
            .collect())
    }

    async fn set_pickup_status(
        &self,
        id: &PickupId,
        status: PickupStatus,
    ) -> Result<Option<Pickup>, MarketError> {
        let mut tables = self.tables.write().await;
        Ok(tables.pickups.iter_mut().find(|p| &p.id == id).map(|p| {
            p.status = status;
            p.clone()
        }))
    }

    async fn insert_transaction(&self, txn: &Transaction) -> Result<(), MarketError> {
        self.tables.write().await.transactions.push(txn.clone());
        Ok(())
    }

    async fn list_transactions(
        &self,
        scope: &TransactionScope,
    ) -> Result<Vec<Transaction>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables
            .transactions
            .iter()
            .filter(|t| scope.admits(t))
            .cloned()
            .collect())
    }

    async fn insert_rate_if_absent(&self, rate: NewRate) -> Result<bool, MarketError> {
        let mut tables = self.tables.write().await;
        if tables.rates.values().any(|r| r.material == rate.material) {
            return Ok(false);
        }
        let id = next_id(&mut tables.next_rate_id);
        tables.rates.insert(
            id,
            Rate {
                id,
                material: rate.material,
                rate_per_kg: rate.rate_per_kg,
                trend: rate.trend,
                icon: rate.icon,
            },
        );
        Ok(true)
    }

    async fn list_rates(&self) -> Result<Vec<Rate>, MarketError> {
        Ok(self.tables.read().await.rates.values().cloned().collect())
    }

    async fn find_rate(&self, material: &str) -> Result<Option<Rate>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables.rates.values().find(|r| r.material == material).cloned())
    }

    async fn update_rates(&self, updates: &[RateUpdate]) -> Result<u64, MarketError> {
        let mut tables = self.tables.write().await;
        let mut changed = 0;
        for update in updates {
            if let Some(rate) = tables
                .rates
                .values_mut()
                .find(|r| r.material == update.material)
            {
                update.apply(rate);
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn insert_tip_if_absent(&self, tip: NewTip) -> Result<bool, MarketError> {
        let mut tables = self.tables.write().await;
        if tables.tips.values().any(|t| t.title == tip.title) {
            return Ok(false);
        }
        let id = next_id(&mut tables.next_tip_id);
        tables.tips.insert(
            id,
            Tip {
                id,
                title: tip.title,
                description: tip.description,
                category: tip.category,
                icon: tip.icon,
                impact: tip.impact,
            },
        );
        Ok(true)
    }

    async fn list_tips(&self, category: Option<&str>) -> Result<Vec<Tip>, MarketError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tips
            .values()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .cloned()
            .collect())
    }

    async fn admin_stats(&self) -> Result<AdminStats, MarketError> {
        let tables = self.tables.read().await;
        Ok(AdminStats {
            total_users: count(tables.users.len()),
            total_products: count(tables.products.len()),
            total_revenue: tables.transactions.iter().map(|t| t.amount).sum(),
            pickup_requests: count(tables.pickups.len()),
        })
    }

    async fn dealer_stats(&self, dealer_email: &str) -> Result<DealerStats, MarketError> {
        let tables = self.tables.read().await;
        let owned = || {
            tables
                .products
                .values()
                .filter(|p| p.dealer_email == dealer_email)
        };
        let sold = || {
            tables
                .transactions
                .iter()
                .filter(|t| t.dealer_email == dealer_email)
        };
        Ok(DealerStats {
            total_products: count(owned().count()),
            total_earnings: sold().map(|t| t.amount).sum(),
            pending_approval: count(
                owned()
                    .filter(|p| p.status == ProductStatus::Pending)
                    .count(),
            ),
            orders_received: count(sold().count()),
        })
    }

    async fn customer_stats(&self, customer_email: &str) -> Result<CustomerStats, MarketError> {
        let tables = self.tables.read().await;
        let bought = || {
            tables
                .transactions
                .iter()
                .filter(|t| t.customer_email == customer_email)
        };
        Ok(CustomerStats {
            total_pickups: count(
                tables
                    .pickups
                    .iter()
                    .filter(|p| p.user_email == customer_email)
                    .count(),
            ),
            total_orders: count(bought().count()),
            total_spent: bought().map(|t| t.amount).sum(),
        })
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{ProductVisibility, RateTrend, Role, TransactionId, TransactionStatus, UserStatus};

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test".to_string(),
            phone: "1".to_string(),
            address: "x".to_string(),
            role,
            status: UserStatus::Active,
            business_name: None,
        }
    }

    fn new_product(dealer: &str, name: &str) -> NewProduct {
        NewProduct {
            dealer_email: dealer.to_string(),
            dealer_name: "Dealer".to_string(),
            name: name.to_string(),
            price: 10.0,
            category: "metals".to_string(),
            description: String::new(),
            stock: 1,
            image: String::new(),
        }
    }

    fn order(customer: &str, dealer: &str, amount: f64) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            customer_email: customer.to_string(),
            customer_name: "C".to_string(),
            dealer_email: dealer.to_string(),
            items: Vec::new(),
            amount,
            payment_method: "cod".to_string(),
            address: "x".to_string(),
            status: TransactionStatus::Pending,
            date: Utc::now().date_naive(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let Ok(first) = store.insert_user(new_user("a@x.com", Role::Customer)).await else {
            panic!("first insert");
        };
        assert_eq!(first.id, 1);
        let second = store.insert_user(new_user("a@x.com", Role::Dealer)).await;
        assert!(matches!(second, Err(MarketError::Conflict(_))));
    }

    #[tokio::test]
    async fn products_start_pending_and_page_in_id_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let Ok(p) = store.insert_product(new_product("d@x.com", &format!("p{i}"))).await else {
                panic!("insert product");
            };
            assert_eq!(p.status, ProductStatus::Pending);
        }
        let query = ProductQuery {
            visibility: ProductVisibility::AdminView { status: None },
            category: None,
            search: None,
            limit: 2,
            offset: 1,
        };
        let Ok(page) = store.list_products(&query).await else {
            panic!("list products");
        };
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn referenced_user_cannot_be_deleted() {
        let store = MemoryStore::new();
        let Ok(dealer) = store.insert_user(new_user("d@x.com", Role::Dealer)).await else {
            panic!("insert dealer");
        };
        let Ok(product) = store.insert_product(new_product("d@x.com", "wire")).await else {
            panic!("insert product");
        };
        assert!(matches!(
            store.delete_user(dealer.id).await,
            Err(MarketError::Conflict(_))
        ));
        assert!(matches!(store.delete_product(product.id).await, Ok(true)));
        assert!(matches!(store.delete_user(dealer.id).await, Ok(true)));
        assert!(matches!(store.delete_user(dealer.id).await, Ok(false)));
    }

    #[tokio::test]
    async fn deleting_user_drops_sessions() {
        let store = MemoryStore::new();
        let Ok(user) = store.insert_user(new_user("a@x.com", Role::Customer)).await else {
            panic!("insert user");
        };
        let Ok(session) = Session::open(user.id, chrono::Duration::hours(1)) else {
            panic!("open session");
        };
        assert!(store.insert_session(&session).await.is_ok());
        assert!(store.delete_user(user.id).await.is_ok());
        assert!(matches!(store.find_session(session.id).await, Ok(None)));
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let store = MemoryStore::new();
        let Ok(user) = store.insert_user(new_user("a@x.com", Role::Customer)).await else {
            panic!("insert user");
        };
        let (Ok(short), Ok(long)) = (
            Session::open(user.id, chrono::Duration::seconds(1)),
            Session::open(user.id, chrono::Duration::hours(1)),
        ) else {
            panic!("open sessions");
        };
        assert!(store.insert_session(&short).await.is_ok());
        assert!(store.insert_session(&long).await.is_ok());

        let later = Utc::now() + chrono::Duration::minutes(5);
        assert!(matches!(store.purge_expired_sessions(later).await, Ok(1)));
        assert!(matches!(store.find_session(short.id).await, Ok(None)));
        assert!(matches!(store.find_session(long.id).await, Ok(Some(_))));
    }

    #[tokio::test]
    async fn rate_seed_is_idempotent_and_updates_skip_unknown() {
        let store = MemoryStore::new();
        let steel = NewRate {
            material: "Steel".to_string(),
            rate_per_kg: 45.0,
            trend: RateTrend::Stable,
            icon: "🔩".to_string(),
        };
        assert!(matches!(store.insert_rate_if_absent(steel.clone()).await, Ok(true)));
        assert!(matches!(store.insert_rate_if_absent(steel).await, Ok(false)));

        let updates = [
            RateUpdate {
                material: "Steel".to_string(),
                rate_per_kg: 50.0,
                trend: RateTrend::Up,
                icon: "🔩".to_string(),
            },
            RateUpdate {
                material: "Unobtainium".to_string(),
                rate_per_kg: 1.0,
                trend: RateTrend::Down,
                icon: "?".to_string(),
            },
        ];
        assert!(matches!(store.update_rates(&updates).await, Ok(1)));
        let Ok(Some(rate)) = store.find_rate("Steel").await else {
            panic!("steel rate");
        };
        assert!((rate.rate_per_kg - 50.0).abs() < f64::EPSILON);
        assert_eq!(rate.trend, RateTrend::Up);
    }

    #[tokio::test]
    async fn stats_sum_amounts_per_role() {
        let store = MemoryStore::new();
        for txn in [
            order("c1@x.com", "d1@x.com", 100.0),
            order("c1@x.com", "d2@x.com", 50.0),
            order("c2@x.com", "d1@x.com", 25.0),
        ] {
            assert!(store.insert_transaction(&txn).await.is_ok());
        }
        let Ok(admin) = store.admin_stats().await else {
            panic!("admin stats");
        };
        assert!((admin.total_revenue - 175.0).abs() < f64::EPSILON);

        let Ok(dealer) = store.dealer_stats("d1@x.com").await else {
            panic!("dealer stats");
        };
        assert_eq!(dealer.orders_received, 2);
        assert!((dealer.total_earnings - 125.0).abs() < f64::EPSILON);

        let Ok(customer) = store.customer_stats("c1@x.com").await else {
            panic!("customer stats");
        };
        assert_eq!(customer.total_orders, 2);
        assert!((customer.total_spent - 150.0).abs() < f64::EPSILON);
        assert_eq!(customer.total_pickups, 0);
    }
}
