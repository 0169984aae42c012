//! Persistence layer: the [`MarketStore`] trait and its backends.
//!
//! Every trait method is one atomic unit of work: a single statement, or
//! an explicit database transaction when several rows change together.
//! Handlers therefore never observe a half-applied request.
//!
//! - [`postgres::PgStore`] is the production backend (`sqlx::PgPool`).
//! - [`memory::MemoryStore`] keeps everything in a `RwLock`-guarded map
//!   and is selected with `PERSISTENCE_ENABLED=false`.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AdminStats, CustomerStats, DealerStats, NewProduct, NewRate, NewTip, NewUser, Pickup, PickupId,
    PickupStatus, Product, ProductChanges, ProductQuery, ProductStatus, ProfileChanges, Rate,
    RateUpdate, Session, Tip, Transaction, TransactionScope, User, UserAdminChanges,
};
use crate::error::MarketError;

/// Conflict message for a second account with the same email.
pub const DUPLICATE_EMAIL: &str = "Email already registered";

/// Conflict message for deleting a user that rows still point at.
pub const USER_STILL_REFERENCED: &str =
    "User still has products, pickups or transactions and cannot be deleted";

/// Storage operations required by the services.
#[async_trait]
pub trait MarketStore: Send + Sync + std::fmt::Debug {
    // ── Users ───────────────────────────────────────────────────────────

    /// Inserts a user.
    ///
    /// # Errors
    ///
    /// [`MarketError::Conflict`] if the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, MarketError>;

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_user(&self, id: i64) -> Result<Option<User>, MarketError>;

    /// Looks up a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, MarketError>;

    /// Lists every user in id order.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_users(&self) -> Result<Vec<User>, MarketError>;

    /// Applies a profile edit, returning the updated user.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, MarketError>;

    /// Applies a moderator override, returning the updated user.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn update_user_admin(
        &self,
        id: i64,
        changes: UserAdminChanges,
    ) -> Result<Option<User>, MarketError>;

    /// Replaces a user's password hash. Returns `false` if no such user.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<bool, MarketError>;

    /// Deletes a user and their sessions. Returns `false` if no such user.
    ///
    /// # Errors
    ///
    /// [`MarketError::Conflict`] if products, pickups or transactions
    /// still reference the user.
    async fn delete_user(&self, id: i64) -> Result<bool, MarketError>;

    // ── Sessions ────────────────────────────────────────────────────────

    /// Stores a freshly opened session.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_session(&self, session: &Session) -> Result<(), MarketError>;

    /// Looks up a session by key.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, MarketError>;

    /// Removes a session. Missing sessions are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn delete_session(&self, id: Uuid) -> Result<(), MarketError>;

    /// Removes every session whose expiry is at or before `now` and
    /// returns how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, MarketError>;

    // ── Products ────────────────────────────────────────────────────────

    /// Inserts a listing at status pending.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, MarketError>;

    /// Looks up a listing by id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_product(&self, id: i64) -> Result<Option<Product>, MarketError>;

    /// Lists listings matching `query`, in id order.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, MarketError>;

    /// Applies a partial edit, returning the updated listing.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn update_product(
        &self,
        id: i64,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, MarketError>;

    /// Overwrites the approval status, returning the updated listing.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn set_product_status(
        &self,
        id: i64,
        status: ProductStatus,
    ) -> Result<Option<Product>, MarketError>;

    /// Deletes a listing. Returns `false` if no such listing.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn delete_product(&self, id: i64) -> Result<bool, MarketError>;

    // ── Pickups ─────────────────────────────────────────────────────────

    /// Stores a new pickup.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_pickup(&self, pickup: &Pickup) -> Result<(), MarketError>;

    /// Looks up a pickup by id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_pickup(&self, id: &PickupId) -> Result<Option<Pickup>, MarketError>;

    /// Lists pickups, all of them or those booked by `owner_email`.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_pickups(&self, owner_email: Option<&str>) -> Result<Vec<Pickup>, MarketError>;

    /// Overwrites a pickup's status, returning the updated pickup.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn set_pickup_status(
        &self,
        id: &PickupId,
        status: PickupStatus,
    ) -> Result<Option<Pickup>, MarketError>;

    // ── Transactions ────────────────────────────────────────────────────

    /// Stores a new order.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_transaction(&self, txn: &Transaction) -> Result<(), MarketError>;

    /// Lists orders within `scope`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_transactions(
        &self,
        scope: &TransactionScope,
    ) -> Result<Vec<Transaction>, MarketError>;

    // ── Rates & tips ────────────────────────────────────────────────────

    /// Inserts a rate unless the material already has one. Returns
    /// whether a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_rate_if_absent(&self, rate: NewRate) -> Result<bool, MarketError>;

    /// Lists every rate in id order.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_rates(&self) -> Result<Vec<Rate>, MarketError>;

    /// Looks up the rate for an exact material name.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn find_rate(&self, material: &str) -> Result<Option<Rate>, MarketError>;

    /// Applies a batch of rate updates atomically. Updates naming unknown
    /// materials are skipped. Returns the number of rates changed.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure; nothing is applied.
    async fn update_rates(&self, updates: &[RateUpdate]) -> Result<u64, MarketError>;

    /// Inserts a tip unless one with the same title exists.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn insert_tip_if_absent(&self, tip: NewTip) -> Result<bool, MarketError>;

    /// Lists tips, optionally only those of one category.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn list_tips(&self, category: Option<&str>) -> Result<Vec<Tip>, MarketError>;

    // ── Dashboard ───────────────────────────────────────────────────────

    /// Platform-wide totals.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn admin_stats(&self) -> Result<AdminStats, MarketError>;

    /// Totals for one dealer.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn dealer_stats(&self, dealer_email: &str) -> Result<DealerStats, MarketError>;

    /// Totals for one customer.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    async fn customer_stats(&self, customer_email: &str) -> Result<CustomerStats, MarketError>;
}
