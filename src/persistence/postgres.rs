//! PostgreSQL implementation of the persistence layer.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{DUPLICATE_EMAIL, MarketStore, USER_STILL_REFERENCED};
use crate::config::MarketConfig;
use crate::domain::{
    AdminStats, CustomerStats, DealerStats, NewProduct, NewRate, NewTip, NewUser, Pickup, PickupId,
    PickupStatus, Product, ProductChanges, ProductQuery, ProductStatus, ProductVisibility,
    ProfileChanges, Rate, RateUpdate, Session, Tip, Transaction, TransactionId, TransactionScope,
    User, UserAdminChanges,
};
use crate::error::MarketError;

const USER_COLUMNS: &str =
    "id, email, password_hash, name, phone, address, role, status, business_name, join_date";

const PRODUCT_COLUMNS: &str = "id, dealer_email, dealer_name, name, price, category, description, \
     status, stock, rating, image, created_at";

const PICKUP_COLUMNS: &str = "id, user_email, user_name, material, weight, date, time, address, \
     estimated_value, status, booked_date";

const TRANSACTION_COLUMNS: &str = "id, customer_email, customer_name, dealer_email, items, amount, \
     payment_method, address, status, date, timestamp";

const RATE_COLUMNS: &str = "id, material, rate_per_kg, trend, icon";

const TIP_COLUMNS: &str = "id, title, description, category, icon, impact";

/// Parses a status column, treating unknown values as storage corruption.
fn decode<T: FromStr>(column: &str, raw: &str) -> Result<T, MarketError> {
    raw.parse()
        .map_err(|_| MarketError::Persistence(format!("unexpected {column} value '{raw}'")))
}

/// Replaces the generic conflict produced by a constraint violation.
fn conflict_as(message: &str) -> impl Fn(sqlx::Error) -> MarketError + '_ {
    move |err| match MarketError::from(err) {
        MarketError::Conflict(_) => MarketError::Conflict(message.to_string()),
        other => other,
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
    phone: String,
    address: String,
    role: String,
    status: String,
    business_name: Option<String>,
    join_date: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = MarketError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            role: decode("role", &row.role)?,
            status: decode("user status", &row.status)?,
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            phone: row.phone,
            address: row.address,
            business_name: row.business_name,
            join_date: row.join_date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    dealer_email: String,
    dealer_name: String,
    name: String,
    price: f64,
    category: String,
    description: String,
    status: String,
    stock: i64,
    rating: f64,
    image: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = MarketError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: decode("product status", &row.status)?,
            id: row.id,
            dealer_email: row.dealer_email,
            dealer_name: row.dealer_name,
            name: row.name,
            price: row.price,
            category: row.category,
            description: row.description,
            stock: row.stock,
            rating: row.rating,
            image: row.image,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PickupRow {
    id: String,
    user_email: String,
    user_name: String,
    material: String,
    weight: f64,
    date: NaiveDate,
    time: String,
    address: String,
    estimated_value: f64,
    status: String,
    booked_date: NaiveDate,
}

impl TryFrom<PickupRow> for Pickup {
    type Error = MarketError;

    fn try_from(row: PickupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: decode("pickup status", &row.status)?,
            id: PickupId::from_string(row.id),
            user_email: row.user_email,
            user_name: row.user_name,
            material: row.material,
            weight: row.weight,
            date: row.date,
            time: row.time,
            address: row.address,
            estimated_value: row.estimated_value,
            booked_date: row.booked_date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    customer_email: String,
    customer_name: String,
    dealer_email: String,
    items: Json<Vec<serde_json::Value>>,
    amount: f64,
    payment_method: String,
    address: String,
    status: String,
    date: NaiveDate,
    timestamp: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = MarketError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: decode("transaction status", &row.status)?,
            id: TransactionId::from_string(row.id),
            customer_email: row.customer_email,
            customer_name: row.customer_name,
            dealer_email: row.dealer_email,
            items: row.items.0,
            amount: row.amount,
            payment_method: row.payment_method,
            address: row.address,
            date: row.date,
            timestamp: row.timestamp,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RateRow {
    id: i64,
    material: String,
    rate_per_kg: f64,
    trend: String,
    icon: String,
}

impl TryFrom<RateRow> for Rate {
    type Error = MarketError;

    fn try_from(row: RateRow) -> Result<Self, Self::Error> {
        Ok(Self {
            trend: decode("rate trend", &row.trend)?,
            id: row.id,
            material: row.material,
            rate_per_kg: row.rate_per_kg,
            icon: row.icon,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TipRow {
    id: i64,
    title: String,
    description: String,
    category: String,
    icon: String,
    impact: String,
}

impl From<TipRow> for Tip {
    fn from(row: TipRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            icon: row.icon,
            impact: row.impact,
        }
    }
}

fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, MarketError>
where
    T: TryFrom<R, Error = MarketError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// PostgreSQL-backed [`MarketStore`] using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by `config` and applies pending
    /// migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Persistence`] if the database is unreachable
    /// or a migration fails.
    pub async fn connect(config: &MarketConfig) -> Result<Self, MarketError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| MarketError::Persistence(e.to_string()))?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "database pool ready, migrations applied"
        );
        Ok(Self::new(pool))
    }

    async fn fetch_user(&self, sql: &str, key: i64) -> Result<Option<User>, MarketError> {
        sqlx::query_as::<_, UserRow>(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl MarketStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, MarketError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash, name, phone, address, role, status, business_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(&user.business_name)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_as(DUPLICATE_EMAIL))?;

        User::try_from(row)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, MarketError> {
        self.fetch_user(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"), id)
            .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, MarketError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, MarketError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        collect_rows(rows)
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, MarketError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 phone = COALESCE($3, phone), \
                 address = COALESCE($4, address), \
                 business_name = COALESCE($5, business_name) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(&changes.business_name)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn update_user_admin(
        &self,
        id: i64,
        changes: UserAdminChanges,
    ) -> Result<Option<User>, MarketError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET status = COALESCE($2, status), role = COALESCE($3, role) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.role.map(|r| r.as_str()))
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<bool, MarketError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, MarketError> {
        // Sessions cascade; products, pickups and orders are restricted.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(conflict_as(USER_STILL_REFERENCED))?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_session(&self, session: &Session) -> Result<(), MarketError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, MarketError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Session::from))
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), MarketError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, MarketError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, MarketError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (dealer_email, dealer_name, name, price, category, description, status, stock, image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.dealer_email)
        .bind(&product.dealer_name)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.description)
        .bind(ProductStatus::Pending.as_str())
        .bind(product.stock)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await?;

        Product::try_from(row)
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, MarketError> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, MarketError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));

        match &query.visibility {
            ProductVisibility::ApprovedOnly => {
                qb.push(" AND status = ");
                qb.push_bind(ProductStatus::Approved.as_str());
            }
            ProductVisibility::DealerView { dealer_email } => {
                qb.push(" AND (status = ");
                qb.push_bind(ProductStatus::Approved.as_str());
                qb.push(" OR dealer_email = ");
                qb.push_bind(dealer_email.clone());
                qb.push(")");
            }
            ProductVisibility::AdminView { status: Some(status) } => {
                qb.push(" AND status = ");
                qb.push_bind(status.as_str());
            }
            ProductVisibility::AdminView { status: None } => {}
        }

        if let Some(category) = &query.category {
            qb.push(" AND category = ");
            qb.push_bind(category.clone());
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR description ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR dealer_name ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY id LIMIT ");
        qb.push_bind(i64::from(query.limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::from(query.offset));

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;
        collect_rows(rows)
    }

    async fn update_product(
        &self,
        id: i64,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, MarketError> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 price = COALESCE($3, price), \
                 category = COALESCE($4, category), \
                 description = COALESCE($5, description), \
                 stock = COALESCE($6, stock), \
                 image = COALESCE($7, image) \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(&changes.category)
        .bind(&changes.description)
        .bind(changes.stock)
        .bind(&changes.image)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn set_product_status(
        &self,
        id: i64,
        status: ProductStatus,
    ) -> Result<Option<Product>, MarketError> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET status = $2 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn delete_product(&self, id: i64) -> Result<bool, MarketError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_pickup(&self, pickup: &Pickup) -> Result<(), MarketError> {
        sqlx::query(&format!(
            "INSERT INTO pickups ({PICKUP_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        ))
        .bind(pickup.id.as_str())
        .bind(&pickup.user_email)
        .bind(&pickup.user_name)
        .bind(&pickup.material)
        .bind(pickup.weight)
        .bind(pickup.date)
        .bind(&pickup.time)
        .bind(&pickup.address)
        .bind(pickup.estimated_value)
        .bind(pickup.status.as_str())
        .bind(pickup.booked_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_pickup(&self, id: &PickupId) -> Result<Option<Pickup>, MarketError> {
        sqlx::query_as::<_, PickupRow>(&format!(
            "SELECT {PICKUP_COLUMNS} FROM pickups WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Pickup::try_from)
        .transpose()
    }

    async fn list_pickups(&self, owner_email: Option<&str>) -> Result<Vec<Pickup>, MarketError> {
        let rows = if let Some(email) = owner_email {
            sqlx::query_as::<_, PickupRow>(&format!(
                "SELECT {PICKUP_COLUMNS} FROM pickups WHERE user_email = $1 ORDER BY seq"
            ))
            .bind(email)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, PickupRow>(&format!(
                "SELECT {PICKUP_COLUMNS} FROM pickups ORDER BY seq"
            ))
            .fetch_all(&self.pool)
            .await
        }?;
        collect_rows(rows)
    }

    async fn set_pickup_status(
        &self,
        id: &PickupId,
        status: PickupStatus,
    ) -> Result<Option<Pickup>, MarketError> {
        sqlx::query_as::<_, PickupRow>(&format!(
            "UPDATE pickups SET status = $2 WHERE id = $1 RETURNING {PICKUP_COLUMNS}"
        ))
        .bind(id.as_str())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Pickup::try_from)
        .transpose()
    }

    async fn insert_transaction(&self, txn: &Transaction) -> Result<(), MarketError> {
        sqlx::query(&format!(
            "INSERT INTO transactions ({TRANSACTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        ))
        .bind(txn.id.as_str())
        .bind(&txn.customer_email)
        .bind(&txn.customer_name)
        .bind(&txn.dealer_email)
        .bind(Json(&txn.items))
        .bind(txn.amount)
        .bind(&txn.payment_method)
        .bind(&txn.address)
        .bind(txn.status.as_str())
        .bind(txn.date)
        .bind(txn.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_transactions(
        &self,
        scope: &TransactionScope,
    ) -> Result<Vec<Transaction>, MarketError> {
        let base = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions");
        let rows = match scope {
            TransactionScope::All => {
                sqlx::query_as::<_, TransactionRow>(&format!("{base} ORDER BY seq"))
                    .fetch_all(&self.pool)
                    .await
            }
            TransactionScope::SoldBy(email) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "{base} WHERE dealer_email = $1 ORDER BY seq"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await
            }
            TransactionScope::BoughtBy(email) => {
                sqlx::query_as::<_, TransactionRow>(&format!(
                    "{base} WHERE customer_email = $1 ORDER BY seq"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await
            }
        }?;
        collect_rows(rows)
    }

    async fn insert_rate_if_absent(&self, rate: NewRate) -> Result<bool, MarketError> {
        let result = sqlx::query(
            "INSERT INTO rates (material, rate_per_kg, trend, icon) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (material) DO NOTHING",
        )
        .bind(&rate.material)
        .bind(rate.rate_per_kg)
        .bind(rate.trend.as_str())
        .bind(&rate.icon)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_rates(&self) -> Result<Vec<Rate>, MarketError> {
        let rows = sqlx::query_as::<_, RateRow>(&format!(
            "SELECT {RATE_COLUMNS} FROM rates ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        collect_rows(rows)
    }

    async fn find_rate(&self, material: &str) -> Result<Option<Rate>, MarketError> {
        sqlx::query_as::<_, RateRow>(&format!(
            "SELECT {RATE_COLUMNS} FROM rates WHERE material = $1"
        ))
        .bind(material)
        .fetch_optional(&self.pool)
        .await?
        .map(Rate::try_from)
        .transpose()
    }

    async fn update_rates(&self, updates: &[RateUpdate]) -> Result<u64, MarketError> {
        let mut tx = self.pool.begin().await?;
        let mut changed = 0;
        for update in updates {
            let result = sqlx::query(
                "UPDATE rates SET rate_per_kg = $2, trend = $3, icon = $4 WHERE material = $1",
            )
            .bind(&update.material)
            .bind(update.rate_per_kg)
            .bind(update.trend.as_str())
            .bind(&update.icon)
            .execute(&mut *tx)
            .await?;
            changed += result.rows_affected();
        }
        tx.commit().await?;
        Ok(changed)
    }

    async fn insert_tip_if_absent(&self, tip: NewTip) -> Result<bool, MarketError> {
        let result = sqlx::query(
            "INSERT INTO tips (title, description, category, icon, impact) \
             SELECT $1, $2, $3, $4, $5 \
             WHERE NOT EXISTS (SELECT 1 FROM tips WHERE title = $1)",
        )
        .bind(&tip.title)
        .bind(&tip.description)
        .bind(&tip.category)
        .bind(&tip.icon)
        .bind(&tip.impact)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_tips(&self, category: Option<&str>) -> Result<Vec<Tip>, MarketError> {
        let rows = if let Some(category) = category {
            sqlx::query_as::<_, TipRow>(&format!(
                "SELECT {TIP_COLUMNS} FROM tips WHERE category = $1 ORDER BY id"
            ))
            .bind(category)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, TipRow>(&format!("SELECT {TIP_COLUMNS} FROM tips ORDER BY id"))
                .fetch_all(&self.pool)
                .await
        }?;
        Ok(rows.into_iter().map(Tip::from).collect())
    }

    async fn admin_stats(&self) -> Result<AdminStats, MarketError> {
        let (total_users, total_products, total_revenue, pickup_requests) =
            sqlx::query_as::<_, (i64, i64, f64, i64)>(
                "SELECT \
                     (SELECT COUNT(*) FROM users), \
                     (SELECT COUNT(*) FROM products), \
                     (SELECT COALESCE(SUM(amount), 0) FROM transactions), \
                     (SELECT COUNT(*) FROM pickups)",
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(AdminStats {
            total_users,
            total_products,
            total_revenue,
            pickup_requests,
        })
    }

    async fn dealer_stats(&self, dealer_email: &str) -> Result<DealerStats, MarketError> {
        let (total_products, total_earnings, pending_approval, orders_received) =
            sqlx::query_as::<_, (i64, f64, i64, i64)>(
                "SELECT \
                     (SELECT COUNT(*) FROM products WHERE dealer_email = $1), \
                     (SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE dealer_email = $1), \
                     (SELECT COUNT(*) FROM products WHERE dealer_email = $1 AND status = $2), \
                     (SELECT COUNT(*) FROM transactions WHERE dealer_email = $1)",
            )
            .bind(dealer_email)
            .bind(ProductStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(DealerStats {
            total_products,
            total_earnings,
            pending_approval,
            orders_received,
        })
    }

    async fn customer_stats(&self, customer_email: &str) -> Result<CustomerStats, MarketError> {
        let (total_pickups, total_orders, total_spent) = sqlx::query_as::<_, (i64, i64, f64)>(
            "SELECT \
                 (SELECT COUNT(*) FROM pickups WHERE user_email = $1), \
                 (SELECT COUNT(*) FROM transactions WHERE customer_email = $1), \
                 (SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE customer_email = $1)",
        )
        .bind(customer_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(CustomerStats {
            total_pickups,
            total_orders,
            total_spent,
        })
    }
}
