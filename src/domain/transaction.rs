//! Orders placed by customers with dealers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{Role, TransactionId, TransactionStatus, User};

/// A recorded order.
///
/// The amount is taken as supplied by the client and the listed items are
/// stored verbatim; stock levels are not touched.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Transaction {
    /// `TXN` + UUID.
    #[schema(value_type = String)]
    pub id: TransactionId,
    /// Buyer's email.
    pub customer_email: String,
    /// Buyer's name.
    pub customer_name: String,
    /// Seller's email.
    pub dealer_email: String,
    /// Cart lines as sent by the client.
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<serde_json::Value>,
    /// Order total.
    pub amount: f64,
    /// Free-form payment method (`cod`, `upi`, `card`, ...).
    pub payment_method: String,
    /// Delivery address.
    pub address: String,
    /// Derived from the payment method at creation, never changed.
    pub status: TransactionStatus,
    /// Order day.
    pub date: NaiveDate,
    /// Order instant.
    pub timestamp: DateTime<Utc>,
}

/// Which orders a caller may list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionScope {
    /// Every order (admins).
    All,
    /// Orders sold by this dealer.
    SoldBy(String),
    /// Orders bought by this customer.
    BoughtBy(String),
}

impl TransactionScope {
    /// Resolves the scope for an authenticated caller.
    #[must_use]
    pub fn for_caller(user: &User) -> Self {
        match user.role {
            Role::Admin => Self::All,
            Role::Dealer => Self::SoldBy(user.email.clone()),
            Role::Customer => Self::BoughtBy(user.email.clone()),
        }
    }

    /// Returns `true` if `txn` falls within this scope.
    #[must_use]
    pub fn admits(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::SoldBy(email) => &txn.dealer_email == email,
            Self::BoughtBy(email) => &txn.customer_email == email,
        }
    }
}
