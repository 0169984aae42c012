//! Closed vocabularies stored as lowercase strings: roles, account
//! status, and the three lifecycle status fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::MarketError;

/// Business identity of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sells scrap and buys from the marketplace.
    Customer,
    /// Collection/processing business that lists products.
    Dealer,
    /// Platform moderator.
    Admin,
}

impl Role {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Dealer => "dealer",
            Self::Admin => "admin",
        }
    }

    /// Error message used when a handler requires this role.
    #[must_use]
    pub const fn access_required_message(self) -> &'static str {
        match self {
            Self::Customer => "Customer access required",
            Self::Dealer => "Dealer access required",
            Self::Admin => "Admin access required",
        }
    }
}

impl FromStr for Role {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "dealer" => Ok(Self::Dealer),
            "admin" => Ok(Self::Admin),
            other => Err(MarketError::InvalidRequest(format!("invalid role: {other}"))),
        }
    }
}

/// Moderation state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// May log in and use the API.
    Active,
    /// Refused at login and on every authenticated route.
    Blocked,
}

impl UserStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }
}

impl FromStr for UserStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            other => Err(MarketError::InvalidRequest(format!(
                "invalid user status: {other}"
            ))),
        }
    }
}

/// Approval state of a product listing.
///
/// Listings start `Pending`; only an admin moves them to `Approved` or
/// `Rejected`, in any direction and any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Awaiting moderation.
    Pending,
    /// Visible to everyone.
    Approved,
    /// Hidden from customers.
    Rejected,
}

impl ProductStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(MarketError::InvalidRequest(format!(
                "invalid product status: {other}"
            ))),
        }
    }
}

/// Progress of a scrap pickup. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PickupStatus {
    /// Booked, not yet collected.
    Scheduled,
    /// Collected.
    Completed,
    /// Called off.
    Cancelled,
}

impl PickupStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PickupStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(MarketError::InvalidRequest(format!(
                "invalid pickup status: {other}"
            ))),
        }
    }
}

/// Settlement state of an order. Set once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Cash on delivery, not yet paid.
    Pending,
    /// Paid up front.
    Completed,
    /// Called off.
    Cancelled,
}

impl TransactionStatus {
    /// Payment method string that leaves an order pending.
    pub const CASH_ON_DELIVERY: &'static str = "cod";

    /// Derives the initial status from the payment method: `"cod"` is
    /// pending, anything else is completed.
    #[must_use]
    pub fn for_payment_method(method: &str) -> Self {
        if method == Self::CASH_ON_DELIVERY {
            Self::Pending
        } else {
            Self::Completed
        }
    }

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(MarketError::InvalidRequest(format!(
                "invalid transaction status: {other}"
            ))),
        }
    }
}

/// Market direction shown next to a material rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RateTrend {
    /// Price rising.
    Up,
    /// Price falling.
    Down,
    /// No significant movement.
    #[default]
    Stable,
}

impl RateTrend {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl FromStr for RateTrend {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "stable" => Ok(Self::Stable),
            other => Err(MarketError::InvalidRequest(format!("invalid trend: {other}"))),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(
    Role,
    UserStatus,
    ProductStatus,
    PickupStatus,
    TransactionStatus,
    RateTrend,
);
