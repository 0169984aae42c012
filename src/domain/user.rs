//! User accounts and the change sets applied to them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{Role, UserStatus};

/// A stored account.
///
/// Serializes without the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    /// Database-assigned identifier.
    pub id: i64,
    /// Unique login email.
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Business identity.
    pub role: Role,
    /// Moderation state.
    pub status: UserStatus,
    /// Trading name, dealers only.
    pub business_name: Option<String>,
    /// Registration time.
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Returns `true` if an admin blocked this account.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.status == UserStatus::Blocked
    }
}

/// Data needed to insert a user. The store assigns `id` and `join_date`.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login email.
    pub email: String,
    /// Already-hashed password.
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Business identity.
    pub role: Role,
    /// Initial moderation state.
    pub status: UserStatus,
    /// Trading name, dealers only.
    pub business_name: Option<String>,
}

/// Self-service profile edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// New full name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New trading name.
    pub business_name: Option<String>,
}

impl ProfileChanges {
    /// Applies the change set in place.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(phone) = &self.phone {
            user.phone.clone_from(phone);
        }
        if let Some(address) = &self.address {
            user.address.clone_from(address);
        }
        if let Some(business_name) = &self.business_name {
            user.business_name = Some(business_name.clone());
        }
    }
}

/// Moderator override of account state. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAdminChanges {
    /// New moderation state.
    pub status: Option<UserStatus>,
    /// New role.
    pub role: Option<Role>,
}

impl UserAdminChanges {
    /// Applies the change set in place.
    pub fn apply(&self, user: &mut User) {
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_user(id: i64, email: &str, role: Role) -> User {
    User {
        id,
        email: email.to_string(),
        password_hash: String::new(),
        name: "Sample".to_string(),
        phone: "1".to_string(),
        address: "x".to_string(),
        role,
        status: UserStatus::Active,
        business_name: None,
        join_date: Utc::now(),
    }
}
