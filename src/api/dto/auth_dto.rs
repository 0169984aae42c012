//! DTOs for registration, login, profile and password endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{non_blank, required};
use crate::domain::{ProfileChanges, Role, User};
use crate::error::MarketError;
use crate::service::{PasswordChange, Registration};

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Full name.
    pub name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// `customer` or `dealer`.
    pub role: Option<String>,
    /// Trading name, dealers only.
    pub business_name: Option<String>,
}

impl RegisterRequest {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] naming the first missing field, or
    /// an unknown role.
    pub fn into_registration(self) -> Result<Registration, MarketError> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?;
        let phone = required(self.phone, "phone")?;
        let address = required(self.address, "address")?;
        let password = required(self.password, "password")?;
        let role: Role = required(self.role, "role")?.parse()?;
        Ok(Registration {
            name,
            email: email.trim().to_string(),
            phone,
            address,
            password,
            role,
            business_name: non_blank(self.business_name),
        })
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)`.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] if either is missing.
    pub fn into_credentials(self) -> Result<(String, String), MarketError> {
        match (non_blank(self.email), non_blank(self.password)) {
            (Some(email), Some(password)) => Ok((email.trim().to_string(), password)),
            _ => Err(MarketError::InvalidRequest(
                "Email and password are required".to_string(),
            )),
        }
    }
}

/// Request body for `PUT /api/auth/profile`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// New full name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New trading name.
    pub business_name: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            address: req.address,
            business_name: req.business_name,
        }
    }
}

/// Request body for `POST /api/auth/change-password`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// Password currently on file.
    pub current_password: Option<String>,
    /// Replacement password.
    pub new_password: Option<String>,
    /// Repeat of `new_password`.
    pub confirm_password: Option<String>,
}

impl ChangePasswordRequest {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] naming the first missing field.
    pub fn into_change(self) -> Result<PasswordChange, MarketError> {
        Ok(PasswordChange {
            current_password: required(self.current_password, "current_password")?,
            new_password: required(self.new_password, "new_password")?,
            confirm_password: required(self.confirm_password, "confirm_password")?,
        })
    }
}

/// `{"message", "user"}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The account.
    pub user: User,
}

/// `{"user"}` envelope returned by `GET /api/auth/profile`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// The signed-in account.
    pub user: User,
}
