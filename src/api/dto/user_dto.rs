//! DTOs for the admin user directory.

use serde::Deserialize;
use utoipa::ToSchema;

use super::common_dto::non_blank;
use crate::domain::UserAdminChanges;
use crate::error::MarketError;

/// Request body for `PUT /api/admin/users/{id}`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// `active` or `blocked`.
    pub status: Option<String>,
    /// `customer`, `dealer` or `admin`.
    pub role: Option<String>,
}

impl UpdateUserRequest {
    /// Parses the requested changes.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] for an unknown status or role.
    pub fn into_changes(self) -> Result<UserAdminChanges, MarketError> {
        Ok(UserAdminChanges {
            status: non_blank(self.status).map(|s| s.parse()).transpose()?,
            role: non_blank(self.role).map(|r| r.parse()).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserStatus};

    #[test]
    fn partial_changes() {
        let req = UpdateUserRequest {
            status: Some("blocked".to_string()),
            role: None,
        };
        let changes = req.into_changes().ok();
        assert_eq!(changes.and_then(|c| c.status), Some(UserStatus::Blocked));
        assert_eq!(changes.and_then(|c| c.role), None::<Role>);
    }

    #[test]
    fn unknown_values_are_rejected() {
        let req = UpdateUserRequest {
            status: Some("frozen".to_string()),
            role: None,
        };
        assert!(req.into_changes().is_err());
    }
}
