//! Authenticated identity and the explicit permission checks handlers
//! run before doing any work.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::{Role, User};
use crate::error::MarketError;

/// The signed-in, non-blocked account making the request.
///
/// Extracting it fails with 401 when the request carries no valid
/// session and with 403 when the account is blocked. Use
/// `Option<CurrentUser>` on public routes whose output depends on the
/// caller; there a missing, invalid or blocked session reads as
/// anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The account.
    pub user: User,
    /// Key of the session the request arrived with.
    pub session_id: Uuid,
}

impl CurrentUser {
    /// Fails unless the caller has exactly `role`.
    ///
    /// # Errors
    ///
    /// [`MarketError::Forbidden`] naming the required role.
    pub fn require_role(&self, role: Role) -> Result<(), MarketError> {
        require_role(&self.user, role)
    }

    /// Fails unless the caller owns the row (by email) or is an admin.
    ///
    /// # Errors
    ///
    /// [`MarketError::Forbidden`] otherwise.
    pub fn require_owner_or_admin(&self, owner_email: &str) -> Result<(), MarketError> {
        require_owner_or_admin(&self.user, owner_email)
    }
}

/// Fails unless `user` has exactly `role`.
///
/// # Errors
///
/// [`MarketError::Forbidden`] naming the required role.
pub fn require_role(user: &User, role: Role) -> Result<(), MarketError> {
    if user.role == role {
        Ok(())
    } else {
        Err(MarketError::Forbidden(
            role.access_required_message().to_string(),
        ))
    }
}

/// Fails unless `user` is `owner_email` or an admin.
///
/// # Errors
///
/// [`MarketError::Forbidden`] otherwise.
pub fn require_owner_or_admin(user: &User, owner_email: &str) -> Result<(), MarketError> {
    if user.role == Role::Admin || user.email == owner_email {
        Ok(())
    } else {
        Err(MarketError::Forbidden("Access denied".to_string()))
    }
}

async fn session_user(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<(User, Uuid)>, MarketError> {
    let Some(session_id) = state.accounts.cookies().session_id(&parts.headers) else {
        return Ok(None);
    };
    Ok(state
        .accounts
        .resolve_session(session_id)
        .await?
        .map(|user| (user, session_id)))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = MarketError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some((user, session_id)) = session_user(parts, state).await? else {
            return Err(MarketError::Unauthenticated(
                "Authentication required".to_string(),
            ));
        };
        if user.is_blocked() {
            return Err(MarketError::Forbidden("Account is blocked".to_string()));
        }
        Ok(Self { user, session_id })
    }
}

impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = MarketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(session_user(parts, state)
            .await?
            .filter(|(user, _)| !user.is_blocked())
            .map(|(user, session_id)| Self { user, session_id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::sample_user;

    #[test]
    fn role_gate_names_the_role() {
        let customer = sample_user(1, "c@x.com", Role::Customer);
        assert!(require_role(&customer, Role::Customer).is_ok());
        let err = require_role(&customer, Role::Admin).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Admin access required".to_string())
        );
    }

    #[test]
    fn owner_or_admin() {
        let owner = sample_user(1, "d@x.com", Role::Dealer);
        let stranger = sample_user(2, "e@x.com", Role::Dealer);
        let admin = sample_user(3, "a@x.com", Role::Admin);
        assert!(require_owner_or_admin(&owner, "d@x.com").is_ok());
        assert!(require_owner_or_admin(&admin, "d@x.com").is_ok());
        assert!(matches!(
            require_owner_or_admin(&stranger, "d@x.com"),
            Err(MarketError::Forbidden(_))
        ));
    }
}
