//! Server-side login sessions.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::MarketError;

/// A login session. The cookie only carries the signed `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Random session key.
    pub id: Uuid,
    /// Account the session belongs to.
    pub user_id: i64,
    /// Issue time.
    pub created_at: DateTime<Utc>,
    /// Instant after which the session is void.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a new session for `user_id` lasting `lifetime`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Internal`] if the expiry falls outside the
    /// timestamp range.
    pub fn open(user_id: i64, lifetime: Duration) -> Result<Self, MarketError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            MarketError::Internal("session expiry out of range".to_string())
        })?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at,
        })
    }

    /// Returns `true` once `now` has reached `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
