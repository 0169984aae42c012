//! Account service: registration, login sessions, profiles and the
//! admin user directory.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::{PasswordHasher, SessionCookies};
use crate::domain::{NewUser, ProfileChanges, Role, Session, User, UserAdminChanges, UserStatus};
use crate::error::MarketError;
use crate::persistence::{DUPLICATE_EMAIL, MarketStore};

/// Validated registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Full name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Requested role; only customer and dealer may self-register.
    pub role: Role,
    /// Trading name for dealers.
    pub business_name: Option<String>,
}

/// Validated change-password form.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    /// Password currently on file.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
    /// Must equal `new_password`.
    pub confirm_password: String,
}

/// A successful sign-in: the account and the `Set-Cookie` value carrying
/// its new session.
#[derive(Debug)]
pub struct SignedIn {
    /// Signed-in account.
    pub user: User,
    /// Session cookie to return to the client.
    pub set_cookie: String,
}

/// Owns every operation on user accounts and their sessions.
#[derive(Debug, Clone)]
pub struct AccountService {
    store: Arc<dyn MarketStore>,
    hasher: PasswordHasher,
    cookies: SessionCookies,
}

impl AccountService {
    /// Creates a new `AccountService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>, hasher: PasswordHasher, cookies: SessionCookies) -> Self {
        Self {
            store,
            hasher,
            cookies,
        }
    }

    /// Returns the session cookie signer.
    #[must_use]
    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// Returns the password hasher.
    #[must_use]
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Creates an active account and signs it in.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidRequest`] if the role is `admin`.
    /// - [`MarketError::Conflict`] if the email is already registered.
    pub async fn register(&self, form: Registration) -> Result<SignedIn, MarketError> {
        if form.role == Role::Admin {
            return Err(MarketError::InvalidRequest(
                "role must be customer or dealer".to_string(),
            ));
        }
        if self.store.find_user_by_email(&form.email).await?.is_some() {
            return Err(MarketError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = self.hasher.hash(&form.password).await?;
        let user = self
            .store
            .insert_user(NewUser {
                email: form.email,
                password_hash,
                name: form.name,
                phone: form.phone,
                address: form.address,
                role: form.role,
                status: UserStatus::Active,
                business_name: form.business_name.filter(|b| !b.is_empty()),
            })
            .await?;

        let set_cookie = self.open_session(&user).await?;
        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(SignedIn { user, set_cookie })
    }

    /// Checks credentials and opens a session.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthenticated`] on unknown email or wrong password.
    /// - [`MarketError::Forbidden`] if the account is blocked; no session
    ///   is opened.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, MarketError> {
        let invalid = || MarketError::Unauthenticated("Invalid email or password".to_string());

        let user = self.store.find_user_by_email(email).await?.ok_or_else(invalid)?;
        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "login rejected: wrong password");
            return Err(invalid());
        }
        if user.is_blocked() {
            tracing::warn!(user_id = user.id, "login rejected: account blocked");
            return Err(MarketError::Forbidden("Account is blocked".to_string()));
        }

        let set_cookie = self.open_session(&user).await?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(SignedIn { user, set_cookie })
    }

    async fn open_session(&self, user: &User) -> Result<String, MarketError> {
        let purged = self.store.purge_expired_sessions(Utc::now()).await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions removed");
        }
        let session = Session::open(user.id, self.cookies.lifetime())?;
        self.store.insert_session(&session).await?;
        Ok(self.cookies.set_cookie(session.id))
    }

    /// Ends a session and returns the cookie that clears it.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn logout(&self, session_id: Uuid) -> Result<String, MarketError> {
        self.store.delete_session(session_id).await?;
        Ok(self.cookies.clear_cookie())
    }

    /// Resolves a verified session key to its account. Expired sessions
    /// are deleted and yield `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn resolve_session(&self, session_id: Uuid) -> Result<Option<User>, MarketError> {
        let Some(session) = self.store.find_session(session_id).await? else {
            return Ok(None);
        };
        if session.is_expired_at(Utc::now()) {
            self.store.delete_session(session_id).await?;
            tracing::debug!(user_id = session.user_id, "expired session removed");
            return Ok(None);
        }
        self.store.find_user(session.user_id).await
    }

    /// Applies a self-service profile edit.
    ///
    /// # Errors
    ///
    /// [`MarketError::NotFound`] if the account vanished meanwhile.
    pub async fn update_profile(
        &self,
        user_id: i64,
        changes: &ProfileChanges,
    ) -> Result<User, MarketError> {
        let user = self
            .store
            .update_profile(user_id, changes)
            .await?
            .ok_or_else(user_not_found)?;
        tracing::info!(user_id, "profile updated");
        Ok(user)
    }

    /// Replaces the caller's password after checking the current one.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] if the current password is wrong,
    /// the new one equals it, or the confirmation differs.
    pub async fn change_password(
        &self,
        user: &User,
        change: PasswordChange,
    ) -> Result<(), MarketError> {
        if !self
            .hasher
            .verify(&change.current_password, &user.password_hash)
            .await?
        {
            return Err(MarketError::InvalidRequest(
                "Current password is incorrect".to_string(),
            ));
        }
        if change.new_password == change.current_password {
            return Err(MarketError::InvalidRequest(
                "New password must be different from current password".to_string(),
            ));
        }
        if change.new_password != change.confirm_password {
            return Err(MarketError::InvalidRequest(
                "New password and confirmation do not match".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&change.new_password).await?;
        if !self.store.set_password_hash(user.id, &password_hash).await? {
            return Err(user_not_found());
        }
        tracing::info!(user_id = user.id, "password changed");
        Ok(())
    }

    /// Lists every account.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn list_users(&self) -> Result<Vec<User>, MarketError> {
        self.store.list_users().await
    }

    /// Applies a moderator override of status and/or role.
    ///
    /// # Errors
    ///
    /// [`MarketError::NotFound`] for an unknown id.
    pub async fn update_user(
        &self,
        user_id: i64,
        changes: UserAdminChanges,
    ) -> Result<User, MarketError> {
        let user = self
            .store
            .update_user_admin(user_id, changes)
            .await?
            .ok_or_else(user_not_found)?;
        tracing::info!(user_id, status = %user.status, role = %user.role, "user updated by admin");
        Ok(user)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] for an unknown id.
    /// - [`MarketError::Conflict`] if other rows still reference the user.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), MarketError> {
        if !self.store.delete_user(user_id).await? {
            return Err(user_not_found());
        }
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}

fn user_not_found() -> MarketError {
    MarketError::NotFound("User not found".to_string())
}
