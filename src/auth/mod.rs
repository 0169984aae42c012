//! Credentials, sessions and caller identity.

pub mod identity;
pub mod password;
pub mod session;

pub use identity::{CurrentUser, require_owner_or_admin, require_role};
pub use password::PasswordHasher;
pub use session::{SESSION_COOKIE, SessionCookies};
