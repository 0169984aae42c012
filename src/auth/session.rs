//! Signed session cookies.
//!
//! The cookie value is `<session uuid>.<signature>`, where the signature
//! is the unpadded base64url HMAC-SHA256 of the uuid under `SECRET_KEY`.
//! The session row itself lives in the store; the cookie only proves the
//! client was handed that key by this server.

use std::fmt;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::MarketError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "ecoscrap_session";

type HmacSha256 = Hmac<Sha256>;

/// Issues and checks session cookies.
#[derive(Clone)]
pub struct SessionCookies {
    mac: HmacSha256,
    lifetime: chrono::Duration,
    secure: bool,
}

impl fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookies")
            .field("lifetime", &self.lifetime)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionCookies {
    /// Creates a signer keyed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Internal`] if the key is rejected by HMAC or
    /// the lifetime does not fit a timestamp offset.
    pub fn new(secret: &[u8], lifetime_secs: u64, secure: bool) -> Result<Self, MarketError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| MarketError::Internal(format!("invalid session key: {e}")))?;
        let lifetime = i64::try_from(lifetime_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .filter(|lifetime| chrono::Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or_else(|| MarketError::Internal("session lifetime out of range".to_string()))?;
        Ok(Self {
            mac,
            lifetime,
            secure,
        })
    }

    /// How long a freshly opened session stays valid.
    #[must_use]
    pub fn lifetime(&self) -> chrono::Duration {
        self.lifetime
    }

    fn signature(&self, id: Uuid) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac
    }

    /// Returns the signed cookie value for a session key.
    #[must_use]
    pub fn sign(&self, id: Uuid) -> String {
        let tag = self.signature(id).finalize().into_bytes();
        format!("{id}.{}", URL_SAFE_NO_PAD.encode(tag))
    }

    /// Returns the session key inside `token` if its signature verifies.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let (raw_id, raw_tag) = token.split_once('.')?;
        let id = Uuid::parse_str(raw_id).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(raw_tag).ok()?;
        self.signature(id).verify_slice(&tag).ok()?;
        Some(id)
    }

    /// `Set-Cookie` value that installs a session.
    #[must_use]
    pub fn set_cookie(&self, id: Uuid) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            self.sign(id),
            self.lifetime.num_seconds(),
            self.secure_attr()
        )
    }

    /// `Set-Cookie` value that removes the session cookie.
    #[must_use]
    pub fn clear_cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.secure_attr()
        )
    }

    fn secure_attr(&self) -> &'static str {
        if self.secure { "; Secure" } else { "" }
    }

    /// Extracts and verifies the session key from request headers.
    #[must_use]
    pub fn session_id(&self, headers: &HeaderMap) -> Option<Uuid> {
        session_token(headers).and_then(|token| self.verify(token))
    }
}

/// Raw value of the session cookie, if the request carries one.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then_some(value)
        })
}
