//! Argon2id password hashing.
//!
//! Hashes are PHC strings, so the parameters used at hash time travel
//! with the hash and verification keeps working after a config change.
//! Both operations are CPU-bound and run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::MarketError;

/// Memory cost used when `PASSWORD_HASH_MEMORY_KIB` is not set.
pub const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;

/// Argon2id hasher with fixed cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Builds a hasher using `memory_kib` KiB of memory per hash and the
    /// default time and parallelism costs.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Internal`] if the memory cost is outside
    /// the range Argon2 accepts.
    pub fn new(memory_kib: u32) -> Result<Self, MarketError> {
        let params = Params::new(
            memory_kib,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| MarketError::Internal(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Internal`] if hashing fails or the blocking
    /// task panics.
    pub async fn hash(&self, password: &str) -> Result<String, MarketError> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| MarketError::Internal(format!("password hashing failed: {e}")))
        })
        .await
        .map_err(|e| MarketError::Internal(format!("hashing task failed: {e}")))?
    }

    /// Checks `password` against a stored PHC string. A malformed stored
    /// hash never matches.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Internal`] if the blocking task panics.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, MarketError> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            PasswordHash::new(&stored_hash).is_ok_and(|parsed| {
                argon2
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
        })
        .await
        .map_err(|e| MarketError::Internal(format!("verification task failed: {e}")))
    }
}
