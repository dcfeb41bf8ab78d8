//! Argon2id password hashing.
//!
//! Default cost is m=19456 KiB, t=2, p=1. Hashes carrying a different
//! algorithm or a different cost verify as usual and report `needs_rehash`,
//! so logins move old accounts onto the current cost.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use dealerdesk_application::PasswordHasher as PasswordHasherPort;
use dealerdesk_core::{AppError, AppResult};

/// Memory cost in KiB.
pub const DEFAULT_MEMORY_KIB: u32 = 19_456;
/// Number of passes.
pub const DEFAULT_ITERATIONS: u32 = 2;
/// Degree of parallelism.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Argon2id implementation of the password hashing port.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    params: Params,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the default cost.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(
            DEFAULT_MEMORY_KIB,
            DEFAULT_ITERATIONS,
            DEFAULT_PARALLELISM,
            None,
        )
        .unwrap_or_default();

        Self::from_params(params)
    }

    /// Creates a hasher with an explicit cost.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|error| {
            AppError::Validation(format!("invalid argon2 cost parameters: {error}"))
        })?;

        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone()),
            params,
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        // Accounts seeded outside the service may carry a non-PHC value.
        let Ok(parsed) = PasswordHash::new(hash) else {
            return Ok(false);
        };

        // Verification uses the cost encoded in the hash, not the configured one.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        Params::try_from(&parsed).map_or(true, |stored| {
            stored.m_cost() != self.params.m_cost()
                || stored.t_cost() != self.params.t_cost()
                || stored.p_cost() != self.params.p_cost()
        })
    }
}

#[cfg(test)]
mod tests {
    use dealerdesk_application::PasswordHasher as PasswordHasherPort;
    use dealerdesk_core::{AppError, AppResult};

    use super::Argon2PasswordHasher;

    fn cheap() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_cost(1024, 1, 1)
            .unwrap_or_else(|error| panic!("cheap cost rejected: {error}"))
    }

    #[test]
    fn verifies_the_password_it_hashed() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("pátio-central-2026")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("pátio-central-2026", &hash)?);
        assert!(!hasher.verify_password("pátio-central-2025", &hash)?);
        Ok(())
    }

    #[test]
    fn salts_every_hash() -> AppResult<()> {
        let hasher = cheap();

        assert_ne!(
            hasher.hash_password("same-password")?,
            hasher.hash_password("same-password")?
        );
        Ok(())
    }

    #[test]
    fn malformed_stored_hash_never_verifies() -> AppResult<()> {
        let hasher = cheap();

        assert!(!hasher.verify_password("anything", "plain-text")?);
        assert!(hasher.needs_rehash("plain-text"));
        Ok(())
    }

    #[test]
    fn hash_with_older_cost_verifies_and_asks_for_rehash() -> AppResult<()> {
        let old_hash = cheap().hash_password("troca-de-oleo")?;
        let current = Argon2PasswordHasher::new();

        assert!(current.verify_password("troca-de-oleo", &old_hash)?);
        assert!(current.needs_rehash(&old_hash));
        assert!(!current.needs_rehash(&current.hash_password("troca-de-oleo")?));
        Ok(())
    }

    #[test]
    fn invalid_cost_is_rejected() {
        assert!(matches!(
            Argon2PasswordHasher::with_cost(1, 1, 0),
            Err(AppError::Validation(_))
        ));
    }
}
