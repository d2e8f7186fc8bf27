//! Password hashing
//!
//! Credentials are stored as Argon2id PHC strings (`$argon2id$...`) keyed by a
//! server-side pepper. Rows written before hashing was introduced hold the raw
//! password; they still verify and are flagged for re-hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::AppError;

const ARGON2_PREFIX: &str = "$argon2";

/// How new passwords are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Raw string comparison, for databases shared with legacy clients
    Plaintext,
    Argon2id,
}

impl std::str::FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plaintext" => Ok(PasswordScheme::Plaintext),
            "argon2id" | "argon2" => Ok(PasswordScheme::Argon2id),
            _ => Err(format!("Unknown password scheme: {}", s)),
        }
    }
}

#[derive(Clone)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
    pepper: String,
    params: Params,
}

impl PasswordHasher {
    pub fn new(scheme: PasswordScheme, pepper: impl Into<String>) -> Self {
        Self {
            scheme,
            pepper: pepper.into(),
            params: Params::default(),
        }
    }

    /// Same hasher with cheaper Argon2 cost; hashes stay verifiable by `new`
    #[cfg(test)]
    pub fn low_cost(scheme: PasswordScheme, pepper: impl Into<String>) -> Self {
        let mut hasher = Self::new(scheme, pepper);
        if let Ok(params) = Params::new(Params::MIN_M_COST * 8, 1, 1, None) {
            hasher.params = params;
        }
        hasher
    }

    /// Encode a password for storage under the configured scheme
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        match self.scheme {
            PasswordScheme::Plaintext => Ok(password.to_string()),
            PasswordScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);
                self.argon2()?
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
            }
        }
    }

    /// Check a candidate against a stored value of either format
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if !stored.starts_with(ARGON2_PREFIX) {
            return stored == password;
        }

        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("Malformed password hash");
            return false;
        };
        match self.argon2() {
            Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::error!(error = %e, "Argon2 setup failed");
                false
            }
        }
    }

    /// True when a stored value should be replaced after a successful login
    pub fn needs_rehash(&self, stored: &str) -> bool {
        self.scheme == PasswordScheme::Argon2id && !stored.starts_with(ARGON2_PREFIX)
    }

    // Cost parameters are read back from the PHC string on verify
    fn argon2(&self) -> Result<Argon2<'_>, AppError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| AppError::Internal(format!("invalid password pepper: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argon2_hasher() -> PasswordHasher {
        PasswordHasher::low_cost(PasswordScheme::Argon2id, "test-pepper")
    }

    #[test]
    fn parse_scheme() {
        assert_eq!("plaintext".parse::<PasswordScheme>(), Ok(PasswordScheme::Plaintext));
        assert_eq!("Argon2id".parse::<PasswordScheme>(), Ok(PasswordScheme::Argon2id));
        assert!("hmac-sha256".parse::<PasswordScheme>().is_err());
    }

    #[test]
    fn argon2_hash_verifies() {
        let hasher = argon2_hasher();
        let stored = hasher.hash("s3cret").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret", &stored));
        assert!(!hasher.verify("wrong", &stored));
        assert!(!hasher.needs_rehash(&stored));
    }

    #[test]
    fn default_cost_hasher_verifies_low_cost_hash() {
        let stored = argon2_hasher().hash("s3cret").unwrap();
        let hasher = PasswordHasher::new(PasswordScheme::Argon2id, "test-pepper");
        assert!(hasher.verify("s3cret", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = argon2_hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn pepper_is_part_of_the_hash() {
        let stored = argon2_hasher().hash("s3cret").unwrap();

        let other = PasswordHasher::low_cost(PasswordScheme::Argon2id, "other-pepper");
        assert!(!other.verify("s3cret", &stored));

        // Without the pepper the hash cannot be checked by plain Argon2 either
        let parsed = PasswordHash::new(&stored).unwrap();
        assert!(Argon2::default()
            .verify_password(b"s3cret", &parsed)
            .is_err());
    }

    #[test]
    fn legacy_plaintext_still_verifies_and_needs_rehash() {
        let hasher = argon2_hasher();
        assert!(hasher.verify("legacy", "legacy"));
        assert!(!hasher.verify("nope", "legacy"));
        assert!(hasher.needs_rehash("legacy"));
    }

    #[test]
    fn plaintext_scheme_stores_raw_value() {
        let hasher = PasswordHasher::new(PasswordScheme::Plaintext, "unused");
        assert_eq!(hasher.hash("raw").unwrap(), "raw");
        assert!(hasher.verify("raw", "raw"));
        assert!(!hasher.needs_rehash("raw"));

        // Rows hashed earlier keep working after switching back
        let stored = PasswordHasher::low_cost(PasswordScheme::Argon2id, "unused")
            .hash("raw")
            .unwrap();
        assert!(hasher.verify("raw", &stored));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        let hasher = argon2_hasher();
        assert!(!hasher.verify("x", "$argon2id$garbage"));
        assert!(!hasher.verify("$argon2id$garbage", "$argon2id$garbage"));
    }
}
