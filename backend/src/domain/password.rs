//! Salted one-way password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), which carry the
//! algorithm parameters and the per-hash random salt alongside the digest.

use std::fmt;
use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use tracing::warn;

/// Failures while producing or reading a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The hasher rejected its input or parameters.
    #[error("failed to hash password: {0}")]
    Hash(String),
    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// PHC-formatted Argon2id hash of a password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use recipe_box::domain::PasswordHash;
    ///
    /// let hash = PasswordHash::generate("open sesame").expect("hash");
    /// assert!(hash.as_str().starts_with("$argon2id$"));
    /// assert!(hash.verify("open sesame").expect("verify"));
    /// assert!(!hash.verify("open says me").expect("verify"));
    /// ```
    pub fn generate(password: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash(err.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string read back from storage after checking it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let phc = phc.into();
        password_hash::PasswordHash::new(&phc)
            .map_err(|err| PasswordError::Malformed(err.to_string()))?;
        Ok(Self(phc))
    }

    /// Check `password` against this hash.
    pub fn verify(&self, password: &str) -> Result<bool, PasswordError> {
        let parsed = password_hash::PasswordHash::new(&self.0)
            .map_err(|err| PasswordError::Malformed(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// PHC string for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

static DUMMY_HASH: LazyLock<Result<PasswordHash, PasswordError>> =
    LazyLock::new(|| PasswordHash::generate("recipe-box-dummy-password"));

/// Burn one verification against a throwaway hash.
///
/// Used when a login names an unknown user so the miss costs about as much as
/// a wrong password.
pub fn verify_against_dummy(password: &str) {
    burn_verification(&DUMMY_HASH, password);
}

/// Returns whether the verification work was actually done.
fn burn_verification(dummy: &Result<PasswordHash, PasswordError>, password: &str) -> bool {
    match dummy {
        Ok(hash) => {
            let _ = hash.verify(password);
            true
        }
        Err(error) => {
            warn!(%error, "dummy hash unavailable; unknown-user logins answer faster");
            false
        }
    }
}
