//! Operator secret verification.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::{Deserialize, Serialize};

/// The shared operator secret, as configured at rest.
///
/// A configured value starting with `$argon2` is treated as a password
/// hash; anything else is compared as an exact plaintext match. Either
/// way, callers only ever see the boolean outcome of [`verify`].
///
/// [`verify`]: AdminSecret::verify
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdminSecret {
    Plain(String),
    Hashed(String),
}

impl AdminSecret {
    /// Classify a configured secret string.
    pub fn parse(configured: impl Into<String>) -> Self {
        let configured = configured.into();
        if configured.starts_with("$argon2") {
            Self::Hashed(configured)
        } else {
            Self::Plain(configured)
        }
    }

    /// Check a secret presented by a caller.
    ///
    /// Returns `true` only on an exact plaintext match or a successful
    /// argon2 verification; a malformed stored hash verifies as `false`
    /// rather than erroring.
    pub fn verify(&self, presented: &str) -> bool {
        match self {
            Self::Plain(expected) => expected == presented,
            Self::Hashed(hash) => {
                let Ok(parsed_hash) = PasswordHash::new(hash) else {
                    return false;
                };
                Argon2::default()
                    .verify_password(presented.as_bytes(), &parsed_hash)
                    .is_ok()
            }
        }
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("AdminSecret::Plain(..)"),
            Self::Hashed(_) => f.write_str("AdminSecret::Hashed(..)"),
        }
    }
}

impl From<String> for AdminSecret {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<AdminSecret> for String {
    fn from(value: AdminSecret) -> Self {
        match value {
            AdminSecret::Plain(s) | AdminSecret::Hashed(s) => s,
        }
    }
}
