//! One-way password digests used for credential storage and comparison.
//!
//! Digests are unsalted, unkeyed SHA-256 rendered as 64 lowercase hex
//! characters. This matches the on-disk format of existing credential
//! documents; it is a known weakness (identical passwords share a digest and
//! are open to precomputed lookup) and changing it would invalidate every
//! stored record.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::user::UserValidationError;

/// Length of an encoded digest in hex characters.
pub const PASSWORD_HASH_LEN: usize = 64;

/// Hex-encoded SHA-256 digest of a password.
///
/// ## Invariants
/// - Exactly [`PASSWORD_HASH_LEN`] characters.
/// - Only `0-9` and `a-f`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Validate an already-encoded digest, e.g. one read from disk.
    pub fn parse(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let digest: String = encoded.into();
        let well_formed = digest.len() == PASSWORD_HASH_LEN
            && digest
                .bytes()
                .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'));
        if well_formed {
            Ok(Self(digest))
        } else {
            Err(UserValidationError::InvalidPasswordHash)
        }
    }

    /// Return whether `plaintext` hashes to this digest.
    #[must_use]
    pub fn matches(&self, plaintext: &str) -> bool {
        hash_password(plaintext) == *self
    }

    /// Encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Digests are credential material; keep them out of debug logs.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Hash a plaintext password into its stored representation.
///
/// Pure and deterministic: identical input always yields identical output.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::hash_password;
///
/// let digest = hash_password("pw1");
/// assert_eq!(digest.as_str().len(), 64);
/// assert_eq!(digest, hash_password("pw1"));
/// ```
#[must_use]
pub fn hash_password(plaintext: &str) -> PasswordHash {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    PasswordHash(hex::encode(hasher.finalize()))
}
