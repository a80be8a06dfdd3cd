//! Credential record model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::password::PasswordHash;
use super::session::Role;

/// Validation errors returned by the credential model constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was empty or only whitespace.
    EmptyUsername,
    /// Stored password digest was not 64 lowercase hex characters.
    InvalidPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::InvalidPasswordHash => {
                write!(f, "password digest must be 64 lowercase hex characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique, case-sensitive account key.
///
/// The value is kept exactly as supplied; `"Alice"` and `"alice"` are
/// distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let value: String = username.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored credential record.
///
/// Serialised as `{"username": .., "password": <hex digest>, "isAdmin": ..}`.
/// Documents written before the admin flag existed omit `isAdmin`; those
/// records load as residents.
///
/// ## Invariants
/// - `username` is non-blank.
/// - `password_hash` is a well-formed digest.
/// - Records are immutable once created.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{Role, UserRecord, Username, hash_password};
///
/// let record = UserRecord::new(Username::new("bob").unwrap(), hash_password("pw2"), true);
/// assert_eq!(record.role(), Role::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecordDto", into = "UserRecordDto")]
pub struct UserRecord {
    username: Username,
    password_hash: PasswordHash,
    is_admin: bool,
}

impl UserRecord {
    /// Build a record from validated parts.
    #[must_use]
    pub const fn new(username: Username, password_hash: PasswordHash, is_admin: bool) -> Self {
        Self {
            username,
            password_hash,
            is_admin,
        }
    }

    /// Account key.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Administrator flag as stored.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Role granted to a session that logs in with this record.
    #[must_use]
    pub const fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecordDto {
    username: String,
    password: String,
    #[serde(default)]
    is_admin: bool,
}

impl From<UserRecord> for UserRecordDto {
    fn from(value: UserRecord) -> Self {
        Self {
            username: value.username.into(),
            password: value.password_hash.into(),
            is_admin: value.is_admin,
        }
    }
}

impl TryFrom<UserRecordDto> for UserRecord {
    type Error = UserValidationError;

    fn try_from(value: UserRecordDto) -> Result<Self, Self::Error> {
        let UserRecordDto {
            username,
            password,
            is_admin,
        } = value;
        Ok(Self::new(
            Username::new(username)?,
            PasswordHash::parse(password)?,
            is_admin,
        ))
    }
}
