//! Domain-level error types.
//!
//! These errors are transport agnostic. The terminal adapter renders them as
//! one-line messages and returns to the current menu; none of them end the
//! process.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Local input failed validation; no request was issued.
    Validation,
    /// Login failed. The cause (unknown user or wrong password) is withheld.
    Unauthenticated,
    /// Registration collided with an existing username.
    AlreadyExists,
    /// The intent is not offered in the current menu state.
    NotPermitted,
    /// The remote service answered 404.
    NotFound,
    /// The remote service answered with a non-200, non-404 status.
    ClientError,
    /// The HTTP exchange could not be completed.
    Transport,
    /// A successful response lacked the structured field the caller needed.
    ParseAbsent,
    /// The credential document exists but does not have the expected shape.
    StoreCorrupt,
    /// The credential document could not be read or written.
    StoreUnavailable,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation_error",
            Self::Unauthenticated => "unauthenticated",
            Self::AlreadyExists => "already_exists",
            Self::NotPermitted => "not_permitted",
            Self::NotFound => "not_found",
            Self::ClientError => "client_error",
            Self::Transport => "transport_error",
            Self::ParseAbsent => "parse_absent",
            Self::StoreCorrupt => "store_corrupt",
            Self::StoreUnavailable => "store_unavailable",
        };
        f.write_str(label)
    }
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::already_exists("username 'alice' is taken");
/// assert_eq!(err.code(), ErrorCode::AlreadyExists);
/// assert_eq!(err.to_string(), "username 'alice' is taken");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
}

impl DomainError {
    /// Create a new error from a code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to the operator.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyExists`].
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, message)
    }

    /// Convenience constructor for [`ErrorCode::NotPermitted`].
    #[must_use]
    pub fn not_permitted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotPermitted, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreCorrupt`].
    #[must_use]
    pub fn store_corrupt(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreCorrupt, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {}
