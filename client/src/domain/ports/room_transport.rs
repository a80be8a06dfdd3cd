//! Driven port for the remote room service.
//!
//! The domain builds a [`RoomRequest`] and hands it over unchanged; the
//! adapter resolves it against the configured base URL and reports the raw
//! status and body. Interpretation stays in the domain.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::RoomRequest;

/// HTTP method used by a room operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl RequestMethod {
    /// Upper-case method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully buffered response from the room service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl RoomResponse {
    /// Build a response from its parts.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

define_port_error! {
    /// Failures that prevented an HTTP exchange from completing.
    pub enum RoomTransportError {
        /// Connect, DNS, or stream failure.
        Transport {
            /// Underlying error text.
            message: String,
        } =>
            "room service transport failed: {message}",
        /// The transport's own timeout elapsed.
        Timeout {
            /// Underlying error text.
            message: String,
        } =>
            "room service timed out: {message}",
        /// The request could not be turned into a URL.
        InvalidRequest {
            /// Why the request was rejected.
            message: String,
        } =>
            "room service request invalid: {message}",
    }
}

impl RoomTransportError {
    /// Underlying cause without the category prefix.
    #[must_use]
    pub fn cause(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Timeout { message }
            | Self::InvalidRequest { message } => message.as_str(),
        }
    }
}

/// Port for sending one request to the room service.
///
/// Implementations issue exactly one exchange per call: no retries and no
/// timeout beyond the transport's defaults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomTransport: Send + Sync {
    /// Send `request` and buffer the whole response.
    async fn send(&self, request: &RoomRequest) -> Result<RoomResponse, RoomTransportError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RequestMethod::Get, "GET")]
    #[case(RequestMethod::Post, "POST")]
    #[case(RequestMethod::Put, "PUT")]
    #[case(RequestMethod::Delete, "DELETE")]
    fn methods_render_upper_case(#[case] method: RequestMethod, #[case] expected: &str) {
        assert_eq!(method.to_string(), expected);
    }

    #[test]
    fn transport_errors_carry_cause() {
        let err = RoomTransportError::transport("connection refused");
        assert_eq!(
            err.to_string(),
            "room service transport failed: connection refused"
        );
        assert_eq!(err.cause(), "connection refused");
    }
}
