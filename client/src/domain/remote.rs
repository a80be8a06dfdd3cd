//! Interpretation of room-service responses.
//!
//! Classification is a total function of the status code, shared by every
//! operation. Only proximity imposes a schema on the body.

use std::fmt;

use serde_json::Value;

use super::error::{DomainError, ErrorCode};

/// Tagged outcome of a single remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOperationResult<T = String> {
    /// Status 200 with its payload.
    Success(T),
    /// Status 404.
    NotFound,
    /// Any status other than 200 or 404.
    ClientError(u16),
    /// The exchange did not complete.
    TransportError(String),
}

impl<T> RemoteOperationResult<T> {
    /// Transform the success payload, keeping failures as they are.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteOperationResult<U> {
        match self {
            Self::Success(payload) => RemoteOperationResult::Success(f(payload)),
            Self::NotFound => RemoteOperationResult::NotFound,
            Self::ClientError(status) => RemoteOperationResult::ClientError(status),
            Self::TransportError(cause) => RemoteOperationResult::TransportError(cause),
        }
    }

    /// Whether the call returned status 200.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert failures into domain errors for display.
    ///
    /// # Examples
    /// ```
    /// use globaldorm_client::domain::{ErrorCode, RemoteOperationResult};
    ///
    /// let result: RemoteOperationResult = RemoteOperationResult::ClientError(500);
    /// let err = result.into_result().unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::ClientError);
    /// assert_eq!(err.message(), "Request failed with status 500.");
    /// ```
    pub fn into_result(self) -> Result<T, DomainError> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::NotFound => Err(DomainError::new(ErrorCode::NotFound, "Not found.")),
            Self::ClientError(status) => Err(DomainError::new(
                ErrorCode::ClientError,
                format!("Request failed with status {status}."),
            )),
            Self::TransportError(cause) => Err(DomainError::new(
                ErrorCode::Transport,
                format!("Could not reach the room service: {cause}"),
            )),
        }
    }
}

/// Classify a buffered response by status code.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{RemoteOperationResult, classify_response};
///
/// assert_eq!(
///     classify_response(200, "[]".to_owned()),
///     RemoteOperationResult::Success("[]".to_owned())
/// );
/// assert_eq!(classify_response(404, String::new()), RemoteOperationResult::NotFound);
/// ```
#[must_use]
pub fn classify_response(status: u16, body: String) -> RemoteOperationResult {
    match status {
        200 => RemoteOperationResult::Success(body),
        404 => RemoteOperationResult::NotFound,
        other => RemoteOperationResult::ClientError(other),
    }
}

/// Route length in metres, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    meters: f64,
}

#[expect(clippy::float_arithmetic, reason = "metre to kilometre conversion")]
impl Distance {
    /// Wrap a finite, non-negative metre value.
    #[must_use]
    pub fn from_meters(meters: f64) -> Option<Self> {
        (meters.is_finite() && meters >= 0.0).then_some(Self { meters })
    }

    /// Metres as returned by the service.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.meters
    }

    /// Unrounded kilometres.
    #[must_use]
    pub const fn kilometres(self) -> f64 {
        self.meters / 1000.0
    }

    /// Kilometres rounded to two decimals for display.
    ///
    /// Rounds on whole decametres so that 12345 m gives 12.35 rather than
    /// inheriting the binary error of 12.345.
    #[must_use]
    pub fn rounded_kilometres(self) -> f64 {
        (self.meters / 10.0).round() / 100.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km", self.rounded_kilometres())
    }
}

/// Distance extracted from a proximity response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceQueryResult {
    /// `routes[0].distance` was present.
    Distance(Distance),
    /// The document was not JSON, or `routes` was missing, empty or
    /// lacked a usable distance.
    Absent,
}

impl DistanceQueryResult {
    /// Require a distance, reporting [`ErrorCode::ParseAbsent`] otherwise.
    pub fn into_distance(self) -> Result<Distance, DomainError> {
        match self {
            Self::Distance(distance) => Ok(distance),
            Self::Absent => Err(DomainError::new(
                ErrorCode::ParseAbsent,
                "Distance information is unavailable.",
            )),
        }
    }
}

/// Extract `routes[0].distance` from a proximity body.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{DistanceQueryResult, interpret_distance};
///
/// let body = r#"{"routes":[{"distance":12345.0}]}"#;
/// let DistanceQueryResult::Distance(d) = interpret_distance(body) else {
///     panic!("distance expected");
/// };
/// assert_eq!(d.to_string(), "12.35 km");
/// assert_eq!(interpret_distance(r#"{"routes":[]}"#), DistanceQueryResult::Absent);
/// ```
#[must_use]
pub fn interpret_distance(body: &str) -> DistanceQueryResult {
    let Ok(document) = serde_json::from_str::<Value>(body) else {
        return DistanceQueryResult::Absent;
    };
    document
        .get("routes")
        .and_then(Value::as_array)
        .and_then(|routes| routes.first())
        .and_then(|route| route.get("distance"))
        .and_then(Value::as_f64)
        .and_then(Distance::from_meters)
        .map_or(DistanceQueryResult::Absent, DistanceQueryResult::Distance)
}
