//! Room-service identifiers and request construction.
//!
//! Every remote operation maps onto exactly one [`RoomRequest`]. Identifiers
//! are validated here so that an invalid value can never reach a request.

use std::fmt;

use serde::Serialize;

use super::ports::RequestMethod;
use super::user::Username;

/// Validation errors for room-service inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomValidationError {
    /// Application id was zero or negative.
    NonPositiveApplicationId {
        /// Rejected value.
        value: i64,
    },
    /// Room id was zero or negative.
    NonPositiveRoomId {
        /// Rejected value.
        value: i64,
    },
    /// Postcode was empty or only whitespace.
    BlankPostcode,
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveApplicationId { value } => {
                write!(f, "application id must be positive, got {value}")
            }
            Self::NonPositiveRoomId { value } => {
                write!(f, "room id must be positive, got {value}")
            }
            Self::BlankPostcode => write!(f, "postcode must not be empty"),
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// Positive identifier of a room application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use globaldorm_client::domain::ApplicationId;
    ///
    /// assert!(ApplicationId::new(7).is_ok());
    /// assert!(ApplicationId::new(0).is_err());
    /// ```
    pub const fn new(value: i64) -> Result<Self, RoomValidationError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(RoomValidationError::NonPositiveApplicationId { value })
        }
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Validate a raw identifier.
    pub const fn new(value: i64) -> Result<Self, RoomValidationError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(RoomValidationError::NonPositiveRoomId { value })
        }
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal code, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Postcode(String);

impl Postcode {
    /// Trim and validate a raw postcode.
    pub fn new(raw: &str) -> Result<Self, RoomValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::BlankPostcode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Trimmed postcode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Postcode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Payload of an apply request.
///
/// `user_id` always comes from the session, never from operator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationIntent {
    application_id: ApplicationId,
    room_id: RoomId,
    user_id: Username,
}

impl ApplicationIntent {
    /// Combine validated identifiers with the session's username.
    #[must_use]
    pub const fn new(application_id: ApplicationId, room_id: RoomId, user_id: Username) -> Self {
        Self {
            application_id,
            room_id,
            user_id,
        }
    }

    /// Application being submitted.
    #[must_use]
    pub const fn application_id(&self) -> ApplicationId {
        self.application_id
    }

    /// Room applied for.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Applicant.
    #[must_use]
    pub const fn user_id(&self) -> &Username {
        &self.user_id
    }
}

/// One outbound request, relative to the configured base URL.
///
/// Path segments and query values are kept raw; the transport adapter
/// percent-encodes them.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{ApplicationId, RoomRequest};
/// use globaldorm_client::domain::ports::RequestMethod;
///
/// let request = RoomRequest::cancel(ApplicationId::new(42).unwrap());
/// assert_eq!(request.method(), RequestMethod::Delete);
/// assert_eq!(request.path(), "/rooms/cancel/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRequest {
    method: RequestMethod,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<ApplicationIntent>,
}

impl RoomRequest {
    fn new(method: RequestMethod, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|segment| (*segment).to_owned()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_segment(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    fn with_query(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// `GET /rooms`
    #[must_use]
    pub fn list_rooms() -> Self {
        Self::new(RequestMethod::Get, &["rooms"])
    }

    /// `POST /rooms/apply` with a JSON body.
    #[must_use]
    pub fn apply(intent: ApplicationIntent) -> Self {
        let mut request = Self::new(RequestMethod::Post, &["rooms", "apply"]);
        request.body = Some(intent);
        request
    }

    /// `DELETE /rooms/cancel/{applicationId}`
    #[must_use]
    pub fn cancel(application_id: ApplicationId) -> Self {
        Self::new(RequestMethod::Delete, &["rooms", "cancel"]).with_segment(application_id)
    }

    /// `GET /rooms/history/{username}`
    #[must_use]
    pub fn history(username: &Username) -> Self {
        Self::new(RequestMethod::Get, &["rooms", "history"]).with_segment(username)
    }

    /// `GET /rooms/applications/pending`
    #[must_use]
    pub fn pending_applications() -> Self {
        Self::new(RequestMethod::Get, &["rooms", "applications", "pending"])
    }

    /// `PUT /rooms/accept/{applicationId}`
    #[must_use]
    pub fn accept_offer(application_id: ApplicationId) -> Self {
        Self::new(RequestMethod::Put, &["rooms", "accept"]).with_segment(application_id)
    }

    /// `GET /rooms/proximity?userPostcode=..&roomId=..`
    #[must_use]
    pub fn proximity(postcode: &Postcode, room_id: RoomId) -> Self {
        Self::new(RequestMethod::Get, &["rooms", "proximity"])
            .with_query("userPostcode", postcode.as_ref())
            .with_query("roomId", room_id)
    }

    /// `GET /rooms/rooms/weather?roomId=..`
    #[must_use]
    pub fn weather_by_room(room_id: RoomId) -> Self {
        Self::new(RequestMethod::Get, &["rooms", "rooms", "weather"]).with_query("roomId", room_id)
    }

    /// `GET /rooms/weather?postcode=..`
    #[must_use]
    pub fn weather_by_postcode(postcode: &Postcode) -> Self {
        Self::new(RequestMethod::Get, &["rooms", "weather"])
            .with_query("postcode", postcode.as_ref())
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> RequestMethod {
        self.method
    }

    /// Raw path segments below the base URL.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Raw query parameters in send order.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// JSON body, present only for apply.
    #[must_use]
    pub fn body(&self) -> Option<&ApplicationIntent> {
        self.body.as_ref()
    }

    /// Unencoded path for logs, e.g. `/rooms/cancel/42`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .fold(String::new(), |mut path, segment| {
                path.push('/');
                path.push_str(segment);
                path
            })
    }
}
