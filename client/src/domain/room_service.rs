//! Room-service operations.
//!
//! Each method validates its inputs, builds one [`RoomRequest`], sends it
//! through the transport port once, and classifies the response. Validation
//! failures return before the transport is touched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ports::RoomTransport;
use super::DomainError;
use super::remote::{
    DistanceQueryResult, RemoteOperationResult, classify_response, interpret_distance,
};
use super::rooms::{
    ApplicationId, ApplicationIntent, Postcode, RoomId, RoomRequest, RoomValidationError,
};
use super::session::Session;
use super::user::Username;

fn map_validation_error(error: RoomValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}

fn require_identity(session: &Session) -> Result<&Username, DomainError> {
    session
        .identity()
        .ok_or_else(|| DomainError::unauthenticated("log in before using room operations"))
}

/// Client for the remote room service.
#[derive(Clone)]
pub struct RoomServiceClient<T> {
    transport: Arc<T>,
}

impl<T> RoomServiceClient<T> {
    /// Create a client over `transport`.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

impl<T> RoomServiceClient<T>
where
    T: RoomTransport,
{
    async fn dispatch(&self, request: RoomRequest) -> RemoteOperationResult {
        let method = request.method();
        let path = request.path();
        debug!(%method, %path, "sending room request");
        match self.transport.send(&request).await {
            Ok(response) => {
                info!(%method, %path, status = response.status, "room request completed");
                classify_response(response.status, response.body)
            }
            Err(error) => {
                warn!(%method, %path, kind = error.kind(), %error, "room request failed");
                RemoteOperationResult::TransportError(error.cause().to_owned())
            }
        }
    }

    /// List every room.
    pub async fn list_rooms(&self) -> Result<RemoteOperationResult, DomainError> {
        Ok(self.dispatch(RoomRequest::list_rooms()).await)
    }

    /// Apply for `room_id` under `application_id` as the session's user.
    pub async fn apply(
        &self,
        session: &Session,
        raw_application_id: i64,
        raw_room_id: i64,
    ) -> Result<RemoteOperationResult, DomainError> {
        let application_id =
            ApplicationId::new(raw_application_id).map_err(map_validation_error)?;
        let room_id = RoomId::new(raw_room_id).map_err(map_validation_error)?;
        let user_id = require_identity(session)?.clone();
        let intent = ApplicationIntent::new(application_id, room_id, user_id);
        Ok(self.dispatch(RoomRequest::apply(intent)).await)
    }

    /// Cancel an application.
    pub async fn cancel(
        &self,
        raw_application_id: i64,
    ) -> Result<RemoteOperationResult, DomainError> {
        let application_id =
            ApplicationId::new(raw_application_id).map_err(map_validation_error)?;
        Ok(self.dispatch(RoomRequest::cancel(application_id)).await)
    }

    /// Application history of the session's user.
    pub async fn history(&self, session: &Session) -> Result<RemoteOperationResult, DomainError> {
        let username = require_identity(session)?;
        Ok(self.dispatch(RoomRequest::history(username)).await)
    }

    /// Applications awaiting an administrator.
    pub async fn pending_applications(&self) -> Result<RemoteOperationResult, DomainError> {
        Ok(self.dispatch(RoomRequest::pending_applications()).await)
    }

    /// Accept a pending application.
    pub async fn accept_offer(
        &self,
        raw_application_id: i64,
    ) -> Result<RemoteOperationResult, DomainError> {
        let application_id =
            ApplicationId::new(raw_application_id).map_err(map_validation_error)?;
        Ok(self.dispatch(RoomRequest::accept_offer(application_id)).await)
    }

    /// Route distance from `postcode` to `room_id`.
    pub async fn proximity(
        &self,
        raw_postcode: &str,
        raw_room_id: i64,
    ) -> Result<RemoteOperationResult<DistanceQueryResult>, DomainError> {
        let postcode = Postcode::new(raw_postcode).map_err(map_validation_error)?;
        let room_id = RoomId::new(raw_room_id).map_err(map_validation_error)?;
        let result = self
            .dispatch(RoomRequest::proximity(&postcode, room_id))
            .await;
        Ok(result.map(|body| interpret_distance(&body)))
    }

    /// Weather at a room.
    pub async fn weather_by_room(
        &self,
        raw_room_id: i64,
    ) -> Result<RemoteOperationResult, DomainError> {
        let room_id = RoomId::new(raw_room_id).map_err(map_validation_error)?;
        Ok(self.dispatch(RoomRequest::weather_by_room(room_id)).await)
    }

    /// Weather at a postcode.
    pub async fn weather_by_postcode(
        &self,
        raw_postcode: &str,
    ) -> Result<RemoteOperationResult, DomainError> {
        let postcode = Postcode::new(raw_postcode).map_err(map_validation_error)?;
        Ok(self.dispatch(RoomRequest::weather_by_postcode(&postcode)).await)
    }
}

#[cfg(test)]
#[path = "room_service_tests.rs"]
mod tests;
