//! Reqwest-backed room transport.
//!
//! This adapter owns transport details only: URL resolution, percent
//! encoding, JSON request bodies and transport error mapping. Status codes
//! are reported unchanged for the domain to classify.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::domain::RoomRequest;
use crate::domain::ports::{RequestMethod, RoomResponse, RoomTransport, RoomTransportError};

/// Room transport that sends each request once with reqwest defaults.
#[derive(Debug, Clone)]
pub struct ReqwestRoomTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestRoomTransport {
    /// Build a transport rooted at `base_url`.
    ///
    /// No request timeout is configured beyond reqwest's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl RoomTransport for ReqwestRoomTransport {
    async fn send(&self, request: &RoomRequest) -> Result<RoomResponse, RoomTransportError> {
        let url = build_url(&self.base_url, request)?;
        let mut builder = self.client.request(map_method(request.method()), url);
        if let Some(intent) = request.body() {
            builder = builder.json(intent);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        Ok(RoomResponse::new(status, body))
    }
}

fn build_url(base_url: &Url, request: &RoomRequest) -> Result<Url, RoomTransportError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            RoomTransportError::invalid_request(format!(
                "base URL {base_url} cannot carry path segments"
            ))
        })?
        .pop_if_empty()
        .extend(request.segments());

    if !request.query().is_empty() {
        url.query_pairs_mut().extend_pairs(
            request
                .query()
                .iter()
                .map(|(name, value)| (*name, value.as_str())),
        );
    }
    Ok(url)
}

const fn map_method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::GET,
        RequestMethod::Post => Method::POST,
        RequestMethod::Put => Method::PUT,
        RequestMethod::Delete => Method::DELETE,
    }
}

fn map_transport_error(error: reqwest::Error) -> RoomTransportError {
    if error.is_timeout() {
        RoomTransportError::timeout(error.to_string())
    } else {
        RoomTransportError::transport(error.to_string())
    }
}
