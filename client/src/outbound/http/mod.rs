//! HTTP adapters for the remote room service.

mod reqwest_transport;

pub use reqwest_transport::ReqwestRoomTransport;
