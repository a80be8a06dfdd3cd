//! Domain ports: the seams between services and adapters.
//!
//! The credential store is synchronous because the single operator process
//! reads the whole document, then writes it whole. The room transport is
//! async so the reqwest adapter can run on a current-thread runtime.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod room_transport;

pub use credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore};
#[cfg(test)]
pub use room_transport::MockRoomTransport;
pub use room_transport::{RequestMethod, RoomResponse, RoomTransport, RoomTransportError};
