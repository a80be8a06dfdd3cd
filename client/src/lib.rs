//! GlobalDorm room-booking client library.
//!
//! The crate is arranged as a small hexagon:
//!
//! - [`domain`] owns credentials, sessions, the room-service operations, the
//!   response interpreter and the menu state machine. It performs no I/O.
//! - [`outbound`] implements the domain's driven ports: a JSON credential
//!   document and a reqwest transport for the remote room service.
//! - [`inbound`] drives the domain from an interactive terminal menu.
//! - [`config`] loads [`config::ClientSettings`] via `OrthoConfig`.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
