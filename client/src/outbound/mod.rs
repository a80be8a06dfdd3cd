//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: the JSON credential document on local disk.
//! - **http**: the reqwest-backed room-service transport.
//!
//! Adapters translate between domain types and their wire or file
//! representations. They contain no business logic.

pub mod http;
pub mod persistence;
