//! File-backed persistence adapters.

mod atomic_io;
mod json_credential_store;

pub use json_credential_store::JsonFileCredentialStore;
