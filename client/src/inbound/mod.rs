//! Inbound adapters that translate operator input into domain intents while
//! keeping terminal details at the edge.
//!
//! The interactive menu lives under [`cli`].

pub mod cli;
