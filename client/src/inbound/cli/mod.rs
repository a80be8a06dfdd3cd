//! Interactive terminal menu.
//!
//! [`Console`] wraps any line reader and writer so the loop can be driven by
//! stdin/stdout in the binary and by in-memory buffers in tests.
//! [`run_menu`] renders the orchestrator's current menu, turns the chosen
//! entry into an [`Intent`](crate::domain::Intent), and prints the outcome.

mod console;
mod driver;
mod render;

pub use console::Console;
pub use driver::run_menu;
pub use render::{render_error, render_outcome};
