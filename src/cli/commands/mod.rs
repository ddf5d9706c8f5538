//! CLI command handlers for `chatviz`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod cost;
pub mod kinds;
pub mod prompt;
pub mod render;
