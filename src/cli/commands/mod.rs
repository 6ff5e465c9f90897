//! CLI command implementations
//!
//! Each command is implemented in its own module.

pub mod add;
pub mod list;
pub mod remove;
pub mod update;
