//! CLI layer
//!
//! Command handlers, terminal output and exit codes.

pub mod commands;
pub mod context;
pub mod error;
pub mod output;

pub use context::{GlobalOptions, VendorContext};
pub use error::CommandError;
pub use output::Output;
