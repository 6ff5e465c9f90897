//! Utility functions and helpers

pub mod cmd;

pub use cmd::{echo_dry_run, format_cmd, log_cmd, print_dry_run};
