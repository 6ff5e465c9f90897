//! Logging setup for subvendor.
//!
//! Structured logging goes through the `tracing` crate; this module installs
//! the subscriber.
//!
//! # Feature Flags
//!
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
