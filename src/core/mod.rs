//! Core text processing for subvendor
//!
//! Nothing in here runs a process: these modules turn CLI arguments and git
//! output into typed values.

pub mod spec;
pub mod status;

pub use spec::{vendor_path, SubmoduleSpec, VENDOR_PREFIX};
pub use status::{parse_status, strip_scheme, SubmoduleState, SubmoduleStatus, VendoredRepo};
