//! subvendor - vendor third-party repositories as git submodules
//!
//! Repositories are checked out under `vendor/` with `git submodule`, so the
//! only persisted state is git's own `.gitmodules` and `.git/modules/`.
//!
//! - [`core`] - `add` argument parsing and status row formatting (pure text processing)
//! - [`git`] - the git command runner and typed submodule operations
//! - [`cli`] - command handlers, output, exit codes

pub mod cli;
pub mod core;
pub mod git;
pub mod telemetry;
pub mod util;
