//! Update command implementation
//!
//! Pulls vendored repositories that track a branch.

use super::list::{resolve_vendored, DEFAULT_ABBREV};
use crate::cli::context::VendorContext;
use crate::cli::error::CommandError;
use crate::cli::output::Output;
use crate::core::spec::vendor_path;
use crate::git::{submodule, PullOutcome};

/// What an update run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Paths that were pulled
    pub updated: Vec<String>,
    /// Paths left alone (detached HEAD or not initialized)
    pub skipped: Vec<String>,
}

/// Run the update command
///
/// With no `paths`, every submodule below `vendor/` is updated. Stops at the
/// first pull that fails for a reason other than a detached HEAD.
pub fn run_update(ctx: &VendorContext, paths: &[String]) -> Result<UpdateReport, CommandError> {
    let statuses = submodule::status(&ctx.git)?;

    let targets: Vec<String> = if paths.is_empty() {
        statuses.iter().map(|s| s.path.clone()).collect()
    } else {
        paths.iter().map(|p| vendor_path(p)).collect()
    };

    let mut report = UpdateReport::default();
    if targets.is_empty() {
        Output::info("No vendored repositories to update.");
        return Ok(report);
    }

    for path in targets {
        let initialized = statuses
            .iter()
            .find(|s| s.path == path)
            .map_or(true, |s| s.is_initialized());
        if !initialized {
            Output::warning(&format!("{}: not initialized, skipping", path));
            report.skipped.push(path);
            continue;
        }

        match submodule::pull(&ctx.git, &path) {
            Ok(PullOutcome::Updated) => {
                if !ctx.is_dry_run() {
                    match resolve_vendored(ctx, &path, None, DEFAULT_ABBREV)? {
                        Some(repo) => {
                            Output::success(&format!("Updated {}", Output::vendored(&repo)))
                        }
                        None => Output::success(&format!("Updated {}", path)),
                    }
                }
                report.updated.push(path);
            }
            Ok(PullOutcome::Detached) => {
                Output::warning(&format!("{}: not on a branch, skipping", path));
                report.skipped.push(path);
            }
            Err(source) => return Err(CommandError::Update { path, source }),
        }
    }

    Ok(report)
}
