//! Add command implementation
//!
//! Vendors a repository as a submodule under `vendor/` and checks out the
//! requested ref.

use tracing::info;

use super::list::{resolve_vendored, DEFAULT_ABBREV};
use crate::cli::context::VendorContext;
use crate::cli::error::CommandError;
use crate::cli::output::Output;
use crate::core::spec::SubmoduleSpec;
use crate::git::submodule;

/// Run the add command
///
/// `path` is `repo[@ref]`; `branch` is the `--branch` flag.
pub fn run_add(
    ctx: &VendorContext,
    path: Option<&str>,
    alias: Option<&str>,
    branch: &str,
    shallow: bool,
) -> Result<SubmoduleSpec, CommandError> {
    let spec = SubmoduleSpec::parse(path.unwrap_or_default(), alias, branch)?;
    info!(url = %spec.url, alias = %spec.alias, reference = %spec.reference, "adding");

    let spinner = (!ctx.is_dry_run() && !ctx.verbose)
        .then(|| Output::spinner(&format!("Cloning {}...", spec.url)));
    let tracking = spec.tracks_branch(branch);
    let added = submodule::add(
        &ctx.git,
        &spec.url,
        &spec.alias,
        shallow,
        tracking.then_some(branch),
    );
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    added?;

    if tracking {
        submodule::checkout_tracking(&ctx.git, &spec.alias, branch)?;
    } else if shallow {
        // A depth 1 clone holds only the branch tip
        submodule::fetch_shallow(&ctx.git, &spec.alias, &spec.reference)?;
        submodule::checkout(&ctx.git, &spec.alias, "FETCH_HEAD")?;
    } else {
        submodule::checkout(&ctx.git, &spec.alias, &spec.reference)?;
    }

    if ctx.is_dry_run() {
        Output::info(&format!(
            "Would add {} @ {} as {}",
            spec.url, spec.reference, spec.alias
        ));
        return Ok(spec);
    }

    match resolve_vendored(ctx, &spec.alias, None, DEFAULT_ABBREV)? {
        Some(repo) => Output::success(&format!("Added {}", Output::vendored(&repo))),
        None => Output::success(&format!("Added {}", spec.alias)),
    }

    Ok(spec)
}
