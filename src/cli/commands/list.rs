//! List command implementation
//!
//! Shows every repository vendored below `vendor/`.

use tracing::debug;

use crate::cli::context::VendorContext;
use crate::cli::error::CommandError;
use crate::cli::output::Output;
use crate::core::status::VendoredRepo;
use crate::git::{submodule, GitError};

/// Default hash length for list output
pub const DEFAULT_ABBREV: usize = 8;

/// Options for the list command
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Print a JSON array instead of lines
    pub json: bool,
    /// Show `git describe` output instead of the commit hash
    pub describe: bool,
    /// Hash length
    pub abbrev: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            json: false,
            describe: false,
            abbrev: DEFAULT_ABBREV,
        }
    }
}

/// Run the list command
pub fn run_list(ctx: &VendorContext, options: &ListOptions) -> Result<(), CommandError> {
    let repos = collect_vendored(ctx, options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(());
    }

    if repos.is_empty() {
        Output::info("No vendored repositories.");
        return Ok(());
    }

    for repo in &repos {
        Output::list_item(&Output::vendored(repo));
    }

    Ok(())
}

/// Every vendored repository that has a configured remote URL.
pub fn collect_vendored(
    ctx: &VendorContext,
    options: &ListOptions,
) -> Result<Vec<VendoredRepo>, CommandError> {
    let mut repos = Vec::new();

    for status in submodule::status(&ctx.git)? {
        let commit = (!options.describe).then(|| status.short_commit(options.abbrev));
        if let Some(repo) = resolve_vendored(ctx, &status.path, commit, options.abbrev)? {
            repos.push(repo);
        }
    }

    Ok(repos)
}

/// Build the display row for one submodule.
///
/// Without a commit, the revision comes from `git describe`. Returns `None`
/// when the submodule has no URL configured or no revision can be derived.
pub fn resolve_vendored(
    ctx: &VendorContext,
    path: &str,
    commit: Option<&str>,
    abbrev: usize,
) -> Result<Option<VendoredRepo>, GitError> {
    let Some(url) = submodule::remote_url(&ctx.git, path)? else {
        debug!(path, "no remote url configured, skipping");
        return Ok(None);
    };

    let revision = match commit {
        Some(commit) => commit.to_string(),
        None => match submodule::describe(&ctx.git, path, abbrev, true) {
            Some(revision) => revision,
            None => return Ok(None),
        },
    };

    Ok(Some(VendoredRepo::new(path, &url, &revision)))
}
