//! Submodule operations
//!
//! Thin typed wrappers over the git subcommands the handlers need. Paths are
//! relative to the superproject root the [`Git`] handle runs in.

use std::path::PathBuf;
use tracing::{debug, instrument};

use super::{Git, GitError};
use crate::core::spec::VENDOR_PREFIX;
use crate::core::status::{describe_revision, parse_status, SubmoduleStatus};

/// Printed by `git pull` when HEAD is detached
const DETACHED_HEAD: &str = "not currently on a branch";

/// Result of pulling a single submodule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Updated,
    /// HEAD is detached (tag or commit checkout), nothing to pull
    Detached,
}

/// Absolute path of the superproject working tree
pub fn toplevel(git: &Git) -> Result<PathBuf, GitError> {
    let lines = git.run(&["rev-parse", "--show-toplevel"])?;
    match lines.into_iter().find(|l| !l.is_empty()) {
        Some(line) => Ok(PathBuf::from(line)),
        None => Err(GitError::UnexpectedOutput {
            command: "git rev-parse --show-toplevel".to_string(),
            line: String::new(),
        }),
    }
}

/// `git submodule add --force [--depth 1 [--branch <branch>]] <url> <alias>`
///
/// A shallow clone only carries `branch` (or the remote's default branch
/// when `None`).
#[instrument(skip(git), level = "debug")]
pub fn add(
    git: &Git,
    url: &str,
    alias: &str,
    shallow: bool,
    branch: Option<&str>,
) -> Result<(), GitError> {
    let mut args = vec!["submodule", "add", "--force"];
    if shallow {
        args.extend(["--depth", "1"]);
        if let Some(branch) = branch {
            args.extend(["--branch", branch]);
        }
    }
    args.extend([url, alias]);
    git.run_mut(&args)?;
    Ok(())
}

/// `git -C <alias> fetch --depth 1 origin <reference>`
///
/// Brings a tag or commit missing from a shallow clone into `FETCH_HEAD`.
pub fn fetch_shallow(git: &Git, alias: &str, reference: &str) -> Result<(), GitError> {
    git.run_mut(&["-C", alias, "fetch", "--depth", "1", "origin", reference])?;
    Ok(())
}

/// Reset a local branch to `origin/<branch>` and track it.
pub fn checkout_tracking(git: &Git, alias: &str, branch: &str) -> Result<(), GitError> {
    let upstream = format!("origin/{}", branch);
    git.run_mut(&["-C", alias, "checkout", "-t", "-B", branch, &upstream])?;
    Ok(())
}

/// Check out a tag, commit or remote branch.
pub fn checkout(git: &Git, alias: &str, reference: &str) -> Result<(), GitError> {
    git.run_mut(&["-C", alias, "checkout", reference])?;
    Ok(())
}

/// Every submodule below `vendor/`, recursively.
///
/// Returns an empty list when the superproject has no `vendor/` directory.
pub fn status(git: &Git) -> Result<Vec<SubmoduleStatus>, GitError> {
    if let Some(root) = git.workdir() {
        if !root.join(VENDOR_PREFIX).is_dir() {
            debug!(root = %root.display(), "no vendor directory");
            return Ok(Vec::new());
        }
    }

    let lines = git.run(&["submodule", "status", "--recursive", VENDOR_PREFIX])?;
    parse_status(&lines).map_err(|e| GitError::UnexpectedOutput {
        command: "git submodule status".to_string(),
        line: e.0,
    })
}

/// Configured remote URL of a submodule, `None` when unset.
pub fn remote_url(git: &Git, path: &str) -> Result<Option<String>, GitError> {
    let key = format!("submodule.{}.url", path);
    match git.run(&["config", &key]) {
        Ok(lines) => {
            let mut values = lines.into_iter().filter(|l| !l.is_empty());
            match (values.next(), values.next()) {
                (Some(url), None) => Ok(Some(url)),
                _ => Ok(None),
            }
        }
        // `git config` exits 1 for a missing key
        Err(GitError::CommandFailed { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Human readable revision of a checkout via `git describe --always`.
///
/// `None` when git cannot describe it (e.g. not initialized).
pub fn describe(git: &Git, path: &str, abbrev: usize, all_refs: bool) -> Option<String> {
    let abbrev = format!("--abbrev={}", abbrev);
    let mut args = vec!["-C", path, "describe", "--always"];
    if all_refs {
        args.push("--all");
    }
    args.push(&abbrev);

    match git.run(&args) {
        Ok(lines) => lines
            .into_iter()
            .find(|l| !l.is_empty())
            .map(|l| describe_revision(&l).to_string()),
        Err(e) => {
            debug!(path, error = %e, "describe failed");
            None
        }
    }
}

/// `git -C <path> pull --prune`
#[instrument(skip(git), level = "debug")]
pub fn pull(git: &Git, path: &str) -> Result<PullOutcome, GitError> {
    // Pulling in a directory without its own .git would hit the superproject
    if let Some(root) = git.workdir() {
        if !root.join(path).join(".git").exists() {
            return Err(GitError::NotACheckout(path.to_string()));
        }
    }

    match git.run_mut(&["-C", path, "pull", "--prune"]) {
        Ok(_) => Ok(PullOutcome::Updated),
        Err(e) if is_detached_head(&e) => Ok(PullOutcome::Detached),
        Err(e) => Err(e),
    }
}

fn is_detached_head(err: &GitError) -> bool {
    err.output().is_some_and(|o| o.contains(DETACHED_HEAD))
}

/// `git submodule deinit --force <alias>`
pub fn deinit(git: &Git, alias: &str) -> Result<(), GitError> {
    git.run_mut(&["submodule", "deinit", "--force", alias])?;
    Ok(())
}

/// `git rm --force <alias>`
pub fn remove(git: &Git, alias: &str) -> Result<(), GitError> {
    git.run_mut(&["rm", "--force", alias])?;
    Ok(())
}

/// Where git keeps the submodule's repository (`.git/modules/<alias>`).
pub fn module_dir(git: &Git, alias: &str) -> Result<PathBuf, GitError> {
    let spec = format!("modules/{}", alias);
    let lines = git.run(&["rev-parse", "--git-path", &spec])?;
    let path = lines
        .into_iter()
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| GitError::UnexpectedOutput {
            command: "git rev-parse --git-path".to_string(),
            line: String::new(),
        })?;

    match git.workdir() {
        Some(root) if path.is_relative() => Ok(root.join(path)),
        _ => Ok(path),
    }
}
