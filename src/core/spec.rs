//! Submodule spec parsing
//!
//! Turns the `add` arguments (`repo[@ref] [alias]`) into the URL, vendor path
//! and ref that the git layer works with.

use thiserror::Error;

/// Every vendored repository lives below this directory.
pub const VENDOR_PREFIX: &str = "vendor/";

/// Branch used when neither `@ref` nor `--branch` is given
pub const DEFAULT_BRANCH: &str = "master";

/// Errors produced while normalizing CLI arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("add requires a repository path")]
    MissingPath,

    #[error("invalid alias '{0}': must stay inside vendor/")]
    InvalidAlias(String),
}

/// A repository to vendor, normalized from `repo[@ref] [alias]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleSpec {
    /// Clone URL handed to `git submodule add`
    pub url: String,
    /// Checkout path, always starting with `vendor/`
    pub alias: String,
    /// Branch, tag or commit to check out
    pub reference: String,
}

impl SubmoduleSpec {
    /// Parse the positional `add` arguments.
    ///
    /// `branch` is the `--branch` flag and doubles as the ref when `path`
    /// carries no `@ref` suffix.
    pub fn parse(path: &str, alias: Option<&str>, branch: &str) -> Result<Self, SpecError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(SpecError::MissingPath);
        }

        let (repo, reference) = split_reference(path);
        let url = with_default_scheme(repo);

        let alias = match alias.map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => vendor_path(alias),
            None => vendor_path(&derive_alias(&url)),
        };
        if alias.trim_end_matches('/') == VENDOR_PREFIX.trim_end_matches('/')
            || alias.split('/').any(|segment| segment == "..")
        {
            return Err(SpecError::InvalidAlias(alias));
        }

        Ok(Self {
            url,
            alias,
            reference: reference.unwrap_or(branch).to_string(),
        })
    }

    /// Whether the checkout should become a local branch tracking `origin/<branch>`
    pub fn tracks_branch(&self, branch: &str) -> bool {
        self.reference == branch
    }
}

/// Normalize a user supplied path to its `vendor/` form.
///
/// Trailing slashes and a trailing `.git` are dropped.
pub fn vendor_path(alias: &str) -> String {
    let alias = alias.trim().trim_start_matches("./").trim_end_matches('/');
    let alias = alias.strip_suffix(".git").unwrap_or(alias);
    if alias.starts_with(VENDOR_PREFIX) {
        alias.to_string()
    } else {
        format!("{}{}", VENDOR_PREFIX, alias)
    }
}

/// Split `repo@ref` on the last `@`, leaving SSH user info alone.
fn split_reference(path: &str) -> (&str, Option<&str>) {
    let Some(idx) = path.rfind('@') else {
        return (path, None);
    };
    let (before, after) = (&path[..idx], &path[idx + 1..]);

    if is_user_info(before, after) {
        return (path, None);
    }
    if after.is_empty() {
        return (before, None);
    }
    (before, Some(after))
}

/// `git@host:org/repo` and `https://user@host/repo` put an `@` in the authority.
fn is_user_info(before: &str, after: &str) -> bool {
    match before.find("://") {
        Some(idx) => !before[idx + 3..].contains('/'),
        None => !before.contains('/') && is_scp_address(after),
    }
}

/// `host:path` with the colon ahead of any slash, as git reads it
fn is_scp_address(s: &str) -> bool {
    match s.find(':') {
        Some(colon) => s.find('/').map_or(true, |slash| colon < slash),
        None => false,
    }
}

fn with_default_scheme(repo: &str) -> String {
    if repo.contains("://") || is_scp_address(repo) {
        repo.to_string()
    } else {
        format!("https://{}", repo)
    }
}

/// `https://user@host/org/repo` and `user@host:org/repo` both give `host/org/repo`.
fn derive_alias(url: &str) -> String {
    let (authority, path) = match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.split_once('/').unwrap_or((rest, ""))
        }
        None => url.split_once(':').unwrap_or((url, "")),
    };
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let path = path.trim_start_matches('/');

    if host.is_empty() {
        path.to_string()
    } else if path.is_empty() {
        host.to_string()
    } else {
        format!("{}/{}", host, path)
    }
}
