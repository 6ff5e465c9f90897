//! Submodule status rows
//!
//! Parses `git submodule status` output into typed rows and renders the
//! `path @ rev` lines shown by `list`, `add` and `update`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::spec::VENDOR_PREFIX;

/// `[ +-U]<sha> <path>[ (<describe>)]`
static STATUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([ +\-U]?)([0-9a-fA-F]{7,64}) (.+?)(?: \(.*\))?$")
        .expect("hardcoded status pattern must be valid")
});

/// A line of `git submodule status` output that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized submodule status line: '{0}'")]
pub struct StatusParseError(pub String);

/// Checkout state reported by the status prefix character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmoduleState {
    /// Checked out at the recorded commit
    Current,
    /// Registered but not initialized (`-`)
    Uninitialized,
    /// Checked out commit differs from the recorded one (`+`)
    Modified,
    /// Merge conflicts (`U`)
    Conflict,
}

impl SubmoduleState {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "-" => SubmoduleState::Uninitialized,
            "+" => SubmoduleState::Modified,
            "U" => SubmoduleState::Conflict,
            _ => SubmoduleState::Current,
        }
    }
}

/// One row of `git submodule status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleStatus {
    pub state: SubmoduleState,
    /// Full commit hash
    pub commit: String,
    /// Path relative to the superproject root
    pub path: String,
}

impl SubmoduleStatus {
    /// Parse a single status line. Leading whitespace is ignored.
    pub fn parse_line(line: &str) -> Result<Self, StatusParseError> {
        let trimmed = line.trim_end();
        let caps = STATUS_LINE
            .captures(trimmed.trim_start())
            .ok_or_else(|| StatusParseError(line.to_string()))?;

        Ok(Self {
            state: SubmoduleState::from_prefix(&caps[1]),
            commit: caps[2].to_string(),
            path: caps[3].to_string(),
        })
    }

    /// Commit hash cut to `abbrev` characters
    pub fn short_commit(&self, abbrev: usize) -> &str {
        let len = abbrev.clamp(4, self.commit.len());
        &self.commit[..len]
    }

    pub fn is_initialized(&self) -> bool {
        self.state != SubmoduleState::Uninitialized
    }
}

/// Parse every non-blank line of `git submodule status` output.
pub fn parse_status<I, S>(lines: I) -> Result<Vec<SubmoduleStatus>, StatusParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|l| !l.as_ref().trim().is_empty())
        .map(|l| SubmoduleStatus::parse_line(l.as_ref()))
        .collect()
}

/// Drop a leading `scheme://` from a URL.
pub fn strip_scheme(url: &str) -> &str {
    match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    }
}

/// Clean a `git describe --all` result for display.
pub fn describe_revision(describe: &str) -> &str {
    describe.strip_prefix("heads/").unwrap_or(describe)
}

/// A vendored repository as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendoredRepo {
    /// Checkout path (`vendor/...`)
    pub path: String,
    /// Remote URL without its scheme
    pub url: String,
    /// Commit or describe output
    pub revision: String,
}

impl VendoredRepo {
    pub fn new(path: &str, remote_url: &str, revision: &str) -> Self {
        Self {
            path: path.to_string(),
            url: strip_scheme(remote_url).to_string(),
            revision: revision.to_string(),
        }
    }

    /// True when the checkout path does not mirror the remote URL
    pub fn is_aliased(&self) -> bool {
        let name = self.path.strip_prefix(VENDOR_PREFIX).unwrap_or(&self.path);
        self.url != name
    }
}

impl fmt::Display for VendoredRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_aliased() {
            write!(f, "{} @ {} → {}", self.url, self.revision, self.path)
        } else {
            write!(f, "{} @ {}", self.path, self.revision)
        }
    }
}
