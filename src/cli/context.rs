//! Context passed to command handlers
//!
//! Bundles the superproject root and the configured git runner so every
//! handler gets its settings as a parameter instead of from globals.

use crate::git::{submodule, Git, GitError};
use std::path::{Path, PathBuf};

/// Global CLI flags, set once at startup
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Log each git command before running it (`--verbose`)
    pub verbose: bool,
    /// Echo mutating commands instead of running them (`--dry-run`)
    pub dry_run: bool,
    /// Git executable (`--git-path`)
    pub git_path: String,
    /// `key=value` pairs forwarded as `git -c` (`--config`)
    pub config: Vec<String>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            git_path: "git".to_string(),
            config: Vec::new(),
        }
    }
}

/// Context available to all command handlers.
pub struct VendorContext {
    /// Top level of the superproject working tree
    pub workspace_root: PathBuf,
    /// Git runner rooted at `workspace_root`
    pub git: Git,
    /// Show verbose output (`--verbose`)
    pub verbose: bool,
}

impl VendorContext {
    /// Locate git and the superproject that contains `dir`.
    pub fn discover(options: &GlobalOptions, dir: &Path) -> Result<Self, GitError> {
        let git = Git::locate(&options.git_path)?
            .with_config(options.config.iter().cloned())
            .dry_run(options.dry_run);
        let root = submodule::toplevel(&git.clone().in_dir(dir))?;

        Ok(Self {
            git: git.in_dir(&root),
            workspace_root: root,
            verbose: options.verbose,
        })
    }

    /// Get the superproject root as a `&Path`
    pub fn root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn is_dry_run(&self) -> bool {
        self.git.is_dry_run()
    }
}
