//! Git command runner
//!
//! Every git interaction goes through [`Git`], which shells out to the
//! configured executable with a forced `C` locale so the text we parse stays
//! stable. Mutating commands go through [`Git::run_mut`] and are skipped in
//! dry-run mode.

pub mod submodule;

pub use submodule::PullOutcome;

use crate::util::{echo_dry_run, format_cmd, log_cmd};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Error, Debug)]
pub enum GitError {
    /// Git exited non-zero; the message is what it printed.
    #[error("{output}")]
    CommandFailed { command: String, output: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git executable not found: {0}")]
    NotFound(String),

    #[error("unexpected output from `{command}`: '{line}'")]
    UnexpectedOutput { command: String, line: String },

    #[error("not a git checkout: {0}")]
    NotACheckout(String),
}

impl GitError {
    /// Captured git output, for failures that have one
    pub fn output(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Handle on the git executable plus the flags every invocation shares
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
    workdir: Option<PathBuf>,
    dry_run: bool,
    config: Vec<String>,
}

impl Git {
    /// Use `program` as is, without looking it up on `PATH`.
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            workdir: None,
            dry_run: false,
            config: Vec::new(),
        }
    }

    /// Resolve `program` on `PATH` (or as a path) and wrap it.
    pub fn locate(program: &str) -> Result<Self, GitError> {
        which::which(program)
            .map(Self::new)
            .map_err(|e| GitError::NotFound(format!("{}: {}", program, e)))
    }

    /// Run every command from `dir`
    pub fn in_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Forward `key=value` pairs as `git -c key=value`
    pub fn with_config<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Run a read-only command. Executes even in dry-run mode.
    pub fn run(&self, args: &[&str]) -> Result<Vec<String>, GitError> {
        let mut cmd = self.command(args);
        log_cmd(&cmd);
        self.execute(&mut cmd)
    }

    /// Run a command that changes the repository.
    ///
    /// In dry-run mode the command line is echoed and nothing runs; the
    /// returned line set is empty.
    pub fn run_mut(&self, args: &[&str]) -> Result<Vec<String>, GitError> {
        let mut cmd = self.command(args);
        if self.dry_run {
            echo_dry_run(&cmd);
            return Ok(Vec::new());
        }
        log_cmd(&cmd);
        self.execute(&mut cmd)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        for entry in &self.config {
            cmd.arg("-c").arg(entry);
        }
        cmd.args(args).env("LC_ALL", "C");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn execute(&self, cmd: &mut Command) -> Result<Vec<String>, GitError> {
        let output = cmd.output().map_err(|e| GitError::Spawn {
            program: self.program.display().to_string(),
            source: e,
        })?;

        if !output.status.success() {
            let command = format_cmd(cmd);
            let mut text = combined_output(&output);
            if text.is_empty() {
                text = format!("`{}` exited with {}", command, output.status);
            }
            return Err(GitError::CommandFailed {
                command,
                output: text,
            });
        }

        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// stderr then stdout, trimmed
fn combined_output(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    [stderr.trim(), stdout.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim().to_string()).collect()
}
