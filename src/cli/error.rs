//! Command errors and their exit codes

use crate::core::spec::SpecError;
use crate::git::GitError;
use std::path::PathBuf;
use thiserror::Error;

/// Missing or invalid arguments
pub const EXIT_USAGE: i32 = 1;
/// A git command, or printing its results, failed
pub const EXIT_GIT: i32 = 2;
/// Filesystem cleanup after `remove` failed
pub const EXIT_CLEANUP: i32 = 3;

/// Errors returned by command handlers
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("{path}: {source}")]
    Update {
        path: String,
        #[source]
        source: GitError,
    },

    #[error("failed to clean up {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<SpecError> for CommandError {
    fn from(err: SpecError) -> Self {
        CommandError::Usage(err.to_string())
    }
}

impl CommandError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Usage(_) => EXIT_USAGE,
            CommandError::Git(_) | CommandError::Update { .. } | CommandError::Serialize(_) => {
                EXIT_GIT
            }
            CommandError::Cleanup { .. } => EXIT_CLEANUP,
        }
    }
}
