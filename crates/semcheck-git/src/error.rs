//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// A revision (SHA, tag or ref) could not be resolved to a commit.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// The git binary could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A git command exited with a non-zero status.
    #[error("`git {command}` failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        /// The arguments passed to git, space separated.
        command: String,
        /// The exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}"))
        .unwrap_or_default()
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
