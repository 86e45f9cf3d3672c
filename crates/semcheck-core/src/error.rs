//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The working directory is not a usable git repository.
    #[error("invalid repository at {path}: {reason}")]
    InvalidRepository {
        /// The directory that was inspected.
        path: PathBuf,
        /// Why it cannot be used.
        reason: String,
    },

    /// Neither a previous release nor a root commit could be found.
    #[error("no previous commit version found so change diff unavailable")]
    NoBaseline,

    /// A git invocation failed.
    #[error("failed to {operation}: {source}")]
    Git {
        /// What was being attempted.
        operation: &'static str,
        /// The underlying git failure.
        #[source]
        source: semcheck_git::GitError,
    },

    /// One or more commits do not follow the convention.
    #[error("{count} of {total} commit(s) did not follow https://conventionalcommits.org/")]
    NonConventionalCommits {
        /// Number of offending commits.
        count: usize,
        /// Number of commits checked.
        total: usize,
    },
}

impl CoreError {
    /// Wraps a git error with the operation that failed.
    pub(crate) fn git(operation: &'static str) -> impl FnOnce(semcheck_git::GitError) -> Self {
        move |source| Self::Git { operation, source }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_baseline_display() {
        assert_eq!(
            CoreError::NoBaseline.to_string(),
            "no previous commit version found so change diff unavailable"
        );
    }

    #[test]
    fn test_invalid_repository_display() {
        let err = CoreError::InvalidRepository {
            path: PathBuf::from("/tmp/x"),
            reason: "no remote configured".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid repository at /tmp/x: no remote configured"
        );
    }

    #[test]
    fn test_git_display_names_operation() {
        let err = CoreError::git("list tags")(semcheck_git::GitError::RevisionNotFound(
            "HEAD".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "failed to list tags: revision not found: HEAD"
        );
    }

    #[test]
    fn test_non_conventional_display() {
        let err = CoreError::NonConventionalCommits { count: 2, total: 5 };
        assert_eq!(
            err.to_string(),
            "2 of 5 commit(s) did not follow https://conventionalcommits.org/"
        );
    }
}
