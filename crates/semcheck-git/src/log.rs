//! Commit log retrieval.

use semcheck_commit::Commit;

use crate::GitResult;

/// Fetches the commits of a revision range.
pub trait CommitLog {
    /// Returns the commits reachable from `to` but not from `from`, newest
    /// first.
    ///
    /// `from` is exclusive and `to` is inclusive, matching `git log from..to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision cannot be resolved or the history
    /// cannot be walked.
    fn commits_between(&self, from: &str, to: &str) -> GitResult<Vec<Commit>>;
}
