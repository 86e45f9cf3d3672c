//! Git repository wrapper.

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::{Oid, Repository as Git2Repo, Sort};
use semcheck_commit::Commit;
use tracing::debug;

use crate::{CommitLog, GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Discovers the repository containing the given directory, searching
    /// parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(start: impl AsRef<Path>) -> GitResult<Self> {
        let start = start.as_ref();
        let inner =
            Git2Repo::discover(start).map_err(|_| GitError::NotARepo(start.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    fn resolve_commit(&self, rev: &str) -> GitResult<Oid> {
        self.inner
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))
    }
}

impl CommitLog for Repository {
    fn commits_between(&self, from: &str, to: &str) -> GitResult<Vec<Commit>> {
        let to_oid = self.resolve_commit(to)?;
        let from_oid = self.resolve_commit(from)?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;

            let mut entry = Commit::new(oid.to_string(), commit.message().unwrap_or("").trim_end());
            if let Some(name) = commit.author().name() {
                entry = entry.with_author(name);
            }
            if let Some(date) = Utc.timestamp_opt(commit.time().seconds(), 0).single() {
                entry = entry.with_date(date);
            }

            commits.push(entry);
        }

        debug!(from, to, count = commits.len(), "fetched commit range");
        Ok(commits)
    }
}
