//! Commit range resolution.

use std::path::PathBuf;

use semcheck_config::{RangeConfig, RangeMode};
use semcheck_git::{GitExecutor, Revisions};
use serde::Serialize;
use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// The boundaries of the commits to inspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionRange {
    /// Exclusive lower bound: the last commit already checked.
    pub from: String,
    /// Inclusive upper bound.
    pub to: String,
}

/// How a [`RevisionResolver`] finds the range when no SHAs are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSettings {
    /// Resolution strategy.
    pub mode: RangeMode,
    /// Remote whose default branch bounds a pull request.
    pub remote: String,
    /// Glob restricting which tags count as releases.
    pub tag_pattern: Option<String>,
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self::from(&RangeConfig::default())
    }
}

impl From<&RangeConfig> for RangeSettings {
    fn from(config: &RangeConfig) -> Self {
        Self {
            mode: config.mode,
            remote: config.remote.clone(),
            tag_pattern: config.tag_pattern.clone(),
        }
    }
}

/// Resolves the `(from, to)` commit pair of a check.
pub struct RevisionResolver<'a> {
    git: &'a dyn GitExecutor,
    dir: PathBuf,
    settings: RangeSettings,
}

impl<'a> RevisionResolver<'a> {
    /// Creates a resolver for the repository at `dir`.
    #[must_use]
    pub fn new(git: &'a dyn GitExecutor, dir: impl Into<PathBuf>, settings: RangeSettings) -> Self {
        Self {
            git,
            dir: dir.into(),
            settings,
        }
    }

    fn revisions(&self) -> Revisions<'_> {
        Revisions::new(self.git, &self.dir)
    }

    /// Resolves the range to inspect.
    ///
    /// Explicit bounds are used verbatim. Otherwise, in release mode, `from`
    /// is the commit of the second most recent tag (the previous release)
    /// and `to` the commit of the most recent one. Before a second tag
    /// exists `from` falls back to the root commit, and before any tag
    /// exists `to` falls back to `HEAD`. Tags are ordered by creation date;
    /// tags created at the same instant keep git's listing order.
    ///
    /// In pull request mode `to` defaults to `HEAD` and `from` to its
    /// merge-base with the remote default branch.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidRepository`] if the directory is not a git work
    ///   tree or has no remote.
    /// - [`CoreError::NoBaseline`] if no previous release and no root commit
    ///   exist.
    /// - [`CoreError::Git`] if a git query fails.
    pub fn resolve_range(&self, from: Option<&str>, to: Option<&str>) -> CoreResult<RevisionRange> {
        self.ensure_repository()?;

        let from = from.map(str::trim).filter(|s| !s.is_empty());
        let to = to.map(str::trim).filter(|s| !s.is_empty());

        let range = match self.settings.mode {
            RangeMode::Release => self.resolve_release(from, to)?,
            RangeMode::PullRequest => self.resolve_pull_request(from, to)?,
        };

        info!(mode = %self.settings.mode, from = %range.from, to = %range.to, "resolved commit range");
        Ok(range)
    }

    fn ensure_repository(&self) -> CoreResult<()> {
        let revisions = self.revisions();
        let invalid = |reason: &str| CoreError::InvalidRepository {
            path: self.dir.clone(),
            reason: reason.to_string(),
        };

        match revisions.is_inside_work_tree() {
            Ok(true) => {}
            Ok(false) => return Err(invalid("not inside a git work tree")),
            Err(err) => return Err(invalid(&err.to_string())),
        }

        let remotes = revisions
            .remotes()
            .map_err(CoreError::git("list remotes"))?;
        if remotes.is_empty() {
            return Err(invalid("no remote configured"));
        }

        Ok(())
    }

    fn resolve_release(&self, from: Option<&str>, to: Option<&str>) -> CoreResult<RevisionRange> {
        let revisions = self.revisions();

        // Both tags are only needed when a bound is missing.
        let tags = if from.is_some() && to.is_some() {
            Vec::new()
        } else {
            revisions
                .recent_tags(self.settings.tag_pattern.as_deref(), 2)
                .map_err(CoreError::git("list tags"))?
        };

        let to = match to {
            Some(to) => to.to_string(),
            None => match tags.first() {
                Some(latest) => revisions
                    .commit_of(latest)
                    .map_err(CoreError::git("resolve latest tag"))?,
                None => revisions.head().map_err(CoreError::git("resolve HEAD"))?,
            },
        };

        let from = match from {
            Some(from) => from.to_string(),
            None => match tags.get(1) {
                Some(previous) => {
                    debug!(tag = %previous, "using previous release tag as baseline");
                    revisions
                        .commit_of(previous)
                        .map_err(CoreError::git("resolve previous tag"))?
                }
                None => self.root_baseline()?,
            },
        };

        Ok(RevisionRange { from, to })
    }

    fn root_baseline(&self) -> CoreResult<String> {
        match self.revisions().root_commit() {
            Ok(Some(root)) => {
                info!(root = %root, "no previous release, checking all history");
                Ok(root)
            }
            Ok(None) => Err(CoreError::NoBaseline),
            Err(err) => {
                debug!(error = %err, "root commit lookup failed");
                Err(CoreError::NoBaseline)
            }
        }
    }

    fn resolve_pull_request(&self, from: Option<&str>, to: Option<&str>) -> CoreResult<RevisionRange> {
        let revisions = self.revisions();

        let to = match to {
            Some(to) => to.to_string(),
            None => revisions.head().map_err(CoreError::git("resolve HEAD"))?,
        };

        let from = match from {
            Some(from) => from.to_string(),
            None => {
                let remote = &self.settings.remote;
                let branch = revisions
                    .default_branch(remote)
                    .map_err(CoreError::git("find the default branch"))?;
                let upstream = format!("{remote}/{branch}");
                debug!(%upstream, "using merge-base with upstream as baseline");
                revisions
                    .merge_base(&to, &upstream)
                    .map_err(CoreError::git("find the merge-base"))?
            }
        };

        Ok(RevisionRange { from, to })
    }
}
