//! Revision lookups built atop a [`GitExecutor`].

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{GitExecutor, GitResult};

static SYMREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ref:\s+refs/heads/(?P<branch>\S+)\s+HEAD$").expect("invalid regex")
});

/// Branch assumed when the remote does not advertise its default branch.
const FALLBACK_BRANCH: &str = "master";

/// Tag, branch and commit queries against one working directory.
pub struct Revisions<'a> {
    git: &'a dyn GitExecutor,
    dir: &'a Path,
}

impl<'a> Revisions<'a> {
    /// Creates a lookup helper for the repository at `dir`.
    #[must_use]
    pub fn new(git: &'a dyn GitExecutor, dir: &'a Path) -> Self {
        Self { git, dir }
    }

    fn run(&self, args: &[&str]) -> GitResult<String> {
        self.git.run(self.dir, args)
    }

    fn run_trimmed(&self, args: &[&str]) -> GitResult<String> {
        self.run(args).map(|out| out.trim().to_string())
    }

    /// Returns whether the directory is inside a git work tree.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or the directory is not a
    /// repository at all.
    pub fn is_inside_work_tree(&self) -> GitResult<bool> {
        Ok(self.run_trimmed(&["rev-parse", "--is-inside-work-tree"])? == "true")
    }

    /// Returns the configured remote names.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails.
    pub fn remotes(&self) -> GitResult<Vec<String>> {
        Ok(non_empty_lines(&self.run(&["remote"])?))
    }

    /// Returns up to `count` tag names, most recently created first.
    ///
    /// `pattern` is a glob relative to `refs/tags`. Tags sharing a creation
    /// date keep the order `git for-each-ref` reports for them, which git
    /// does not specify.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails.
    pub fn recent_tags(&self, pattern: Option<&str>, count: usize) -> GitResult<Vec<String>> {
        let count = format!("--count={count}");
        let refs = match pattern {
            Some(pattern) => format!("refs/tags/{pattern}"),
            None => "refs/tags".to_string(),
        };

        let out = self.run(&[
            "for-each-ref",
            "--sort=-creatordate",
            "--format=%(refname:short)",
            count.as_str(),
            refs.as_str(),
        ])?;

        let tags = non_empty_lines(&out);
        debug!(?tags, "listed recent tags");
        Ok(tags)
    }

    /// Resolves a revision (tag, branch or SHA) to the commit it points at.
    ///
    /// Annotated tags are peeled to their target commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not exist.
    pub fn commit_of(&self, rev: &str) -> GitResult<String> {
        self.run_trimmed(&["rev-list", "-n", "1", rev])
    }

    /// Returns the root commit of the current history, or `None` for a
    /// repository without commits.
    ///
    /// When history has several roots the oldest one listed is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails.
    pub fn root_commit(&self) -> GitResult<Option<String>> {
        let out = self.run(&["rev-list", "--max-parents=0", "HEAD"])?;
        Ok(non_empty_lines(&out).pop())
    }

    /// Returns the commit `HEAD` points at.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEAD` is unborn or git fails.
    pub fn head(&self) -> GitResult<String> {
        self.run_trimmed(&["rev-parse", "HEAD"])
    }

    /// Returns the default branch of `remote`.
    ///
    /// The locally cached `refs/remotes/<remote>/HEAD` is preferred; the
    /// remote is only contacted when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote cannot be queried.
    pub fn default_branch(&self, remote: &str) -> GitResult<String> {
        let local_ref = format!("refs/remotes/{remote}/HEAD");
        if let Ok(out) = self.run_trimmed(&["symbolic-ref", "--short", local_ref.as_str()]) {
            let prefix = format!("{remote}/");
            if let Some(branch) = out.strip_prefix(&prefix).filter(|b| !b.is_empty()) {
                debug!(remote, branch, "default branch from local ref");
                return Ok(branch.to_string());
            }
        }

        let out = self.run(&["ls-remote", "--symref", remote, "HEAD"])?;
        let branch = SYMREF_RE
            .captures(&out)
            .and_then(|caps| caps.name("branch"))
            .map_or(FALLBACK_BRANCH, |m| m.as_str());
        debug!(remote, branch, "default branch from remote");
        Ok(branch.to_string())
    }

    /// Returns the best common ancestor of two revisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the revisions share no history.
    pub fn merge_base(&self, a: &str, b: &str) -> GitResult<String> {
        self.run_trimmed(&["merge-base", a, b])
    }
}

fn non_empty_lines(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
