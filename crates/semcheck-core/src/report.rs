//! Classification results and the check report.

use std::fmt;

use semcheck_commit::Commit;
use serde::Serialize;

use crate::{CoreError, CoreResult, RevisionRange};

/// Why a commit message is not conventional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "token", rename_all = "kebab-case")]
pub enum FailureReason {
    /// The subject has no `:` at all.
    MissingColon,
    /// The subject starts with `:`.
    EmptyType,
    /// The text before `:` starts with no recognised type.
    UnknownType(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColon => write!(f, "no ':' after the commit type"),
            Self::EmptyType => write!(f, "empty commit type before ':'"),
            Self::UnknownType(token) => write!(f, "unknown commit type `{token}`"),
        }
    }
}

/// The outcome for a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Verdict {
    /// The subject starts with a recognised type.
    Conventional {
        /// The recognised type keyword.
        commit_type: String,
    },
    /// The message contains an exemption keyword such as `revert`.
    Exempt {
        /// The keyword that matched.
        keyword: String,
    },
    /// The subject violates the convention.
    NonConventional {
        /// What is wrong with it.
        reason: FailureReason,
    },
}

impl Verdict {
    /// Returns true unless the verdict is [`Verdict::NonConventional`].
    #[must_use]
    pub fn is_conventional(&self) -> bool {
        !matches!(self, Self::NonConventional { .. })
    }
}

/// A commit paired with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// The classified commit.
    pub commit: Commit,
    /// The verdict for it.
    pub verdict: Verdict,
}

impl ClassificationResult {
    /// Returns whether the commit passes the check.
    #[must_use]
    pub fn is_conventional(&self) -> bool {
        self.verdict.is_conventional()
    }
}

/// The aggregated result of classifying a commit range.
///
/// Commits keep the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of commits classified (the dropped release commit excluded).
    pub total: usize,
    /// Number of non-conventional commits.
    pub failed_count: usize,
    /// The non-conventional commits, in input order.
    pub failed_commits: Vec<Commit>,
    /// Every classified commit with its verdict, in input order.
    pub results: Vec<ClassificationResult>,
    /// The leading release commit that was dropped, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_commit: Option<Commit>,
}

impl CheckReport {
    pub(crate) fn new(results: Vec<ClassificationResult>, release_commit: Option<Commit>) -> Self {
        let failed_commits: Vec<Commit> = results
            .iter()
            .filter(|r| !r.is_conventional())
            .map(|r| r.commit.clone())
            .collect();

        Self {
            total: results.len(),
            failed_count: failed_commits.len(),
            failed_commits,
            results,
            release_commit,
        }
    }

    /// Returns true when no commit failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failed_count == 0
    }

    /// Converts a failing report into [`CoreError::NonConventionalCommits`].
    ///
    /// # Errors
    ///
    /// Returns an error if any commit failed the check.
    pub fn ensure_passed(&self) -> CoreResult<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(CoreError::NonConventionalCommits {
                count: self.failed_count,
                total: self.total,
            })
        }
    }
}

/// Receives check results as they are produced.
///
/// The core never prints; callers decide how results are rendered.
pub trait ReportSink {
    /// Called once the range to inspect is known.
    fn range_resolved(&mut self, _range: &RevisionRange) {}

    /// Called when the leading release commit is dropped.
    fn release_commit_skipped(&mut self, _commit: &Commit) {}

    /// Called for each classified commit, in input order.
    fn commit_checked(&mut self, result: &ClassificationResult);

    /// Called once with the complete report.
    fn finished(&mut self, _report: &CheckReport) {}
}
