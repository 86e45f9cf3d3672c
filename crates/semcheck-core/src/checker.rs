//! End-to-end check execution.

use semcheck_config::ReleaseCommitPolicy;
use semcheck_git::CommitLog;
use tracing::{info, warn};

use crate::{CheckReport, CommitClassifier, CoreError, CoreResult, ReportSink, RevisionResolver};

/// Range bounds requested by the caller. `None` means resolve automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRequest {
    /// Explicit exclusive lower bound.
    pub from: Option<String>,
    /// Explicit inclusive upper bound.
    pub to: Option<String>,
}

impl CheckRequest {
    fn explicit_from(&self) -> bool {
        self.from.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Resolves a range, fetches its commits and classifies them.
pub struct Checker<'a> {
    resolver: RevisionResolver<'a>,
    log: &'a dyn CommitLog,
    classifier: CommitClassifier,
    release_policy: ReleaseCommitPolicy,
}

impl<'a> Checker<'a> {
    /// Creates a checker with the [`ReleaseCommitPolicy::Auto`] policy.
    #[must_use]
    pub fn new(
        resolver: RevisionResolver<'a>,
        log: &'a dyn CommitLog,
        classifier: CommitClassifier,
    ) -> Self {
        Self {
            resolver,
            log,
            classifier,
            release_policy: ReleaseCommitPolicy::Auto,
        }
    }

    /// Sets when the leading release commit is dropped.
    #[must_use]
    pub fn with_release_policy(mut self, policy: ReleaseCommitPolicy) -> Self {
        self.release_policy = policy;
        self
    }

    /// Runs the check, streaming results into `sink`.
    ///
    /// A report with failures is still `Ok`; use
    /// [`CheckReport::ensure_passed`] to turn it into an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the range cannot be resolved or its commits
    /// cannot be read. Nothing is reported to `sink` beyond the resolved
    /// range in that case.
    pub fn run(&self, request: &CheckRequest, sink: &mut dyn ReportSink) -> CoreResult<CheckReport> {
        let range = self
            .resolver
            .resolve_range(request.from.as_deref(), request.to.as_deref())?;
        sink.range_resolved(&range);

        let commits = self
            .log
            .commits_between(&range.from, &range.to)
            .map_err(CoreError::git("fetch commits"))?;
        info!(count = commits.len(), "found commits to check");

        let report = if self.release_policy.applies(request.explicit_from()) {
            self.classifier.classify(&commits)
        } else {
            self.classifier
                .clone()
                .with_release_prefix(None)
                .classify(&commits)
        };

        if let Some(release) = &report.release_commit {
            sink.release_commit_skipped(release);
        }
        for result in &report.results {
            if !result.is_conventional() {
                warn!(
                    hash = %result.commit.short_hash(),
                    subject = %result.commit.subject(),
                    "non-conventional commit"
                );
            }
            sink.commit_checked(result);
        }
        sink.finished(&report);

        Ok(report)
    }
}
