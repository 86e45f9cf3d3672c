//! Conventional commit classification.

use semcheck_commit::Commit;
use semcheck_config::{CommitConfig, DEFAULT_COMMIT_TYPES, DEFAULT_EXEMPT_KEYWORDS};
use tracing::debug;

use crate::{CheckReport, ClassificationResult, FailureReason, Verdict};

/// Classifies commit messages against a set of type keywords.
///
/// Only the subject line is inspected, and only the text before its first
/// `:`. Matching is case-insensitive and by prefix, so `docs(readme)`
/// matches the `docs` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitClassifier {
    types: Vec<String>,
    exempt_keywords: Vec<String>,
    release_prefix: Option<String>,
}

impl CommitClassifier {
    /// Creates a classifier with the default types, the `revert`/`merge`
    /// exemption and the `release ` commit prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: DEFAULT_COMMIT_TYPES.iter().map(|t| (*t).to_string()).collect(),
            exempt_keywords: DEFAULT_EXEMPT_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            release_prefix: Some("release ".to_string()),
        }
    }

    /// Creates a classifier from the `[commit]` configuration section.
    #[must_use]
    pub fn from_config(config: &CommitConfig) -> Self {
        Self::new()
            .with_types(&config.types)
            .with_exempt_keywords(&config.exempt_keywords)
            .with_release_prefix(Some(config.release_prefix.as_str()))
    }

    /// Replaces the recognised type keywords.
    #[must_use]
    pub fn with_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.types = normalize(types);
        self
    }

    /// Replaces the exemption keywords. An empty list disables exemptions.
    #[must_use]
    pub fn with_exempt_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.exempt_keywords = normalize(keywords);
        self
    }

    /// Sets the release commit prefix. `None` (or an empty prefix) keeps the
    /// leading release commit in the check.
    #[must_use]
    pub fn with_release_prefix(mut self, prefix: Option<&str>) -> Self {
        self.release_prefix = prefix
            .map(str::to_lowercase)
            .filter(|p| !p.trim().is_empty());
        self
    }

    /// Classifies a single commit message.
    pub fn classify_message(&self, message: &str) -> Verdict {
        let subject = message.lines().next().unwrap_or("");
        let normalized = subject.trim().to_lowercase();

        if let Some(keyword) = self
            .exempt_keywords
            .iter()
            .find(|k| normalized.contains(k.as_str()))
        {
            return Verdict::Exempt {
                keyword: keyword.clone(),
            };
        }

        let token = match normalized.find(':') {
            None => {
                return Verdict::NonConventional {
                    reason: FailureReason::MissingColon,
                };
            }
            Some(0) => {
                return Verdict::NonConventional {
                    reason: FailureReason::EmptyType,
                };
            }
            Some(idx) => &normalized[..idx],
        };

        match self.types.iter().find(|t| token.starts_with(t.as_str())) {
            Some(commit_type) => Verdict::Conventional {
                commit_type: commit_type.clone(),
            },
            None => Verdict::NonConventional {
                reason: FailureReason::UnknownType(token.to_string()),
            },
        }
    }

    /// Classifies a sequence of commits.
    ///
    /// If the first commit's subject starts with the release prefix it is
    /// dropped and recorded in [`CheckReport::release_commit`]; a release
    /// commit anywhere else is classified like any other.
    pub fn classify(&self, commits: &[Commit]) -> CheckReport {
        let (release_commit, rest) = match commits.split_first() {
            Some((first, rest)) if self.is_release_commit(first) => {
                debug!(hash = %first.short_hash(), "dropping release commit");
                (Some(first.clone()), rest)
            }
            _ => (None, commits),
        };

        let results = rest
            .iter()
            .map(|commit| ClassificationResult {
                commit: commit.clone(),
                verdict: self.classify_message(&commit.message),
            })
            .collect();

        CheckReport::new(results, release_commit)
    }

    fn is_release_commit(&self, commit: &Commit) -> bool {
        self.release_prefix.as_deref().is_some_and(|prefix| {
            commit
                .subject()
                .trim_start()
                .to_lowercase()
                .starts_with(prefix)
        })
    }
}

impl Default for CommitClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits(messages: &[&str]) -> Vec<Commit> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| Commit::new(format!("sha{i}"), *m))
            .collect()
    }

    #[test]
    fn test_classify_message_cases() {
        let classifier = CommitClassifier::new();
        let cases = [
            ("Revert: these really bad commits", true),
            ("chore: update deps", true),
            ("feat: add great feature", true),
            ("Refactor: improve code base", true),
            ("docs: improve docs", true),
            ("test: make all the tests", true),
            ("Style: improve the style", true),
            ("improve this code", false),
            ("fix this code", false),
            ("docs(README): improve readability", true),
            ("build: bump toolchain", true),
            ("  perf: faster  ", true),
        ];

        for (message, expected) in cases {
            assert_eq!(
                classifier.classify_message(message).is_conventional(),
                expected,
                "message: {message:?}"
            );
        }
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = CommitClassifier::new();
        assert_eq!(
            classifier.classify_message("Refactor: improve code base"),
            classifier.classify_message("refactor: improve code base")
        );
    }

    #[test]
    fn test_scoped_type_reports_base_type() {
        let verdict = CommitClassifier::new().classify_message("docs(README): improve readability");
        assert_eq!(
            verdict,
            Verdict::Conventional {
                commit_type: "docs".to_string()
            }
        );
    }

    #[test]
    fn test_failure_reasons() {
        let classifier = CommitClassifier::new();
        assert_eq!(
            classifier.classify_message("fix this code"),
            Verdict::NonConventional {
                reason: FailureReason::MissingColon
            }
        );
        assert_eq!(
            classifier.classify_message(": nothing"),
            Verdict::NonConventional {
                reason: FailureReason::EmptyType
            }
        );
        assert_eq!(
            classifier.classify_message("WIP: stuff"),
            Verdict::NonConventional {
                reason: FailureReason::UnknownType("wip".to_string())
            }
        );
    }

    #[test]
    fn test_only_subject_is_classified() {
        let classifier = CommitClassifier::new();
        let verdict = classifier.classify_message("improve things\n\nfix: this is in the body");
        assert!(!verdict.is_conventional());
    }

    #[test]
    fn test_exempt_keywords_in_subject() {
        let classifier = CommitClassifier::new();
        assert_eq!(
            classifier.classify_message("Merge branch 'main' into topic"),
            Verdict::Exempt {
                keyword: "merge".to_string()
            }
        );
        assert!(
            classifier
                .classify_message("Undo the Reverted change")
                .is_conventional()
        );
    }

    #[test]
    fn test_exempt_keywords_in_body_are_ignored() {
        let classifier = CommitClassifier::new();
        assert_eq!(
            classifier.classify_message("wip stuff\n\nThis was merged from the old branch"),
            Verdict::NonConventional {
                reason: FailureReason::MissingColon
            }
        );
        assert!(
            !classifier
                .classify_message("undo things\n\nThis reverts commit abc.")
                .is_conventional()
        );
    }

    #[test]
    fn test_exemptions_can_be_disabled() {
        let classifier = CommitClassifier::new().with_exempt_keywords::<&str>(&[]);
        assert!(
            !classifier
                .classify_message("Merge branch 'main' into topic")
                .is_conventional()
        );
        // revert is still a recognised type
        assert!(classifier.classify_message("revert: undo").is_conventional());
    }

    #[test]
    fn test_custom_types_are_normalized() {
        let classifier = CommitClassifier::new().with_types(&["Feat", " FIX ", ""]);
        assert!(classifier.classify_message("FEAT: x").is_conventional());
        assert!(classifier.classify_message("fix: x").is_conventional());
        assert!(!classifier.classify_message("chore: x").is_conventional());
    }

    #[test]
    fn test_classify_end_to_end() {
        let classifier = CommitClassifier::new();
        let report = classifier.classify(&commits(&["feat: add x", "improve this code", "chore: bump deps"]));

        assert_eq!(report.total, 3);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.failed_commits.len(), 1);
        assert_eq!(report.failed_commits[0].message, "improve this code");
        assert!(report.release_commit.is_none());
    }

    #[test]
    fn test_classify_preserves_order() {
        let report = CommitClassifier::new().classify(&commits(&["oops", "feat: a", "wip"]));
        let hashes: Vec<_> = report.results.iter().map(|r| r.commit.hash.as_str()).collect();
        assert_eq!(hashes, vec!["sha0", "sha1", "sha2"]);
        let failed: Vec<_> = report.failed_commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(failed, vec!["sha0", "sha2"]);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = CommitClassifier::new();
        let input = commits(&["release 1.2.0", "feat: a", "nope"]);
        assert_eq!(classifier.classify(&input), classifier.classify(&input));
    }

    #[test]
    fn test_release_commit_dropped_only_when_first() {
        let classifier = CommitClassifier::new();
        let report = classifier.classify(&commits(&["Release 1.2.0", "feat: a", "release 1.1.0"]));

        assert_eq!(report.release_commit.as_ref().map(|c| c.hash.as_str()), Some("sha0"));
        assert_eq!(report.total, 2);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.failed_commits[0].hash, "sha2");
    }

    #[test]
    fn test_release_exemption_disabled() {
        let classifier = CommitClassifier::new().with_release_prefix(None);
        let report = classifier.classify(&commits(&["release 1.2.0", "feat: a"]));

        assert!(report.release_commit.is_none());
        assert_eq!(report.total, 2);
        assert_eq!(report.failed_count, 1);
    }

    #[test]
    fn test_classify_empty() {
        let report = CommitClassifier::new().classify(&[]);
        assert_eq!(report.total, 0);
        assert!(report.passed());
    }

    #[test]
    fn test_from_config() {
        let config = CommitConfig {
            types: vec!["feat".to_string()],
            exempt_keywords: Vec::new(),
            release_prefix: "chore(release): ".to_string(),
            ..CommitConfig::default()
        };
        let classifier = CommitClassifier::from_config(&config);

        let report = classifier.classify(&commits(&["chore(release): 2.0.0", "merge stuff", "feat: x"]));
        assert!(report.release_commit.is_some());
        assert_eq!(report.total, 2);
        assert_eq!(report.failed_count, 1);
    }
}
