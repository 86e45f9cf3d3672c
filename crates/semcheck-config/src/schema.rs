//! Configuration schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Commit type keywords recognised when no configuration overrides them.
pub const DEFAULT_COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "perf", "refactor", "docs", "test", "revert", "style", "chore", "build",
];

/// Substrings that exempt a commit from the type-prefix rule by default.
pub const DEFAULT_EXEMPT_KEYWORDS: &[&str] = &["revert", "merge"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Commit classification configuration.
    #[serde(default)]
    pub commit: CommitConfig,

    /// Revision range configuration.
    #[serde(default)]
    pub range: RangeConfig,
}

impl Config {
    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.commit.types.is_empty() {
            return Err(ConfigError::Invalid(
                "commit.types must not be empty".to_string(),
            ));
        }

        for commit_type in &self.commit.types {
            if commit_type.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "commit.types must not contain empty keywords".to_string(),
                ));
            }
            if commit_type.contains(':') {
                return Err(ConfigError::Invalid(format!(
                    "commit type `{commit_type}` must not contain ':'"
                )));
            }
        }

        if self.commit.exempt_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "commit.exempt_keywords must not contain empty keywords".to_string(),
            ));
        }

        if self.range.remote.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "range.remote must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Commit classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitConfig {
    /// Recognised commit type keywords.
    #[serde(default = "default_types")]
    pub types: Vec<String>,

    /// Messages containing any of these (case-insensitive) always pass.
    #[serde(default = "default_exempt_keywords")]
    pub exempt_keywords: Vec<String>,

    /// Subject prefix identifying the automated release commit.
    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    /// When the release commit is dropped from the check.
    #[serde(default)]
    pub release_commit: ReleaseCommitPolicy,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            types: default_types(),
            exempt_keywords: default_exempt_keywords(),
            release_prefix: default_release_prefix(),
            release_commit: ReleaseCommitPolicy::default(),
        }
    }
}

fn default_types() -> Vec<String> {
    DEFAULT_COMMIT_TYPES.iter().map(|t| (*t).to_string()).collect()
}

fn default_exempt_keywords() -> Vec<String> {
    DEFAULT_EXEMPT_KEYWORDS
        .iter()
        .map(|k| (*k).to_string())
        .collect()
}

fn default_release_prefix() -> String {
    "release ".to_string()
}

/// When the leading release commit is exempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseCommitPolicy {
    /// Only when the range start was resolved automatically.
    #[default]
    Auto,
    /// Always.
    Always,
    /// Never.
    Never,
}

impl ReleaseCommitPolicy {
    /// Returns whether the exemption applies for a range whose start was
    /// given explicitly (`explicit_from`) or resolved.
    #[must_use]
    pub fn applies(self, explicit_from: bool) -> bool {
        match self {
            Self::Auto => !explicit_from,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Revision range configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    /// How the range is resolved when no SHAs are given.
    #[serde(default)]
    pub mode: RangeMode,

    /// Remote used for the default branch in pull request mode.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Glob restricting which tags mark releases (e.g. `v*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_pattern: Option<String>,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            mode: RangeMode::default(),
            remote: default_remote(),
            tag_pattern: None,
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Range resolution strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeMode {
    /// Commits between the two most recent tags.
    #[default]
    Release,
    /// Commits on the current branch not yet on the remote default branch.
    PullRequest,
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::PullRequest => write!(f, "pull-request"),
        }
    }
}
