//! Core library for semcheck.
//!
//! Resolves the range of commits introduced since the last release (or on a
//! pull request branch), classifies every commit message against the
//! Conventional Commits type prefixes and reports the verdict.

mod checker;
mod classifier;
mod error;
mod report;
mod resolver;

pub use checker::{CheckRequest, Checker};
pub use classifier::CommitClassifier;
pub use error::{CoreError, CoreResult};
pub use report::{CheckReport, ClassificationResult, FailureReason, ReportSink, Verdict};
pub use resolver::{RangeSettings, RevisionRange, RevisionResolver};
