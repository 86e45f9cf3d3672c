//! Git access layer for semcheck.
//!
//! This crate provides Git operations:
//! - [`GitExecutor`]: runs git subcommands and returns their raw output
//! - [`Revisions`]: tag, branch and commit lookups built atop an executor
//! - [`Repository`]: git2-backed discovery and commit log retrieval

mod error;
mod executor;
mod log;
mod repository;
mod revisions;

pub use error::{GitError, GitResult};
pub use executor::{GitCli, GitExecutor};
pub use log::CommitLog;
pub use repository::Repository;
pub use revisions::Revisions;
