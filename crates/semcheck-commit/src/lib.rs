//! Commit types for semcheck.
//!
//! This crate provides [`Commit`], a commit as read from Git and inspected by
//! the conventional commit check.

mod commit;

pub use commit::Commit;
