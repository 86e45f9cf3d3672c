//! Configuration management for semcheck.
//!
//! This crate handles loading and validating the optional `semcheck.toml`
//! configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config_from, load_config, load_or_default};
pub use schema::{
    CommitConfig, Config, DEFAULT_COMMIT_TYPES, DEFAULT_EXEMPT_KEYWORDS, RangeConfig, RangeMode,
    ReleaseCommitPolicy,
};
