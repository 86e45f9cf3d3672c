//! Git command execution.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::{GitError, GitResult};

/// Runs git subcommands in a working directory.
///
/// Implementations return the raw standard output of the command. Callers
/// are responsible for trimming and splitting it.
pub trait GitExecutor {
    /// Runs `git <args>` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be started or exits unsuccessfully.
    fn run(&self, dir: &Path, args: &[&str]) -> GitResult<String>;
}

/// Executor backed by the `git` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl GitCli {
    /// Creates an executor that runs `git`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }

    /// Uses a different git binary.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor for GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> GitResult<String> {
        debug!(?dir, ?args, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| GitError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
