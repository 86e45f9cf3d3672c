//! Check command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;

use semcheck_config::{Config, RangeMode, ReleaseCommitPolicy, load_config, load_or_default};
use semcheck_core::{
    CheckRequest, Checker, CommitClassifier, CoreError, RangeSettings, RevisionResolver,
};
use semcheck_git::{GitCli, Repository};

use crate::output::{JsonSink, TextSink};

/// Range mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Commits since the previous release tag
    Release,
    /// Commits on the current branch not yet on the remote default branch
    PullRequest,
}

impl From<ModeArg> for RangeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Release => RangeMode::Release,
            ModeArg::PullRequest => RangeMode::PullRequest,
        }
    }
}

/// Release commit policy argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReleaseCommitArg {
    /// Skip it only when the range start is resolved automatically
    Auto,
    /// Always skip it
    Always,
    /// Never skip it
    Never,
}

impl From<ReleaseCommitArg> for ReleaseCommitPolicy {
    fn from(arg: ReleaseCommitArg) -> Self {
        match arg {
            ReleaseCommitArg::Auto => ReleaseCommitPolicy::Auto,
            ReleaseCommitArg::Always => ReleaseCommitPolicy::Always,
            ReleaseCommitArg::Never => ReleaseCommitPolicy::Never,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per commit
    Text,
    /// The full report as JSON
    Json,
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// The commit before the first one to check (default: previous release)
    #[arg(short = 'p', long = "first-sha", visible_alias = "previous-rev", value_name = "SHA")]
    pub first_sha: Option<String>,

    /// The last commit to check (default: latest release or HEAD)
    #[arg(long = "latest-sha", visible_alias = "rev", value_name = "SHA")]
    pub latest_sha: Option<String>,

    /// The directory of the repository (default: discovered from the current directory)
    #[arg(long, visible_alias = "repo-dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// How the range is resolved when no SHAs are given
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// When the leading release commit is skipped
    #[arg(long, value_enum)]
    pub release_commit: Option<ReleaseCommitArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file (default: semcheck.toml in the repository or a parent)
    #[arg(long, env = "SEMCHECK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CheckArgs {
    fn load_config(&self, dir: &std::path::Path) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path),
            None => load_or_default(dir),
        }
        .context("failed to load configuration")?;

        if let Some(mode) = self.mode {
            config.range.mode = mode.into();
        }
        if let Some(policy) = self.release_commit {
            config.commit.release_commit = policy.into();
        }

        Ok(config)
    }
}

/// Runs the check command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CheckArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => Repository::discover(".")
            .context("failed to discover git repository")?
            .path()
            .to_path_buf(),
    };
    debug!(?dir, "using repository directory");

    let config = args.load_config(&dir)?;

    let repo = Repository::discover(&dir).map_err(|err| CoreError::InvalidRepository {
        path: dir.clone(),
        reason: err.to_string(),
    })?;

    let git = GitCli::new();
    let resolver = RevisionResolver::new(&git, &dir, RangeSettings::from(&config.range));
    let checker = Checker::new(resolver, &repo, CommitClassifier::from_config(&config.commit))
        .with_release_policy(config.commit.release_commit);

    let request = CheckRequest {
        from: args.first_sha.clone(),
        to: args.latest_sha.clone(),
    };

    let report = match args.format {
        OutputFormat::Text => checker.run(&request, &mut TextSink)?,
        OutputFormat::Json => {
            let mut sink = JsonSink::default();
            let report = checker.run(&request, &mut sink)?;
            println!("{}", sink.render(&report)?);
            report
        }
    };

    report.ensure_passed()?;
    Ok(())
}
