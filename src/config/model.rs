// src/config/model.rs

use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::OutputFallback;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [run]
/// parallelism = 4
/// job_log = true
/// log_dir = "logs"
/// fallback_output = "inherit"
/// shell = "/bin/bash"
/// ```
///
/// Every key is optional; anything left out falls back to the command line,
/// the environment, or the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub run: RawRunSection,
}

/// `[run]` section, also used to carry command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRunSection {
    /// Maximum number of jobs running at once.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Write each job's stdout and stderr to `<log_dir>/<seq>.out`.
    #[serde(default)]
    pub job_log: Option<bool>,

    /// Directory for job log files.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Destination for output that is not going to a job log.
    #[serde(default)]
    pub fallback_output: Option<OutputFallback>,

    /// Shell interpreter. Normally taken from `$SHELL`.
    #[serde(default)]
    pub shell: Option<PathBuf>,
}

impl RawRunSection {
    /// Layer `overrides` on top of `self`; any key set in `overrides` wins.
    pub fn overridden_by(self, overrides: RawRunSection) -> RawRunSection {
        RawRunSection {
            parallelism: overrides.parallelism.or(self.parallelism),
            job_log: overrides.job_log.or(self.job_log),
            log_dir: overrides.log_dir.or(self.log_dir),
            fallback_output: overrides.fallback_output.or(self.fallback_output),
            shell: overrides.shell.or(self.shell),
        }
    }
}

/// A config file that passed validation.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub run: RawRunSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(run: RawRunSection) -> Self {
        Self { run }
    }
}

/// Validated settings handed to the dispatcher and the shell runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of admission tokens.
    pub parallelism: NonZeroUsize,
    pub job_log: bool,
    pub log_dir: PathBuf,
    pub fallback_output: OutputFallback,
    /// `None` means every job fails to launch.
    pub shell: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallelism: NonZeroUsize::MIN,
            job_log: false,
            log_dir: default_log_dir(),
            fallback_output: OutputFallback::default(),
            shell: None,
        }
    }
}

pub(crate) fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}
