// src/config/validate.rs

use std::num::NonZeroUsize;

use tokio::sync::Semaphore;

use crate::config::model::{
    default_log_dir, ConfigFile, RawConfigFile, RawRunSection, RunConfig,
};
use crate::errors::{BatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = BatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_run_section(&raw.run)?;
        Ok(ConfigFile::new_unchecked(raw.run))
    }
}

impl TryFrom<RawRunSection> for RunConfig {
    type Error = BatchError;

    fn try_from(raw: RawRunSection) -> std::result::Result<Self, Self::Error> {
        validate_run_section(&raw)?;

        let parallelism = match raw.parallelism {
            Some(n) => NonZeroUsize::new(n).ok_or_else(zero_parallelism)?,
            None => NonZeroUsize::MIN,
        };

        Ok(RunConfig {
            parallelism,
            job_log: raw.job_log.unwrap_or(false),
            log_dir: raw.log_dir.unwrap_or_else(default_log_dir),
            fallback_output: raw.fallback_output.unwrap_or_default(),
            // An empty $SHELL is as good as no $SHELL.
            shell: raw.shell.filter(|s| !s.as_os_str().is_empty()),
        })
    }
}

fn validate_run_section(run: &RawRunSection) -> Result<()> {
    match run.parallelism {
        Some(0) => return Err(zero_parallelism()),
        Some(n) if n > Semaphore::MAX_PERMITS => {
            return Err(BatchError::ConfigError(format!(
                "parallelism must be <= {} (got {n})",
                Semaphore::MAX_PERMITS
            )));
        }
        _ => {}
    }

    if let Some(dir) = &run.log_dir {
        if dir.as_os_str().is_empty() {
            return Err(BatchError::ConfigError(
                "log_dir must not be empty (use \".\" for the current directory)".to_string(),
            ));
        }
    }

    Ok(())
}

fn zero_parallelism() -> BatchError {
    BatchError::ConfigError("parallelism must be >= 1 (got 0)".to_string())
}
