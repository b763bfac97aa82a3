// src/exec/output.rs

//! Output routing for job processes.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::warn;

use crate::types::OutputFallback;

/// Log file for job `seq`: `<dir>/<seq>.out`.
pub fn job_log_path(dir: &Path, seq: usize) -> PathBuf {
    dir.join(format!("{seq}.out"))
}

/// Stdout/stderr pair for one job process.
#[derive(Debug)]
pub struct JobOutput {
    pub stdout: Stdio,
    pub stderr: Stdio,
    /// Set when both streams go to a job log.
    pub log_path: Option<PathBuf>,
}

impl JobOutput {
    pub fn fallback(fallback: OutputFallback) -> Self {
        let (stdout, stderr) = match fallback {
            OutputFallback::Discard => (Stdio::null(), Stdio::null()),
            OutputFallback::Inherit => (Stdio::inherit(), Stdio::inherit()),
        };
        Self {
            stdout,
            stderr,
            log_path: None,
        }
    }

    /// Both streams into a freshly truncated `<dir>/<seq>.out`.
    pub fn job_log(dir: &Path, seq: usize) -> io::Result<Self> {
        let path = job_log_path(dir, seq);
        let file = File::create(&path)?;
        let err_file = file.try_clone()?;
        Ok(Self {
            stdout: Stdio::from(file),
            stderr: Stdio::from(err_file),
            log_path: Some(path),
        })
    }

    /// Job log if `job_log` is set and the file can be created; otherwise
    /// the fallback. A log file that cannot be created is reported and the
    /// job runs anyway.
    pub fn resolve(job_log: bool, dir: &Path, seq: usize, fallback: OutputFallback) -> Self {
        if !job_log {
            return Self::fallback(fallback);
        }

        match Self::job_log(dir, seq) {
            Ok(output) => output,
            Err(err) => {
                warn!(
                    seq,
                    path = %job_log_path(dir, seq).display(),
                    error = %err,
                    ?fallback,
                    "could not create job log; using fallback output"
                );
                Self::fallback(fallback)
            }
        }
    }
}
