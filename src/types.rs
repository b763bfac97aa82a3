use std::borrow::Cow;
use std::process::ExitStatus;

use serde::Deserialize;

use crate::errors::JobError;

/// One line of input, to be fed to the shell as a script.
///
/// `seq` is assigned in read order starting at 0 and doubles as the name of
/// the job's log file (`<seq>.out`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub seq: usize,
    pub script: Vec<u8>,
}

impl Job {
    pub fn new(seq: usize, script: impl Into<Vec<u8>>) -> Self {
        Self {
            seq,
            script: script.into(),
        }
    }

    /// Script text for logging. Invalid UTF-8 is replaced, the bytes handed
    /// to the shell are not.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.script)
    }
}

/// How a job's shell process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStatus {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl JobStatus {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for JobStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Result of running one job.
pub type ExecutionOutcome = Result<JobStatus, JobError>;

/// Where job output goes when it is not written to a per-job log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFallback {
    /// Send stdout and stderr to the null device.
    Discard,
    /// Share the runner's own stdout and stderr.
    Inherit,
}

impl Default for OutputFallback {
    fn default() -> Self {
        OutputFallback::Discard
    }
}
