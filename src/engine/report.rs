// src/engine/report.rs

use tokio::task::JoinError;
use tracing::error;

use crate::types::ExecutionOutcome;

/// Counts for one run, tallied by the dispatcher as workers are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Jobs handed to a worker.
    pub launched: usize,
    /// Exited with status 0.
    pub succeeded: usize,
    /// Ran, but exited non-zero or by signal.
    pub failed: usize,
    /// Could not be run or waited on, or the worker panicked.
    pub errored: usize,
}

impl RunReport {
    /// Jobs whose worker has been joined.
    pub fn finished(&self) -> usize {
        self.succeeded + self.failed + self.errored
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.launched
    }

    pub(crate) fn record(&mut self, joined: Result<(usize, ExecutionOutcome), JoinError>) {
        match joined {
            Ok((_, Ok(status))) if status.success => self.succeeded += 1,
            Ok((_, Ok(_))) => self.failed += 1,
            Ok((_, Err(_))) => self.errored += 1,
            Err(err) => {
                error!(error = %err, "job worker panicked");
                self.errored += 1;
            }
        }
    }
}
