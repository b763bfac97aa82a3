// src/exec/shell.rs

//! Production job runner: one shell process per job.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};
use tracing::{debug, trace};

use crate::config::RunConfig;
use crate::errors::JobError;
use crate::exec::JobRunner;
use crate::exec::output::JobOutput;
use crate::types::{ExecutionOutcome, Job, JobStatus, OutputFallback};

/// Runs each job by starting the configured shell with no arguments and
/// feeding the job's script on its stdin.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: Option<PathBuf>,
    job_log: bool,
    log_dir: PathBuf,
    fallback: OutputFallback,
}

impl ShellRunner {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            job_log: config.job_log,
            log_dir: config.log_dir.clone(),
            fallback: config.fallback_output,
        }
    }

    async fn run_job(&self, job: Job) -> ExecutionOutcome {
        let seq = job.seq;
        // The log file is created even if the shell then fails to start.
        let output = JobOutput::resolve(self.job_log, &self.log_dir, seq, self.fallback);
        if let Some(path) = &output.log_path {
            debug!(seq, path = %path.display(), "writing job output to log file");
        }

        let shell = self.shell.as_ref().ok_or(JobError::NoShell { seq })?;

        let mut cmd = Command::new(shell);
        cmd.stdin(Stdio::piped())
            .stdout(output.stdout)
            .stderr(output.stderr);

        let mut child = cmd
            .spawn()
            .map_err(|source| JobError::Launch { seq, source })?;

        let stdin = child.stdin.take().ok_or_else(|| JobError::Launch {
            seq,
            source: io::Error::other("shell stdin was not captured"),
        })?;

        trace!(seq, pid = ?child.id(), shell = %shell.display(), "shell started");

        // Feed the script from its own task so a shell that writes before it
        // has consumed its input can never block us.
        let feeder = tokio::spawn(feed_script(seq, stdin, job.script));

        let status = child
            .wait()
            .await
            .map_err(|source| JobError::Wait { seq, source });

        // The shell is gone; nothing is left to read whatever the feeder
        // still holds.
        feeder.abort();

        let status = JobStatus::from(status?);
        debug!(seq, exit_code = ?status.code, "shell exited");
        Ok(status)
    }
}

impl JobRunner for ShellRunner {
    fn execute(
        &self,
        job: Job,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>> {
        Box::pin(self.run_job(job))
    }
}

/// Write the script to the shell and close its stdin.
async fn feed_script(seq: usize, mut stdin: ChildStdin, script: Vec<u8>) {
    if let Err(err) = stdin.write_all(&script).await {
        // Usually a shell that exited without reading all of its input.
        debug!(seq, error = %err, "could not write script to shell stdin");
    }
    drop(stdin);
}
