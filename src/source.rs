// src/source.rs

//! Job source: turns an input stream into numbered [`Job`]s, one per line.
//!
//! A read error does not end the run early. The source stops producing jobs,
//! remembers the error, and hands it out through [`JobSource::take_error`]
//! once the caller has finished with the jobs it already got.

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::errors::{BatchError, Result};
use crate::types::Job;

/// Boxed reader used for both file and stdin input.
pub type BoxedInput = Box<dyn AsyncBufRead + Unpin + Send>;

const STDIN_ORIGIN: &str = "<stdin>";

#[derive(Debug)]
pub struct JobSource<R> {
    reader: R,
    origin: String,
    next_seq: usize,
    exhausted: bool,
    deferred: Option<io::Error>,
}

impl<R: AsyncBufRead + Unpin> JobSource<R> {
    /// `origin` names the stream in error messages (a path or `<stdin>`).
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            next_seq: 0,
            exhausted: false,
            deferred: None,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Read the next line as a job, or `None` at end of input.
    ///
    /// The line terminator (`\n` or `\r\n`) is stripped, as is a lone `\r`
    /// ending the last line. Empty lines are jobs too. A final line without a
    /// terminator is still a job.
    pub async fn next_job(&mut self) -> Option<Job> {
        if self.exhausted {
            return None;
        }

        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line).await {
            Ok(0) => {
                self.exhausted = true;
                None
            }
            Ok(_) => Some(self.number(line)),
            Err(err) => {
                debug!(origin = %self.origin, error = %err, "read error; ending job input");
                self.exhausted = true;
                self.deferred = Some(err);
                // Bytes read before the error still form a job.
                if line.is_empty() {
                    None
                } else {
                    Some(self.number(line))
                }
            }
        }
    }

    /// The read error that ended the input, if any. Yields it once.
    pub fn take_error(&mut self) -> Option<BatchError> {
        self.deferred.take().map(|source| BatchError::InputError {
            origin: self.origin.clone(),
            source,
        })
    }

    /// Number of jobs produced so far.
    pub fn jobs_read(&self) -> usize {
        self.next_seq
    }

    fn number(&mut self, mut line: Vec<u8>) -> Job {
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let job = Job::new(self.next_seq, line);
        self.next_seq += 1;
        job
    }
}

/// Open the job list at `path`, or standard input when `path` is `None`.
pub async fn open_input(path: Option<&Path>) -> Result<JobSource<BoxedInput>> {
    match path {
        Some(path) => {
            let origin = path.display().to_string();
            let file = File::open(path)
                .await
                .map_err(|source| BatchError::InputError {
                    origin: origin.clone(),
                    source,
                })?;
            let reader: BoxedInput = Box::new(BufReader::new(file));
            Ok(JobSource::new(reader, origin))
        }
        None => {
            let reader: BoxedInput = Box::new(BufReader::new(tokio::io::stdin()));
            Ok(JobSource::new(reader, STDIN_ORIGIN))
        }
    }
}
