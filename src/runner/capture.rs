//! Scoped log capture
//!
//! For the duration of one invocation, all runner narration and task
//! output is written to the per-invocation log file, which is then
//! appended to the per-directory aggregate log. The per-invocation file
//! is truncated at the start of each capture so reruns never accumulate
//! duplicate content; the aggregate file only ever grows.
//!
//! The merge happens on every exit path: `finish` performs it on the
//! normal path, and `Drop` performs it when an error unwinds past the
//! capture. Debug tasks skip redirection entirely and keep stderr.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::lock::LogLock;
use crate::task::TaskPaths;

/// Destination for one invocation's diagnostic output
#[derive(Debug)]
pub enum LogSink {
    /// Redirected to the per-invocation log file
    File(File),

    /// Debug mode: output stays on stderr
    Stderr,
}

impl LogSink {
    /// Clone of the underlying file handle, for redirecting
    /// external-process output into the same log
    pub fn file(&self) -> Option<File> {
        match self {
            LogSink::File(f) => f.try_clone().ok(),
            LogSink::Stderr => None,
        }
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().flush(),
        }
    }
}

/// Capture scope for a single invocation
#[derive(Debug)]
pub struct LogCapture {
    sink: LogSink,
    invocation_log: PathBuf,
    aggregate_log: PathBuf,
    lock_aggregate: bool,
    merged: bool,
}

impl LogCapture {
    /// Open the per-invocation log, truncating any previous run's
    /// content; with `debug`, skip redirection and leave output on stderr
    pub fn begin(paths: &TaskPaths, debug: bool) -> io::Result<Self> {
        let sink = if debug {
            LogSink::Stderr
        } else {
            LogSink::File(File::create(paths.invocation_log())?)
        };

        Ok(LogCapture {
            sink,
            invocation_log: paths.invocation_log().to_path_buf(),
            aggregate_log: paths.aggregate_log().to_path_buf(),
            lock_aggregate: false,
            // nothing to merge in debug mode
            merged: debug,
        })
    }

    /// Serialize the aggregate append with a lock file; only needed when
    /// several processes share one pipeline directory
    pub fn with_locking(mut self, lock: bool) -> Self {
        self.lock_aggregate = lock;
        self
    }

    /// The sink all narration and task output goes through
    pub fn sink_mut(&mut self) -> &mut LogSink {
        &mut self.sink
    }

    /// End the capture and append the invocation log to the aggregate log
    pub fn finish(mut self) -> Result<()> {
        self.merge()
    }

    fn merge(&mut self) -> Result<()> {
        if self.merged {
            return Ok(());
        }
        self.merged = true;

        self.sink.flush()?;

        let _lock = if self.lock_aggregate {
            Some(LogLock::acquire(&self.aggregate_log)?)
        } else {
            None
        };

        let content = fs::read(&self.invocation_log)?;
        let mut aggregate = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.aggregate_log)?;
        aggregate.write_all(&content)?;
        Ok(())
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        // error-path merge; failures here have nowhere to go
        let _ = self.merge();
    }
}
