//! Advisory file locking for the shared aggregate log
//!
//! The aggregate log is an append-only resource shared by every task
//! under one pipeline directory. Appends from a single process never
//! interleave, but nothing stops several processes from merging at once,
//! so callers who run pipelines concurrently can opt into a lock file
//! that serializes the append.
//!
//! The lock is a `create_new` file next to the protected path, removed on
//! drop. A stale lock (crashed holder) must be deleted manually; the
//! holder's pid is written into the file to make that call easier.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{ExecutionError, Result};

const RETRY_INTERVAL: Duration = Duration::from_millis(50);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Held lock on a log file; released on drop
#[derive(Debug)]
pub struct LogLock {
    path: PathBuf,
}

impl LogLock {
    /// Acquire the lock for `target`, waiting up to the default timeout
    pub fn acquire(target: &Path) -> Result<Self> {
        Self::acquire_timeout(target, DEFAULT_TIMEOUT)
    }

    /// Acquire the lock for `target`, waiting up to `timeout`
    pub fn acquire_timeout(target: &Path, timeout: Duration) -> Result<Self> {
        let path = lock_path(target);
        let start = Instant::now();

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let _ = writeln!(file, "{}", std::process::id());
                    return Ok(LogLock { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if start.elapsed() >= timeout {
                        return Err(
                            ExecutionError::LogBusy(path.display().to_string()).into()
                        );
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn lock_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_acquire_and_release() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("task.log");
        let lock_file = dir.path().join("task.log.lock");

        let lock = LogLock::acquire(&target).unwrap();
        assert!(lock_file.exists());

        drop(lock);
        assert!(!lock_file.exists());
    }

    #[test]
    fn test_second_acquire_times_out() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("task.log");

        let _held = LogLock::acquire(&target).unwrap();
        let err = LogLock::acquire_timeout(&target, Duration::from_millis(120)).unwrap_err();
        assert!(err.to_string().contains("locked by another writer"));
    }

    #[test]
    fn test_reacquire_after_release() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("task.log");

        drop(LogLock::acquire(&target).unwrap());
        LogLock::acquire_timeout(&target, Duration::from_millis(120)).unwrap();
    }
}
