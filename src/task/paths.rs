//! Path resolution
//!
//! Deterministic mapping from a task's declared location fields to the
//! canonical pipeline layout:
//!
//! ```text
//! <directory>/OUTPUT/<subdirectory>/<output_name>   artifact
//! <directory>/LOG/task.log                          aggregate log, append-only
//! <directory>/LOG/<TaskName>.log                    per-invocation log
//! ```
//!
//! The aggregate log is shared by every task under the same `directory`;
//! the per-invocation log is named after the task type.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::task::TaskDecl;

const OUTPUT_DIR: &str = "OUTPUT";
const LOG_DIR: &str = "LOG";
const AGGREGATE_LOG_NAME: &str = "task.log";

/// Resolved filesystem locations for one task type
///
/// Stable for the same root, task name, and declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPaths {
    output_dir: PathBuf,
    output_path: PathBuf,
    log_dir: PathBuf,
    aggregate_log: PathBuf,
    invocation_log: PathBuf,
}

impl TaskPaths {
    /// Resolve all paths for a task rooted at `root`
    pub fn resolve(root: &Path, task_name: &str, decl: &TaskDecl) -> Self {
        let base = root.join(&decl.directory);

        let mut output_dir = base.join(OUTPUT_DIR);
        if !decl.subdirectory.is_empty() {
            output_dir = output_dir.join(&decl.subdirectory);
        }
        let output_path = output_dir.join(&decl.output_name);

        let log_dir = base.join(LOG_DIR);
        let aggregate_log = log_dir.join(AGGREGATE_LOG_NAME);
        let invocation_log = log_dir.join(format!("{task_name}.log"));

        TaskPaths {
            output_dir,
            output_path,
            log_dir,
            aggregate_log,
            invocation_log,
        }
    }

    /// Directory holding the output artifact
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the output artifact; its existence is the sole
    /// completion signal
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Directory holding both log files
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Append-only history of every invocation under this `directory`
    pub fn aggregate_log(&self) -> &Path {
        &self.aggregate_log
    }

    /// Transient log for a single invocation of this task type
    pub fn invocation_log(&self) -> &Path {
        &self.invocation_log
    }

    /// Create the output and log directories if missing
    ///
    /// Idempotent: an existing directory is success, so concurrent first
    /// invocations under the same path are safe even though the
    /// check-then-create is not atomic. Real filesystem errors (e.g.
    /// permission denied) propagate.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
