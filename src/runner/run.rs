//! Run orchestration
//!
//! One invocation moves through a small state machine: construct the
//! task, open the log capture, then either skip (already complete),
//! abort (dependencies incomplete), or execute the body. Every decision
//! is narrated into the log between a STARTING marker and an outcome
//! marker, so the aggregate log reads as a history of the pipeline.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{ExecutionError, Result};
use crate::runner::{completion, LogCapture, LogSink, TaskContext};
use crate::task::{Task, TaskInstance};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Terminal outcome of one runner invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The body ran to completion
    Finished,

    /// The artifact already exists; the body was not invoked
    AlreadyComplete,

    /// Named immediate dependencies have no artifact yet; the body was
    /// not invoked
    DependenciesIncomplete(Vec<String>),
}

impl RunOutcome {
    /// Whether the task body was actually executed
    pub fn ran(&self) -> bool {
        matches!(self, RunOutcome::Finished)
    }

    /// Exit status for drivers: the controlled dependency abort is
    /// distinguishable from the two success-like outcomes
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Finished | RunOutcome::AlreadyComplete => 0,
            RunOutcome::DependenciesIncomplete(_) => 1,
        }
    }
}

/// Orchestrates task invocations rooted at one workspace directory
#[derive(Debug, Clone)]
pub struct Runner {
    root: PathBuf,
    lock_aggregate: bool,
}

impl Runner {
    /// Create a runner; every task `directory` resolves under `root`
    ///
    /// A relative root is absolutized against the current directory once,
    /// so resolved paths stay stable for the runner's lifetime.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(root)
        };
        Runner {
            root,
            lock_aggregate: false,
        }
    }

    /// Serialize aggregate-log appends with a lock file; only needed when
    /// several processes share one pipeline directory
    pub fn with_aggregate_lock(mut self, lock: bool) -> Self {
        self.lock_aggregate = lock;
        self
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one task: skip, abort, or execute
    ///
    /// At most one execution attempt; resumability comes entirely from
    /// the existence check on the next invocation. A body error
    /// propagates to the caller after the capture has merged the logs.
    pub fn run(&self, task: Box<dyn Task>) -> Result<RunOutcome> {
        // contract validation and directory creation happen here
        let instance = TaskInstance::new(task, &self.root)?;

        let mut capture = LogCapture::begin(instance.paths(), instance.decl().debug)?
            .with_locking(self.lock_aggregate);

        let outcome = self.dispatch(&instance, capture.sink_mut());
        match outcome {
            Ok(outcome) => {
                capture.finish()?;
                Ok(outcome)
            }
            // capture drops here; the merge still happens
            Err(e) => Err(e),
        }
    }

    fn dispatch(&self, task: &TaskInstance, sink: &mut LogSink) -> Result<RunOutcome> {
        // blank lines ahead of the start marker separate consecutive
        // blocks in the aggregate log; the finish marker is not reached
        // on failure, so trailing separation cannot be relied on
        let _ = writeln!(sink);
        let _ = writeln!(sink);
        let _ = writeln!(sink, "### STARTING TASK ###");
        let _ = writeln!(sink, "Task: {}", task.name());
        let _ = writeln!(sink, "Started at time: {}", timestamp());

        if completion::is_complete(task) {
            let _ = writeln!(sink, "Task is already completed. No need to run again.");
            let _ = writeln!(sink, "### ABORTING TASK ###");
            return Ok(RunOutcome::AlreadyComplete);
        }

        let report = completion::check_dependencies(task, &self.root, sink)?;
        if !report.all_complete() {
            let _ = writeln!(
                sink,
                "Some required tasks are incomplete. Cannot run {}.",
                task.name()
            );
            let _ = writeln!(sink, "Missing: {}", report.missing.join(", "));
            let _ = writeln!(sink, "### ABORTING TASK ###");
            return Ok(RunOutcome::DependenciesIncomplete(report.missing));
        }

        let _ = writeln!(sink, "This task parameters are:");
        let params = serde_yaml::to_string(task.params())?;
        let _ = write!(sink, "{params}");

        let mut ctx = TaskContext::new(task, &report.dependencies, sink);
        task.run_body(&mut ctx).map_err(|source| ExecutionError::TaskFailed {
            task: task.name().to_string(),
            source,
        })?;

        let _ = writeln!(sink, "Finished at time: {}", timestamp());
        let _ = writeln!(sink, "### FINISHED TASK ###");
        Ok(RunOutcome::Finished)
    }
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(RunOutcome::Finished.exit_code(), 0);
        assert_eq!(RunOutcome::AlreadyComplete.exit_code(), 0);
        assert_eq!(
            RunOutcome::DependenciesIncomplete(vec!["Seed".into()]).exit_code(),
            1
        );
    }

    #[test]
    fn test_outcome_ran() {
        assert!(RunOutcome::Finished.ran());
        assert!(!RunOutcome::AlreadyComplete.ran());
        assert!(!RunOutcome::DependenciesIncomplete(Vec::new()).ran());
    }

    #[test]
    fn test_relative_root_is_absolutized() {
        let runner = Runner::new("pipelines");
        assert!(runner.root().is_absolute());
        assert!(runner.root().ends_with("pipelines"));
    }
}
