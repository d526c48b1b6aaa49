//! Execution context for task bodies
//!
//! The context is handed to `Task::run` and is the body's only window on
//! the outside: resolved paths, declared parameters, instantiated
//! dependencies, and the invocation's log sink. Process streams are never
//! swapped; bodies log through the injected sink instead.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::anyhow;

use crate::runner::LogSink;
use crate::task::{Params, TaskInstance, TaskPaths};

/// State available to one task execution
pub struct TaskContext<'a> {
    params: &'a Params,
    paths: &'a TaskPaths,
    dependencies: &'a [TaskInstance],
    sink: &'a mut LogSink,
}

impl<'a> TaskContext<'a> {
    pub(crate) fn new(
        task: &'a TaskInstance,
        dependencies: &'a [TaskInstance],
        sink: &'a mut LogSink,
    ) -> Self {
        TaskContext {
            params: task.params(),
            paths: task.paths(),
            dependencies,
            sink,
        }
    }

    /// Declared parameters of the running task
    pub fn params(&self) -> &Params {
        self.params
    }

    /// Resolved paths of the running task
    pub fn paths(&self) -> &TaskPaths {
        self.paths
    }

    /// Where the body must write its artifact
    pub fn output_path(&self) -> &Path {
        self.paths.output_path()
    }

    /// Instantiated immediate dependencies, in declaration order
    pub fn dependencies(&self) -> &[TaskInstance] {
        self.dependencies
    }

    /// Look up an immediate dependency by task name
    pub fn dependency(&self, name: &str) -> Option<&TaskInstance> {
        self.dependencies.iter().find(|d| d.name() == name)
    }

    /// Load the artifact of the named immediate dependency
    pub fn load_dependency_output(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        self.dependency(name)
            .ok_or_else(|| anyhow!("'{name}' is not an immediate dependency"))?
            .load_output()
    }

    /// Write one line to the invocation log
    pub fn log(&mut self, message: impl AsRef<str>) {
        let _ = writeln!(self.sink, "{}", message.as_ref());
    }

    /// Clone of the log file handle, for wiring an external process's
    /// stdout/stderr into the same log; None in debug mode
    pub fn log_file(&self) -> Option<File> {
        self.sink.file()
    }
}

impl Write for TaskContext<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}
