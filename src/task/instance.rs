//! Runtime task representation
//!
//! A [`TaskInstance`] pairs a boxed contract implementation with its
//! validated declaration and resolved paths. Instances are constructed
//! fresh for every runner invocation and never persisted; the artifact
//! file and the logs are the only durable state.

use std::path::Path;

use crate::error::Result;
use crate::runner::TaskContext;
use crate::task::{Params, Task, TaskDecl, TaskFactory, TaskPaths};

/// One instantiation of a task type
pub struct TaskInstance {
    name: &'static str,
    decl: TaskDecl,
    paths: TaskPaths,
    task: Box<dyn Task>,
}

impl TaskInstance {
    /// Validate the contract, resolve paths, and create the output and
    /// log directories
    ///
    /// An incomplete contract fails here, before anything under the
    /// task's `directory` is touched. Directory creation is idempotent.
    pub fn new(task: Box<dyn Task>, root: &Path) -> Result<Self> {
        let name = task.name();
        let decl = task.decl();
        decl.validate(name)?;

        let paths = TaskPaths::resolve(root, name, &decl);
        paths.ensure_dirs()?;

        Ok(TaskInstance {
            name,
            decl,
            paths,
            task,
        })
    }

    /// Name of the underlying task type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared contract members
    pub fn decl(&self) -> &TaskDecl {
        &self.decl
    }

    /// Declared parameters
    pub fn params(&self) -> &Params {
        &self.decl.parameters
    }

    /// Resolved filesystem locations
    pub fn paths(&self) -> &TaskPaths {
        &self.paths
    }

    /// Immediate dependency factories, in declaration order
    pub fn requires(&self) -> Vec<TaskFactory> {
        self.task.requires()
    }

    /// Load this task's artifact through the contract's loader
    pub fn load_output(&self) -> anyhow::Result<Vec<u8>> {
        self.task.load_output(&self.paths)
    }

    /// Invoke the execution body
    pub(crate) fn run_body(&self, ctx: &mut TaskContext) -> anyhow::Result<()> {
        self.task.run(ctx)
    }
}

impl std::fmt::Debug for TaskInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskInstance")
            .field("name", &self.name)
            .field("decl", &self.decl)
            .field("paths", &self.paths)
            .finish()
    }
}
