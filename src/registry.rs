//! Task registry
//!
//! Explicit mapping of task names to factories, built once at process
//! start. Drivers resolve a requested name here; an unknown name fails
//! before any runner invocation, and nothing under the task's directory
//! is touched.

use std::collections::BTreeMap;

use crate::error::{ContractError, ContractResult, Result};
use crate::runner::{RunOutcome, Runner};
use crate::task::TaskFactory;

/// Name → factory registry of known task types
#[derive(Debug, Default)]
pub struct Registry {
    tasks: BTreeMap<String, TaskFactory>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task type under its own name
    pub fn register(&mut self, factory: TaskFactory) -> ContractResult<()> {
        let name = factory().name().to_string();
        if self.tasks.contains_key(&name) {
            return Err(ContractError::DuplicateTask(name));
        }
        self.tasks.insert(name, factory);
        Ok(())
    }

    /// Whether a task type is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }

    /// Resolve a name to its factory
    pub fn factory(&self, name: &str) -> ContractResult<TaskFactory> {
        self.tasks
            .get(name)
            .copied()
            .ok_or_else(|| ContractError::TaskNotFound(name.to_string()))
    }

    /// Resolve `name` and hand the task to the runner
    pub fn run(&self, runner: &Runner, name: &str) -> Result<RunOutcome> {
        let factory = self.factory(name)?;
        runner.run(factory())
    }
}
