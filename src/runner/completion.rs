//! Completion checking
//!
//! A task is complete iff a file exists at its resolved output path.
//! No other signal participates: timestamps, hashes, and parameter
//! changes are all invisible, so re-running with different parameters
//! against an existing artifact is indistinguishable from "already
//! complete". That is the memoization policy, not an accident.
//!
//! Dependency checking is immediate-only: it instantiates each task
//! listed in `requires` and tests its artifact, but never recurses into
//! the dependency's own dependencies. A direct dependency that is
//! stale-but-present counts as complete. This keeps the check at
//! O(direct edges).

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::runner::LogSink;
use crate::task::TaskInstance;

/// Whether the task's output artifact exists; no side effects
pub fn is_complete(task: &TaskInstance) -> bool {
    task.paths().output_path().exists()
}

/// Result of checking a task's immediate dependencies
#[derive(Debug)]
pub struct DependencyReport {
    /// Instantiated immediate dependencies, in declaration order
    pub dependencies: Vec<TaskInstance>,

    /// Names of dependencies whose artifact is missing
    pub missing: Vec<String>,
}

impl DependencyReport {
    /// True iff every immediate dependency has produced its artifact
    pub fn all_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Instantiate each immediate dependency and test its artifact
///
/// Instantiation creates the dependency's directories as a side effect.
/// One status line per dependency is narrated into the sink, or a single
/// NONE line when `requires` is empty.
pub fn check_dependencies(
    task: &TaskInstance,
    root: &Path,
    sink: &mut LogSink,
) -> Result<DependencyReport> {
    let factories = task.requires();
    let mut dependencies = Vec::with_capacity(factories.len());
    let mut missing = Vec::new();

    let _ = writeln!(sink, "This task depends on:");
    if factories.is_empty() {
        let _ = writeln!(sink, "\tNONE");
    } else {
        for factory in factories {
            let dependency = TaskInstance::new(factory(), root)?;
            let complete = is_complete(&dependency);
            let status = if complete { "COMPLETE" } else { "INCOMPLETE" };
            let _ = writeln!(sink, "\t{} {}", dependency.name(), status);
            if !complete {
                missing.push(dependency.name().to_string());
            }
            dependencies.push(dependency);
        }
    }

    Ok(DependencyReport {
        dependencies,
        missing,
    })
}
