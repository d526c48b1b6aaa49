//! The task contract
//!
//! Every pipeline step implements [`Task`]: it names itself, declares
//! where it lives and what single artifact it produces, lists its
//! immediate dependencies, and provides an execution body plus an output
//! loader. The declarative part lives in [`TaskDecl`] and is validated at
//! instantiation, before any filesystem side effect.

use crate::error::{ContractError, ContractResult};
use crate::runner::TaskContext;
use crate::task::{Params, TaskPaths};

/// Factory for a task type
///
/// Dependency edges are factories rather than instances so the completion
/// checker can instantiate each dependency on demand (instantiation
/// creates the dependency's directories as a side effect).
pub type TaskFactory = fn() -> Box<dyn Task>;

/// Contract implemented by every concrete pipeline step
pub trait Task {
    /// Stable name of the task type, used for the per-invocation log file
    /// and registry lookup
    fn name(&self) -> &'static str;

    /// Declared location, parameters, and output artifact
    fn decl(&self) -> TaskDecl;

    /// Immediate dependencies, in declaration order
    ///
    /// Completion checking looks only at these; it never recurses into a
    /// dependency's own dependencies.
    fn requires(&self) -> Vec<TaskFactory> {
        Vec::new()
    }

    /// Execute the step
    ///
    /// The body reads dependency outputs and parameters through `ctx`,
    /// writes its artifact to `ctx.output_path()`, and may send any
    /// external-process output to `ctx.log_file()`.
    fn run(&self, ctx: &mut TaskContext) -> anyhow::Result<()>;

    /// Load the artifact this task produced
    ///
    /// The default reads the raw bytes at the resolved output path; tasks
    /// with structured outputs override this.
    fn load_output(&self, paths: &TaskPaths) -> anyhow::Result<Vec<u8>> {
        Ok(std::fs::read(paths.output_path())?)
    }
}

/// Declarative portion of a task contract
///
/// `subdirectory` defaults to empty and `debug` to false; each task gets
/// its own value, nothing is shared between task types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDecl {
    /// Pipeline namespace; all artifacts and logs live under it
    pub directory: String,

    /// Optional sub-namespace inside the OUTPUT directory
    pub subdirectory: String,

    /// File name of the single artifact this task produces
    pub output_name: String,

    /// Configuration values owned by the concrete task
    pub parameters: Params,

    /// When true, log redirection is skipped and output stays interactive
    pub debug: bool,
}

impl TaskDecl {
    /// Create a declaration with the two required members
    pub fn new(directory: impl Into<String>, output_name: impl Into<String>) -> Self {
        TaskDecl {
            directory: directory.into(),
            output_name: output_name.into(),
            ..TaskDecl::default()
        }
    }

    /// Set the output sub-namespace
    pub fn with_subdirectory(mut self, subdirectory: impl Into<String>) -> Self {
        self.subdirectory = subdirectory.into();
        self
    }

    /// Set the task parameters
    pub fn with_parameters(mut self, parameters: Params) -> Self {
        self.parameters = parameters;
        self
    }

    /// Keep output on the original streams instead of the log file
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check that the required members are declared
    ///
    /// Called before path resolution so an incomplete contract fails fast,
    /// without touching the filesystem.
    pub(crate) fn validate(&self, task: &str) -> ContractResult<()> {
        if self.directory.is_empty() {
            return Err(ContractError::MissingMember {
                task: task.to_string(),
                member: "directory",
            });
        }
        if self.output_name.is_empty() {
            return Err(ContractError::MissingMember {
                task: task.to_string(),
                member: "output_name",
            });
        }
        Ok(())
    }
}
