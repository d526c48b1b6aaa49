//! Retask - an incremental, resumable task runner
//!
//! Retask runs file-based computational pipelines one step at a time.
//! Each task declares its dependencies, its parameters, and the single
//! output artifact it produces; an invocation is skipped whenever that
//! artifact already exists on disk. It targets experiment workflows
//! where steps are expensive (model training, numeric computation) and
//! must be resumable after partial failure.

// Public modules
pub mod error;
pub mod lock;
pub mod registry;
pub mod runner;
pub mod task;

// Re-export commonly used types
pub use error::{Result, RetaskError};
pub use registry::Registry;
pub use runner::{RunOutcome, Runner, TaskContext};
pub use task::{Params, Task, TaskDecl, TaskFactory, TaskInstance, TaskPaths};

/// Current version of Retask
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
