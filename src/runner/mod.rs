//! Task execution engine
//!
//! This module decides whether an invocation skips, aborts, or executes,
//! and brackets every decision in the per-directory log.

pub mod capture;
pub mod completion;
pub mod context;
pub mod run;

// Re-export main types
pub use capture::*;
pub use completion::*;
pub use context::*;
pub use run::*;
