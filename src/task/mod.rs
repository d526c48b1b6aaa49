//! Task contract and derived data
//!
//! This module defines what a pipeline step declares (the contract and
//! its parameters) and what the runner derives from the declaration
//! (resolved paths, runtime instances).

pub mod contract;
pub mod instance;
pub mod params;
pub mod paths;

// Re-export main types
pub use contract::*;
pub use instance::*;
pub use params::*;
pub use paths::*;
