//! Error types for Retask

use std::io;
use thiserror::Error;

/// Result type alias for Retask operations
pub type Result<T> = std::result::Result<T, RetaskError>;

/// Main error type for Retask
#[derive(Error, Debug)]
pub enum RetaskError {
    /// Task-contract errors
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    /// Task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML serialization errors (parameter audit dumps)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Contract declaration and resolution errors
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Task '{task}' does not declare '{member}'")]
    MissingMember { task: String, member: &'static str },

    #[error("Task '{0}' is not defined")]
    TaskNotFound(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Task '{task}' failed")]
    TaskFailed {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Aggregate log is locked by another writer: {0}")]
    LogBusy(String),
}

/// Specialized result type for contract operations
pub type ContractResult<T> = std::result::Result<T, ContractError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
