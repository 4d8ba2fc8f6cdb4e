//! Error types for task domain validation.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task has already been completed; the recorded end time stands.
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),
}
