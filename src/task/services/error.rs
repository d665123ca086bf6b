//! Service-level errors for task operations.

use crate::identity::{domain::UserId, ports::UserDirectoryError};
use crate::task::{
    domain::{TaskId, ValidationErrors},
    policy::AccessDenied,
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Errors returned by task services.
///
/// Validation and referential errors are always raised before any write.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The policy refused the action.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// One or more input fields were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The requested assignee does not exist.
    #[error("assigned user not found: {0}")]
    AssigneeNotFound(UserId),

    /// Task storage failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
