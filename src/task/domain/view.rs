//! Read model returned to callers: a task with its user references
//! resolved to display form.

use super::{Task, TaskId, TaskPriority, TaskStatus};
use crate::identity::domain::{UserId, UserSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A user reference as rendered in a task view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserRef {
    /// The referenced user exists.
    Known(UserSummary),
    /// The referenced user no longer exists.
    Unknown {
        /// Dangling user identifier.
        id: UserId,
    },
}

impl UserRef {
    /// Returns the referenced user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        match self {
            Self::Known(summary) => summary.id,
            Self::Unknown { id } => *id,
        }
    }

    /// Returns the display name when the user is known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Known(summary) => Some(&summary.name),
            Self::Unknown { .. } => None,
        }
    }
}

/// A task with resolved assignee and creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Assignee in display form.
    pub assigned_to: UserRef,
    /// Creator in display form.
    pub created_by: UserRef,
    /// Due instant.
    pub due_date: DateTime<Utc>,
    /// Completion timestamp while completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Sorted tags.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    /// Builds a view from a task and its resolved references.
    #[must_use]
    pub fn new(task: &Task, assigned_to: UserRef, created_by: UserRef) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status(),
            priority: task.priority(),
            assigned_to,
            created_by,
            due_date: task.due_date().as_datetime(),
            completed_at: task.completed_at(),
            tags: task.tags().to_vec(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
