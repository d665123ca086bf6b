//! Operations subject to authorization.

use serde::Serialize;
use std::fmt;

/// An operation a caller may attempt on tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// List visible tasks.
    List,
    /// Create a task.
    Create,
    /// Read one task.
    Read,
    /// Update non-assignment fields of one task.
    Update,
    /// Change the assignee of a task.
    Reassign,
    /// Permanently remove a task.
    Delete,
}

impl TaskAction {
    /// Returns the action name used in denial messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Reassign => "reassign",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` for actions that target one existing task and so pass
    /// through the task-level gate.
    #[must_use]
    pub const fn targets_task(self) -> bool {
        matches!(self, Self::Read | Self::Update)
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
