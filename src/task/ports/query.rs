//! Storage-neutral task query description.
//!
//! Services build a [`TaskQuery`] with visibility scoping already applied;
//! adapters translate it into their native filter language. The in-memory
//! adapter evaluates [`TaskQuery::matches`] directly.

use crate::identity::domain::UserId;
use crate::task::domain::{DueWindow, Task, TaskPriority, TaskStatus};
use std::cmp::Ordering;

/// Conjunctive task filter. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    assigned_to: Option<UserId>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    search: Option<String>,
    due_within: Option<DueWindow>,
}

impl TaskQuery {
    /// Creates a query matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to tasks assigned to `user`.
    #[must_use]
    pub const fn assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Restricts to tasks with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks with `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to tasks whose title or description contains `needle`,
    /// ignoring case. The needle is matched as given, surrounding
    /// whitespace included; only an empty needle is ignored.
    #[must_use]
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        let raw = needle.into();
        self.search = (!raw.is_empty()).then_some(raw);
        self
    }

    /// Restricts to tasks due inside `window`.
    #[must_use]
    pub const fn due_within(mut self, window: DueWindow) -> Self {
        self.due_within = Some(window);
        self
    }

    /// Returns the assignee restriction.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the status restriction.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority restriction.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the search needle.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the due-date window.
    #[must_use]
    pub const fn due_window(&self) -> Option<DueWindow> {
        self.due_within
    }

    /// Evaluates the query against one task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.assigned_to.is_none_or(|user| task.assigned_to() == user)
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .due_within
                .is_none_or(|window| window.contains(task.due_date()))
            && self
                .search
                .as_deref()
                .is_none_or(|needle| text_matches(task, needle))
    }
}

fn text_matches(task: &Task, needle: &str) -> bool {
    let lowered = needle.to_lowercase();
    task.title().as_str().to_lowercase().contains(&lowered)
        || task.description().as_str().to_lowercase().contains(&lowered)
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    /// Newest first.
    #[default]
    CreatedAtDesc,
    /// Soonest due first.
    DueDateAsc,
}

impl TaskSort {
    /// Compares two tasks under this ordering, breaking ties by identifier
    /// so pagination is stable.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let primary = match self {
            Self::CreatedAtDesc => right.created_at().cmp(&left.created_at()),
            Self::DueDateAsc => left.due_date().cmp(&right.due_date()),
        };
        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

/// Offset/limit slice of an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Creates a window skipping `offset` rows and returning at most `limit`.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Returns the number of skipped rows.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of rows.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }
}
