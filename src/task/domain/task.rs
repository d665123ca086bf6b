//! Task aggregate root and its lifecycle rules.

use super::{DueDate, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTags, TaskTitle};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Task description.
    pub description: TaskDescription,
    /// Assignee.
    pub assigned_to: UserId,
    /// Due instant.
    pub due_date: DueDate,
    /// Priority.
    pub priority: TaskPriority,
    /// Tags.
    pub tags: TaskTags,
}

/// Validated partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<TaskDescription>,
    /// Target status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement due instant.
    pub due_date: Option<DueDate>,
    /// New assignee.
    pub assigned_to: Option<UserId>,
    /// Replacement tag set.
    pub tags: Option<TaskTags>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: UserId,
    created_by: UserId,
    due_date: DueDate,
    completed_at: Option<DateTime<Utc>>,
    tags: TaskTags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee.
    pub assigned_to: UserId,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted due instant.
    pub due_date: DueDate,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted tags.
    pub tags: TaskTags,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `created_by`.
    ///
    /// New tasks always start as [`TaskStatus::Pending`].
    #[must_use]
    pub fn create(new_task: NewTask, created_by: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: new_task.title,
            description: new_task.description,
            status: TaskStatus::Pending,
            priority: new_task.priority,
            assigned_to: new_task.assigned_to,
            created_by,
            due_date: new_task.due_date,
            completed_at: None,
            tags: new_task.tags,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            due_date: data.due_date,
            completed_at: data.completed_at,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the creator. Fixed at creation.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the due instant.
    #[must_use]
    pub const fn due_date(&self) -> DueDate {
        self.due_date
    }

    /// Returns when the task most recently entered
    /// [`TaskStatus::Completed`], while it remains completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TaskTags {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` is the assignee or the creator.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.assigned_to == user || self.created_by == user
    }

    /// Returns `true` when the task is still open and its due instant has
    /// passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_closed() && self.due_date.as_datetime() < now
    }

    /// Moves the task to `status`, maintaining `completed_at`.
    ///
    /// Entering [`TaskStatus::Completed`] stamps the completion time; leaving
    /// it clears the stamp. Re-applying the current status changes nothing.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let now = clock.utc();
        self.transition_status(status, now);
        self.updated_at = now;
    }

    /// Applies a validated partial update.
    ///
    /// Fields absent from `changes` are left as they are; present fields
    /// replace the stored value. Permission checks are the caller's job.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let now = clock.utc();
        let TaskChanges {
            title,
            description,
            status,
            priority,
            due_date,
            assigned_to,
            tags,
        } = changes;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.transition_status(value, now);
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        self.updated_at = now;
    }

    fn transition_status(&mut self, target: TaskStatus, now: DateTime<Utc>) {
        if target == self.status {
            return;
        }
        if target == TaskStatus::Completed {
            self.completed_at = Some(now);
        } else if self.status == TaskStatus::Completed {
            self.completed_at = None;
        }
        self.status = target;
    }
}
