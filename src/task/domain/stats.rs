//! Dashboard counters over a set of tasks.

use super::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// All tasks counted.
    pub total: u64,
    /// Tasks in [`TaskStatus::Pending`].
    pub pending: u64,
    /// Tasks in [`TaskStatus::InProgress`].
    pub in_progress: u64,
    /// Tasks in [`TaskStatus::Completed`].
    pub completed: u64,
    /// Tasks in [`TaskStatus::Cancelled`].
    pub cancelled: u64,
    /// Tasks with [`TaskPriority::Urgent`].
    pub urgent: u64,
    /// Tasks with [`TaskPriority::High`].
    pub high: u64,
    /// Open tasks whose due instant is before `now`.
    pub overdue: u64,
}

impl TaskStats {
    /// Counts `tasks` as of `now`.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status() {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Cancelled => stats.cancelled += 1,
            }
            match task.priority() {
                TaskPriority::Urgent => stats.urgent += 1,
                TaskPriority::High => stats.high += 1,
                TaskPriority::Medium | TaskPriority::Low => {}
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}
