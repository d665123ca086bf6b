//! Domain model for task tracking.
//!
//! Tasks carry validated fields and enforce their own lifecycle invariants
//! (`completed_at` follows `status`, `created_by` never changes) while
//! permission decisions stay in [`crate::task::policy`].

mod calendar;
mod error;
mod fields;
mod ids;
mod stats;
mod status;
mod task;
mod view;

pub use calendar::{CalendarMonth, DueWindow};
pub use error::{
    FieldError, FieldErrorCollector, ParseTaskPriorityError, ParseTaskStatusError,
    TaskDomainError, TaskField, ValidationErrors,
};
pub use fields::{DueDate, TaskDescription, TaskTags, TaskTitle};
pub use ids::TaskId;
pub use stats::TaskStats;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
pub use view::{TaskView, UserRef};
