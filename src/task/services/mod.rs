//! Application services for task tracking.
//!
//! [`TaskLifecycleService`] owns the write path and single-task reads;
//! [`TaskQueryService`] owns scoped listings, the calendar view, and
//! dashboard stats. Both take the caller's identity explicitly on every
//! call.

mod error;
mod lifecycle;
mod paging;
mod query;
mod requests;
mod support;

pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::TaskLifecycleService;
pub use paging::{PageRequest, Pagination, TaskPage};
pub use query::TaskQueryService;
pub use requests::{CreateTaskRequest, ListCriteria, ListTasksRequest, UpdateTaskRequest};
