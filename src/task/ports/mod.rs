//! Port contracts for task persistence and querying.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod query;
pub mod repository;

pub use query::{PageWindow, TaskQuery, TaskSort};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
