//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{
        PageWindow, TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        TaskSort,
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Applies an offset/limit window to an ordered result.
fn slice_window(tasks: Vec<Task>, window: Option<PageWindow>) -> Vec<Task> {
    let Some(page) = window else {
        return tasks;
    };
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    tasks.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let stored = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        Ok(tasks.remove(&id).is_some())
    }

    async fn find(
        &self,
        query: &TaskQuery,
        sort: TaskSort,
        window: Option<PageWindow>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|task| query.matches(task))
            .cloned()
            .collect();
        matching.sort_by(|left, right| sort.compare(left, right));
        Ok(slice_window(matching, window))
    }

    async fn count(&self, query: &TaskQuery) -> TaskRepositoryResult<u64> {
        let tasks = self.state.read().map_err(lock_error)?;
        let total = tasks.values().filter(|task| query.matches(task)).count();
        u64::try_from(total).map_err(TaskRepositoryError::persistence)
    }
}
