//! Task lifecycle orchestration: create, read, update, delete.

use crate::identity::{
    domain::{Identity, UserId},
    ports::UserDirectory,
};
use crate::task::{
    domain::{Task, TaskId, TaskView},
    policy::{TaskAction, authorize_action, can_perform},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    CreateTaskRequest, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
    support::{enforce, render_view},
};

/// Task lifecycle orchestration service.
///
/// Every operation evaluates the policy before touching storage and
/// returns tasks as [`TaskView`]s with user references resolved.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Creates a task owned by `actor`.
    ///
    /// The new task always starts pending; requests have no way to choose
    /// a status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`] for the user role,
    /// [`TaskServiceError::Validation`] for rejected fields,
    /// [`TaskServiceError::AssigneeNotFound`] when the assignee does not
    /// exist, or a storage error.
    #[instrument(
        name = "taskwarden.tasks.create",
        skip(self, actor, request),
        fields(actor_id = %actor.id(), role = %actor.role())
    )]
    pub async fn create_task(
        &self,
        actor: &Identity,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskView> {
        enforce(
            actor,
            TaskAction::Create,
            authorize_action(actor, TaskAction::Create),
        )?;
        let new_task = request.validate()?;
        self.ensure_assignee_exists(new_task.assigned_to).await?;

        let task = Task::create(new_task, actor.id(), &*self.clock);
        self.repository.insert(&task).await?;
        info!(task_id = %task.id(), assignee = %task.assigned_to(), "task created");
        Ok(render_view(&*self.directory, &task).await?)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, [`TaskServiceError::Forbidden`] when a user-role caller is
    /// neither assignee nor creator, or a storage error.
    #[instrument(
        name = "taskwarden.tasks.get",
        skip(self, actor),
        fields(actor_id = %actor.id(), role = %actor.role(), task_id = %task_id)
    )]
    pub async fn get_task(&self, actor: &Identity, task_id: TaskId) -> TaskServiceResult<TaskView> {
        let task = self.load(task_id).await?;
        enforce(
            actor,
            TaskAction::Read,
            can_perform(actor, TaskAction::Read, Some(&task)),
        )?;
        Ok(render_view(&*self.directory, &task).await?)
    }

    /// Applies a partial update.
    ///
    /// The task must exist before any permission is evaluated. A payload
    /// carrying an assignee is a reassignment and additionally requires the
    /// manager or admin role, even when the assignee is unchanged. Status
    /// changes maintain the completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Forbidden`],
    /// [`TaskServiceError::Validation`],
    /// [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::AssigneeNotFound`], or a storage error. Nothing is
    /// written when any of these is returned.
    #[instrument(
        name = "taskwarden.tasks.update",
        skip(self, actor, request),
        fields(actor_id = %actor.id(), role = %actor.role(), task_id = %task_id)
    )]
    pub async fn update_task(
        &self,
        actor: &Identity,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskView> {
        let mut task = self.load(task_id).await?;
        enforce(
            actor,
            TaskAction::Update,
            can_perform(actor, TaskAction::Update, Some(&task)),
        )?;
        if request.carries_assignee() {
            enforce(
                actor,
                TaskAction::Reassign,
                authorize_action(actor, TaskAction::Reassign),
            )?;
        }
        let changes = request.validate()?;
        if let Some(assignee) = changes.assigned_to {
            self.ensure_assignee_exists(assignee).await?;
        }

        let previous_status = task.status();
        task.apply_changes(changes, &*self.clock);
        self.repository
            .update(&task)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(missing) => TaskServiceError::TaskNotFound(missing),
                other => other.into(),
            })?;
        info!(
            from = %previous_status,
            to = %task.status(),
            "task updated"
        );
        Ok(render_view(&*self.directory, &task).await?)
    }

    /// Deletes a task. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for a missing task whatever
    /// the caller's role, [`TaskServiceError::Forbidden`] for non-admin
    /// callers naming an existing task, or a storage error.
    #[instrument(
        name = "taskwarden.tasks.delete",
        skip(self, actor),
        fields(actor_id = %actor.id(), role = %actor.role(), task_id = %task_id)
    )]
    pub async fn delete_task(&self, actor: &Identity, task_id: TaskId) -> TaskServiceResult<()> {
        self.load(task_id).await?;
        enforce(
            actor,
            TaskAction::Delete,
            authorize_action(actor, TaskAction::Delete),
        )?;
        if !self.repository.delete(task_id).await? {
            return Err(TaskServiceError::TaskNotFound(task_id));
        }
        info!("task deleted");
        Ok(())
    }

    async fn load(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    async fn ensure_assignee_exists(&self, assignee: UserId) -> TaskServiceResult<()> {
        match self.directory.find_by_id(assignee).await? {
            Some(_) => Ok(()),
            None => Err(TaskServiceError::AssigneeNotFound(assignee)),
        }
    }
}
