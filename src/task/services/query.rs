//! Scoped task listings, the calendar view, and dashboard statistics.

use crate::config::TaskServiceConfig;
use crate::identity::{domain::Identity, ports::UserDirectory};
use crate::task::{
    domain::{CalendarMonth, TaskField, TaskStats, TaskView, ValidationErrors},
    policy::{TaskAction, authorize_action, visibility_scope},
    ports::{TaskRepository, TaskSort},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    ListTasksRequest, TaskPage, TaskServiceResult,
    support::{enforce, render_views},
};

/// Read-side task service.
///
/// All results are bounded by the caller's visibility: users see only tasks
/// assigned to them; managers and admins see every task.
#[derive(Clone)]
pub struct TaskQueryService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<U>,
    clock: Arc<C>,
    config: TaskServiceConfig,
}

impl<R, U, C> TaskQueryService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        directory: Arc<U>,
        clock: Arc<C>,
        config: TaskServiceConfig,
    ) -> Self {
        Self {
            repository,
            directory,
            clock,
            config,
        }
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskServiceConfig {
        &self.config
    }

    /// Lists visible tasks newest first, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for bad paging or
    /// filter values, or a storage error.
    #[instrument(
        name = "taskwarden.tasks.list",
        skip(self, actor, request),
        fields(actor_id = %actor.id(), role = %actor.role())
    )]
    pub async fn list_tasks(
        &self,
        actor: &Identity,
        request: ListTasksRequest,
    ) -> TaskServiceResult<TaskPage> {
        enforce(
            actor,
            TaskAction::List,
            authorize_action(actor, TaskAction::List),
        )?;
        let criteria = request.validate(&self.config)?;
        let query = criteria.narrow(visibility_scope(actor));

        let total = self.repository.count(&query).await?;
        let tasks = self
            .repository
            .find(&query, TaskSort::CreatedAtDesc, Some(criteria.page.window()))
            .await?;
        debug!(total, returned = tasks.len(), page = criteria.page.page(), "listed tasks");

        Ok(TaskPage {
            tasks: render_views(&*self.directory, &tasks).await?,
            pagination: criteria.page.pagination(total),
        })
    }

    /// Lists visible tasks due within one calendar month, soonest first.
    ///
    /// The window runs from the first instant of the month up to, but not
    /// including, the first instant of the next month.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a month outside
    /// `1..=12`, or a storage error.
    #[instrument(
        name = "taskwarden.tasks.calendar",
        skip(self, actor),
        fields(actor_id = %actor.id(), role = %actor.role())
    )]
    pub async fn list_tasks_in_range(
        &self,
        actor: &Identity,
        year: i32,
        month: u32,
    ) -> TaskServiceResult<Vec<TaskView>> {
        enforce(
            actor,
            TaskAction::List,
            authorize_action(actor, TaskAction::List),
        )?;
        let calendar_month = CalendarMonth::new(year, month)
            .map_err(|err| ValidationErrors::single(TaskField::Month, err))?;
        let query = visibility_scope(actor).due_within(calendar_month.window());

        let tasks = self
            .repository
            .find(&query, TaskSort::DueDateAsc, None)
            .await?;
        Ok(render_views(&*self.directory, &tasks).await?)
    }

    /// Summarizes the tasks visible to `actor`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(
        name = "taskwarden.tasks.stats",
        skip(self, actor),
        fields(actor_id = %actor.id(), role = %actor.role())
    )]
    pub async fn task_stats(&self, actor: &Identity) -> TaskServiceResult<TaskStats> {
        enforce(
            actor,
            TaskAction::List,
            authorize_action(actor, TaskAction::List),
        )?;
        let tasks = self
            .repository
            .find(&visibility_scope(actor), TaskSort::CreatedAtDesc, None)
            .await?;
        Ok(TaskStats::from_tasks(&tasks, self.clock.utc()))
    }
}
