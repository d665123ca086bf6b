//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        DueDate, PersistedTaskData, Task, TaskDescription, TaskId, TaskPriority, TaskStatus,
        TaskTags, TaskTitle,
    },
    ports::{
        PageWindow, TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        TaskSort,
    },
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn find(
        &self,
        query: &TaskQuery,
        sort: TaskSort,
        window: Option<PageWindow>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let lookup_query = query.clone();
        self.run_blocking(move |connection| {
            let filtered = filtered_tasks(&lookup_query).select(TaskRow::as_select());
            let ordered = match sort {
                TaskSort::CreatedAtDesc => {
                    filtered.order((tasks::created_at.desc(), tasks::id.asc()))
                }
                TaskSort::DueDateAsc => filtered.order((tasks::due_date.asc(), tasks::id.asc())),
            };
            let statement = match window {
                Some(page) => {
                    let offset =
                        i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
                    let limit =
                        i64::try_from(page.limit()).map_err(TaskRepositoryError::persistence)?;
                    ordered.offset(offset).limit(limit)
                }
                None => ordered,
            };
            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, query: &TaskQuery) -> TaskRepositoryResult<u64> {
        let lookup_query = query.clone();
        self.run_blocking(move |connection| {
            let total = filtered_tasks(&lookup_query)
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Translates a [`TaskQuery`] into a boxed Diesel filter.
fn filtered_tasks(query: &TaskQuery) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table.into_boxed();
    if let Some(user) = query.assignee() {
        statement = statement.filter(tasks::assigned_to.eq(user.into_inner()));
    }
    if let Some(status) = query.status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = query.priority() {
        statement = statement.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(needle) = query.search() {
        let pattern = like_pattern(needle);
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }
    if let Some(window) = query.due_window() {
        statement = statement
            .filter(tasks::due_date.ge(window.start()))
            .filter(tasks::due_date.lt(window.end()));
    }
    statement
}

/// Builds an `ILIKE` pattern matching `needle` literally anywhere.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().into_inner(),
        created_by: task.created_by().into_inner(),
        due_date: task.due_date().as_datetime(),
        completed_at: task.completed_at(),
        tags,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().into_inner(),
        due_date: task.due_date().as_datetime(),
        completed_at: task.completed_at(),
        tags,
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description: persisted_description,
        status: persisted_status,
        priority: persisted_priority,
        assigned_to,
        created_by,
        due_date,
        completed_at,
        tags: persisted_tags,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let description =
        TaskDescription::new(persisted_description).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let tags = serde_json::from_value::<TaskTags>(persisted_tags)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        assigned_to: UserId::from_uuid(assigned_to),
        created_by: UserId::from_uuid(created_by),
        due_date: DueDate::from_datetime(due_date),
        completed_at,
        tags,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
