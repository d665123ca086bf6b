//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::config::TaskServiceConfig;
use taskwarden::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, Identity, Role, User, UserId, UserName},
    ports::UserDirectory,
};
use taskwarden::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        DueDate, PersistedTaskData, Task, TaskDescription, TaskId, TaskPriority, TaskStatus,
        TaskTags, TaskTitle,
    },
    ports::TaskRepository,
    services::{TaskLifecycleService, TaskQueryService},
};

/// Lifecycle service wired to in-memory adapters.
pub type Lifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Query service wired to in-memory adapters.
pub type Queries = TaskQueryService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Services, stores, and one caller per role.
pub struct TestContext {
    /// Task store shared by both services.
    pub repository: Arc<InMemoryTaskRepository>,
    /// User store shared by both services.
    pub directory: Arc<InMemoryUserDirectory>,
    /// Write-side service.
    pub lifecycle: Lifecycle,
    /// Read-side service.
    pub queries: Queries,
    /// Admin caller.
    pub admin: Identity,
    /// Manager caller.
    pub manager: Identity,
    /// First user-role caller.
    pub alice: Identity,
    /// Second user-role caller.
    pub bob: Identity,
}

impl TestContext {
    /// Inserts a task directly into the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the task.
    pub async fn insert(&self, task: &Task) -> Result<(), eyre::Report> {
        self.repository.insert(task).await?;
        Ok(())
    }
}

/// Registers a user and returns the matching caller identity.
///
/// # Errors
///
/// Returns an error if the user is invalid or already registered.
pub async fn register(
    directory: &InMemoryUserDirectory,
    name: &str,
    email: &str,
    role: Role,
) -> Result<Identity, eyre::Report> {
    let user = User::new(
        UserName::new(name)?,
        EmailAddress::new(email)?,
        role,
        &DefaultClock,
    );
    directory.store(&user).await?;
    Ok(Identity::from(&user))
}

/// Builds a context with empty stores and four registered callers.
///
/// # Errors
///
/// Returns an error if user registration fails.
pub async fn build_context(config: TaskServiceConfig) -> Result<TestContext, eyre::Report> {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let clock = Arc::new(DefaultClock);
    let admin = register(&directory, "Admin User", "admin@example.com", Role::Admin).await?;
    let manager = register(
        &directory,
        "Manager User",
        "manager@example.com",
        Role::Manager,
    )
    .await?;
    let alice = register(&directory, "Alice", "alice@example.com", Role::User).await?;
    let bob = register(&directory, "Bob", "bob@example.com", Role::User).await?;

    Ok(TestContext {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ),
        queries: TaskQueryService::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
            clock,
            config,
        ),
        repository,
        directory,
        admin,
        manager,
        alice,
        bob,
    })
}

/// Provides a context with the default service configuration.
#[fixture]
pub async fn context() -> TestContext {
    build_context(TaskServiceConfig::default())
        .await
        .expect("test context should build")
}

/// Describes a stored task for [`stored_task`].
#[derive(Debug, Clone)]
pub struct TaskFixture {
    /// Assignee.
    pub assigned_to: UserId,
    /// Creator.
    pub created_by: UserId,
    /// Title.
    pub title: &'static str,
    /// Status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due instant.
    pub due: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl TaskFixture {
    /// Starts a pending, medium-priority fixture due in a week.
    #[must_use]
    pub fn new(assigned_to: UserId, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            assigned_to,
            created_by,
            title: "Review pull request",
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due: now + Duration::days(7),
            created_at: now,
        }
    }
}

/// Builds a task as if loaded from storage.
///
/// # Panics
///
/// Panics if the fixture's title is invalid.
#[must_use]
pub fn stored_task(template: &TaskFixture) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(template.title).expect("valid title"),
        description: TaskDescription::new("Seeded by the integration suite")
            .expect("valid description"),
        status: template.status,
        priority: template.priority,
        assigned_to: template.assigned_to,
        created_by: template.created_by,
        due_date: DueDate::from_datetime(template.due),
        completed_at: (template.status == TaskStatus::Completed).then_some(template.created_at),
        tags: TaskTags::default(),
        created_at: template.created_at,
        updated_at: template.created_at,
    })
}
