//! Demo data for an empty deployment.
//!
//! [`seed_demo_data`] writes five users and six tasks, but only when both
//! stores are empty. A store holding any user or any task is left alone.

use crate::identity::{
    domain::{EmailAddress, Role, User, UserDomainError, UserName},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::task::{
    domain::{
        DueDate, PersistedTaskData, Task, TaskDescription, TaskDomainError, TaskId, TaskPriority,
        TaskStatus, TaskTags, TaskTitle,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A demo user failed validation.
    #[error("invalid demo user: {0}")]
    User(#[from] UserDomainError),
    /// A demo task failed validation.
    #[error("invalid demo task: {0}")]
    Task(#[from] TaskDomainError),
    /// User storage failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Task storage failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// What [`seed_demo_data`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Demo data was written.
    Seeded {
        /// Users created.
        users: u64,
        /// Tasks created.
        tasks: u64,
    },
    /// The store already held data; nothing was written.
    Skipped {
        /// Users found.
        users: u64,
        /// Tasks found.
        tasks: u64,
    },
}

struct DemoUser {
    name: &'static str,
    email: &'static str,
    role: Role,
}

const DEMO_USERS: [DemoUser; 5] = [
    DemoUser {
        name: "Admin User",
        email: "admin@example.com",
        role: Role::Admin,
    },
    DemoUser {
        name: "Manager User",
        email: "manager@example.com",
        role: Role::Manager,
    },
    DemoUser {
        name: "John Doe",
        email: "user@example.com",
        role: Role::User,
    },
    DemoUser {
        name: "Jane Smith",
        email: "jane@example.com",
        role: Role::User,
    },
    DemoUser {
        name: "Bob Johnson",
        email: "bob@example.com",
        role: Role::User,
    },
];

struct DemoTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: &'static str,
    creator: &'static str,
    due_in_days: i64,
    completed_days_ago: Option<i64>,
    tags: [&'static str; 2],
}

const DEMO_TASKS: [DemoTask; 6] = [
    DemoTask {
        title: "Complete project documentation",
        description: "Write comprehensive documentation for the task management system \
                      including API documentation and user guides.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        assignee: "user@example.com",
        creator: "admin@example.com",
        due_in_days: 7,
        completed_days_ago: None,
        tags: ["documentation", "project"],
    },
    DemoTask {
        title: "Review code quality",
        description: "Conduct a thorough code review of the frontend components and suggest \
                      improvements.",
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        assignee: "jane@example.com",
        creator: "manager@example.com",
        due_in_days: 3,
        completed_days_ago: None,
        tags: ["code-review", "quality"],
    },
    DemoTask {
        title: "Fix authentication bug",
        description: "Investigate and fix the token expiration issue reported by users.",
        status: TaskStatus::Pending,
        priority: TaskPriority::Urgent,
        assignee: "bob@example.com",
        creator: "admin@example.com",
        due_in_days: 1,
        completed_days_ago: None,
        tags: ["bug-fix", "authentication"],
    },
    DemoTask {
        title: "Update user interface",
        description: "Improve the user interface based on user feedback and make it more \
                      responsive.",
        status: TaskStatus::Completed,
        priority: TaskPriority::Medium,
        assignee: "jane@example.com",
        creator: "manager@example.com",
        due_in_days: -2,
        completed_days_ago: Some(1),
        tags: ["ui", "improvement"],
    },
    DemoTask {
        title: "Database optimization",
        description: "Optimize database queries and add proper indexing for better performance.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        assignee: "user@example.com",
        creator: "admin@example.com",
        due_in_days: 5,
        completed_days_ago: None,
        tags: ["database", "optimization"],
    },
    DemoTask {
        title: "Write unit tests",
        description: "Create comprehensive unit tests for all API endpoints and frontend \
                      components.",
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        assignee: "bob@example.com",
        creator: "manager@example.com",
        due_in_days: 10,
        completed_days_ago: None,
        tags: ["testing", "unit-tests"],
    },
];

/// Populates empty stores with demo users and tasks.
///
/// # Errors
///
/// Returns [`SeedError`] when a store cannot be read or written.
pub async fn seed_demo_data<U, R, C>(
    directory: &U,
    repository: &R,
    clock: &C,
) -> Result<SeedOutcome, SeedError>
where
    U: UserDirectory + ?Sized,
    R: TaskRepository + ?Sized,
    C: Clock,
{
    let existing_users = directory.count().await?;
    let existing_tasks = repository.count(&TaskQuery::all()).await?;
    if existing_users > 0 || existing_tasks > 0 {
        info!(
            users = existing_users,
            tasks = existing_tasks,
            "store already holds data, skipping seed"
        );
        return Ok(SeedOutcome::Skipped {
            users: existing_users,
            tasks: existing_tasks,
        });
    }

    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for demo in &DEMO_USERS {
        let user = User::new(
            UserName::new(demo.name)?,
            EmailAddress::new(demo.email)?,
            demo.role,
            clock,
        );
        directory.store(&user).await?;
        users.push(user);
    }

    let now = clock.utc();
    let mut tasks_created = 0_u64;
    for demo in &DEMO_TASKS {
        let task = demo_task(demo, &users, now)?;
        repository.insert(&task).await?;
        tasks_created += 1;
    }

    let users_created = u64::try_from(users.len()).unwrap_or(u64::MAX);
    info!(
        users = users_created,
        tasks = tasks_created,
        "seeded demo data"
    );
    Ok(SeedOutcome::Seeded {
        users: users_created,
        tasks: tasks_created,
    })
}

fn demo_task(demo: &DemoTask, users: &[User], now: DateTime<Utc>) -> Result<Task, SeedError> {
    let assigned_to = user_by_email(users, demo.assignee)?;
    let created_by = user_by_email(users, demo.creator)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(demo.title)?,
        description: TaskDescription::new(demo.description)?,
        status: demo.status,
        priority: demo.priority,
        assigned_to: assigned_to.id(),
        created_by: created_by.id(),
        due_date: DueDate::from_datetime(now + Duration::days(demo.due_in_days)),
        completed_at: demo
            .completed_days_ago
            .map(|days| now - Duration::days(days)),
        tags: TaskTags::new(demo.tags),
        created_at: now,
        updated_at: now,
    }))
}

fn user_by_email<'a>(users: &'a [User], email: &str) -> Result<&'a User, SeedError> {
    users
        .iter()
        .find(|user| user.email().as_str() == email)
        .ok_or_else(|| SeedError::User(UserDomainError::InvalidEmail(email.to_owned())))
}
