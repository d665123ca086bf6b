//! Raw caller input and its validation into domain values.
//!
//! Every parser accumulates all field failures before returning, so one
//! rejected request reports each offending field.

use crate::config::TaskServiceConfig;
use crate::identity::domain::UserId;
use crate::task::domain::{
    DueDate, FieldErrorCollector, NewTask, TaskChanges, TaskDescription, TaskField, TaskPriority,
    TaskStatus, TaskTags, TaskTitle, ValidationErrors,
};
use crate::task::ports::TaskQuery;

use super::PageRequest;

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    assigned_to: String,
    due_date: String,
    priority: Option<String>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            assigned_to: assigned_to.into(),
            due_date: due_date.into(),
            priority: None,
            tags: Vec::new(),
        }
    }

    /// Sets the priority. Defaults to medium.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every rejected field.
    pub fn validate(self) -> Result<NewTask, ValidationErrors> {
        let title = TaskTitle::new(self.title);
        let description = TaskDescription::new(self.description);
        let assigned_to = self.assigned_to.trim().parse::<UserId>();
        let due_date = DueDate::parse(&self.due_date);
        let priority = self
            .priority
            .as_deref()
            .map_or_else(|| Ok(TaskPriority::default()), TaskPriority::try_from);

        match (title, description, assigned_to, due_date, priority) {
            (Ok(valid_title), Ok(valid_description), Ok(assignee), Ok(due), Ok(level)) => {
                Ok(NewTask {
                    title: valid_title,
                    description: valid_description,
                    assigned_to: assignee,
                    due_date: due,
                    priority: level,
                    tags: TaskTags::new(self.tags),
                })
            }
            (title_result, description_result, assignee_result, due_result, priority_result) => {
                let mut errors = FieldErrorCollector::new();
                errors.check(TaskField::Title, title_result);
                errors.check(TaskField::Description, description_result);
                errors.check(TaskField::AssignedTo, assignee_result);
                errors.check(TaskField::DueDate, due_result);
                errors.check(TaskField::Priority, priority_result);
                Err(errors.into_errors())
            }
        }
    }
}

/// Partial update input. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
    assigned_to: Option<String>,
    tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Returns `true` when the payload carries an assignee, whether or not
    /// it differs from the current one.
    #[must_use]
    pub const fn carries_assignee(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// Validates the present fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every rejected field.
    pub fn validate(self) -> Result<TaskChanges, ValidationErrors> {
        let mut errors = FieldErrorCollector::new();
        let changes = TaskChanges {
            title: self
                .title
                .and_then(|raw| errors.check(TaskField::Title, TaskTitle::new(raw))),
            description: self
                .description
                .and_then(|raw| errors.check(TaskField::Description, TaskDescription::new(raw))),
            status: self.status.and_then(|raw| {
                errors.check(TaskField::Status, TaskStatus::try_from(raw.as_str()))
            }),
            priority: self.priority.and_then(|raw| {
                errors.check(TaskField::Priority, TaskPriority::try_from(raw.as_str()))
            }),
            due_date: self
                .due_date
                .and_then(|raw| errors.check(TaskField::DueDate, DueDate::parse(&raw))),
            assigned_to: self.assigned_to.and_then(|raw| {
                errors.check(TaskField::AssignedTo, raw.trim().parse::<UserId>())
            }),
            tags: self.tags.map(TaskTags::new),
        };
        errors.finish()?;
        Ok(changes)
    }
}

/// Listing input: paging plus optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksRequest {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
    priority: Option<String>,
    search: Option<String>,
}

impl ListTasksRequest {
    /// Creates a request for the first page with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a 1-based page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Requests a page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Filters by case-insensitive text in title or description.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Validates paging and filters against `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] for a page below one, a limit outside
    /// `1..=max_page_size`, or an unknown status or priority.
    pub fn validate(self, config: &TaskServiceConfig) -> Result<ListCriteria, ValidationErrors> {
        let mut errors = FieldErrorCollector::new();
        let page = self.page.unwrap_or(1);
        if page == 0 {
            errors.push(TaskField::Page, "page must be at least 1");
        }
        let limit = self
            .limit
            .unwrap_or_else(|| config.effective_default_page_size());
        if limit == 0 || limit > config.max_page_size {
            errors.push(
                TaskField::Limit,
                format!("limit must be between 1 and {}", config.max_page_size),
            );
        }
        let status = self.status.and_then(|raw| {
            errors.check(TaskField::Status, TaskStatus::try_from(raw.as_str()))
        });
        let priority = self.priority.and_then(|raw| {
            errors.check(TaskField::Priority, TaskPriority::try_from(raw.as_str()))
        });
        errors.finish()?;

        Ok(ListCriteria {
            page: PageRequest::new(page, limit),
            status,
            priority,
            search: self.search,
        })
    }
}

/// Validated listing criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCriteria {
    /// Requested page.
    pub page: PageRequest,
    /// Status filter.
    pub status: Option<TaskStatus>,
    /// Priority filter.
    pub priority: Option<TaskPriority>,
    /// Text filter.
    pub search: Option<String>,
}

impl ListCriteria {
    /// Narrows `scope` with these filters.
    #[must_use]
    pub fn narrow(&self, scope: TaskQuery) -> TaskQuery {
        let mut narrowed = scope;
        if let Some(status) = self.status {
            narrowed = narrowed.with_status(status);
        }
        if let Some(priority) = self.priority {
            narrowed = narrowed.with_priority(priority);
        }
        if let Some(search) = &self.search {
            narrowed = narrowed.with_search(search.as_str());
        }
        narrowed
    }
}
