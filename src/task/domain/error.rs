//! Error types for task domain validation and parsing.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the character limit.
    #[error("title has {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },

    /// The description is empty after trimming.
    #[error("description must not be empty")]
    EmptyDescription,

    /// The description exceeds the character limit.
    #[error("description has {actual} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },

    /// The due date is neither an RFC 3339 timestamp nor a `YYYY-MM-DD` date.
    #[error("invalid due date '{0}', expected an ISO 8601 date or timestamp")]
    InvalidDueDate(String),

    /// The calendar month is out of range or not representable.
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidCalendarMonth {
        /// Requested year.
        year: i32,
        /// Requested month, 1-based.
        month: u32,
    },
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Lifecycle status.
    Status,
    /// Priority.
    Priority,
    /// Assignee reference.
    AssignedTo,
    /// Due date.
    DueDate,
    /// Free-text tags.
    Tags,
    /// Requested page number.
    Page,
    /// Requested page size.
    Limit,
    /// Calendar year or month.
    Month,
}

impl TaskField {
    /// Returns the field name as presented to callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::AssignedTo => "assigned_to",
            Self::DueDate => "due_date",
            Self::Tags => "tags",
            Self::Page => "page",
            Self::Limit => "limit",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {reason}")]
pub struct FieldError {
    /// The offending field.
    pub field: TaskField,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    /// Creates a field error from any displayable cause.
    #[must_use]
    pub fn new(field: TaskField, reason: impl fmt::Display) -> Self {
        Self {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Every field-level violation found in one request.
///
/// Validation never stops at the first failure, so callers can report all
/// problems at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", format_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Creates a report holding one field error.
    #[must_use]
    pub fn single(field: TaskField, reason: impl fmt::Display) -> Self {
        Self(vec![FieldError::new(field, reason)])
    }

    /// Returns the individual field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns `true` when `field` is among the rejected fields.
    #[must_use]
    pub fn contains(&self, field: TaskField) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

/// Accumulates field errors while a request is parsed.
#[derive(Debug, Default)]
pub struct FieldErrorCollector {
    errors: Vec<FieldError>,
}

impl FieldErrorCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of a failed parse and returns the success value.
    pub fn check<T, E: fmt::Display>(
        &mut self,
        field: TaskField,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(FieldError::new(field, err));
                None
            }
        }
    }

    /// Records an error directly.
    pub fn push(&mut self, field: TaskField, reason: impl fmt::Display) {
        self.errors.push(FieldError::new(field, reason));
    }

    /// Returns everything recorded so far.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.errors)
    }

    /// Finishes collection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when at least one error was recorded.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
