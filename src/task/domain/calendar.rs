//! Calendar month windows for due-date queries.

use super::{DueDate, TaskDomainError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open due-date window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DueWindow {
    /// Creates a window; `end` is exclusive.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns the first instant inside the window.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the first instant after the window.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` when `due` falls inside the window.
    #[must_use]
    pub fn contains(&self, due: DueDate) -> bool {
        let instant = due.as_datetime();
        self.start <= instant && instant < self.end
    }
}

/// A validated calendar month in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    window: DueWindow,
}

impl CalendarMonth {
    /// Creates a calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCalendarMonth`] when `month` is not
    /// in `1..=12` or the month (or the one after it) cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self, TaskDomainError> {
        let window = month_window(year, month)
            .ok_or(TaskDomainError::InvalidCalendarMonth { year, month })?;
        Ok(Self {
            year,
            month,
            window,
        })
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the 1-based month.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the window from the first instant of this month up to the
    /// first instant of the next.
    #[must_use]
    pub const fn window(self) -> DueWindow {
        self.window
    }
}

fn month_window(year: i32, month: u32) -> Option<DueWindow> {
    let start = first_instant(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let end = first_instant(next_year, next_month)?;
    Some(DueWindow::new(start, end))
}

fn first_instant(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
