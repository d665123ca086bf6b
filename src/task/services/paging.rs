//! Page arithmetic for task listings.

use crate::task::domain::TaskView;
use crate::task::ports::PageWindow;
use serde::Serialize;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a page request. Callers validate `page >= 1` and `limit >= 1`.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the storage window for this page.
    #[must_use]
    pub fn window(self) -> PageWindow {
        let skipped_pages = u64::from(self.page.saturating_sub(1));
        PageWindow::new(skipped_pages * u64::from(self.limit), u64::from(self.limit))
    }

    /// Computes pagination metadata for a result of `total_tasks` rows.
    #[must_use]
    pub fn pagination(self, total_tasks: u64) -> Pagination {
        let total_pages = total_tasks.div_ceil(u64::from(self.limit.max(1)));
        Pagination {
            current_page: self.page,
            total_pages,
            total_tasks,
            has_next: u64::from(self.page) < total_pages,
            has_prev: self.page > 1,
        }
    }
}

/// Pagination metadata accompanying a page of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// The returned page, 1-based.
    pub current_page: u32,
    /// Number of pages at the requested size.
    pub total_pages: u64,
    /// Number of visible tasks matching the filters.
    pub total_tasks: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

/// One page of task views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPage {
    /// Views on this page, newest first.
    pub tasks: Vec<TaskView>,
    /// Paging metadata.
    pub pagination: Pagination,
}
