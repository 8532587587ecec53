//! Page-bounded views over the sorted rows.
//!
//! Pages are 1-indexed. For any row count the invariant
//! `1 <= current_page <= total_pages` holds, with
//! `total_pages = max(1, ceil(rows / page_size))`.

use crate::model::GridError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

// ===== PageSize =====

/// Rows per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Rows per page when nothing else is configured.
    pub const DEFAULT: usize = 10;

    /// Smart constructor: rejects zero.
    pub fn new(size: usize) -> Result<Self, GridError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(GridError::InvalidPageSize(size))
    }

    /// Raw value.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(Self::DEFAULT - 1))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = GridError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

// ===== Derivation =====

/// Number of pages needed for `total_rows`. At least 1, even with no rows.
pub fn total_pages(total_rows: usize, page_size: PageSize) -> usize {
    total_rows.div_ceil(page_size.get()).max(1)
}

/// One page of a row sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Rows on this page.
    pub slice: &'a [T],
    /// The page actually shown, after clamping.
    pub current_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
}

/// Slice out page `current_page` of `rows`.
///
/// A page outside `[1, total_pages]` is clamped into range before slicing;
/// the clamped page is reported in [`Page::current_page`].
pub fn paginate<T>(rows: &[T], current_page: usize, page_size: PageSize) -> Page<'_, T> {
    let total = total_pages(rows.len(), page_size);
    let current = current_page.clamp(1, total);
    let start = ((current - 1) * page_size.get()).min(rows.len());
    let end = start.saturating_add(page_size.get()).min(rows.len());

    Page {
        slice: &rows[start..end],
        current_page: current,
        total_pages: total,
    }
}

/// 1-based, inclusive row positions shown on a page ("showing 11-20 of 45").
///
/// Both bounds are 0 when there are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    /// Position of the first row on the page.
    pub first: usize,
    /// Position of the last row on the page.
    pub last: usize,
    /// Total number of rows.
    pub total: usize,
}

impl PageBounds {
    /// Bounds of `current_page` for `total_rows`.
    pub fn compute(total_rows: usize, current_page: usize, page_size: PageSize) -> Self {
        if total_rows == 0 {
            return Self {
                first: 0,
                last: 0,
                total: 0,
            };
        }
        let current = current_page.clamp(1, total_pages(total_rows, page_size));
        let first = (current - 1) * page_size.get() + 1;
        let last = (current * page_size.get()).min(total_rows);
        Self {
            first,
            last,
            total: total_rows,
        }
    }
}

// ===== Page reset policy =====

/// What happens to the current page when the row count changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageResetPolicy {
    /// Go back to page 1.
    #[default]
    ResetToFirst,
    /// Keep the page, clamped into the new range.
    Clamp,
}

// ===== Navigation =====

/// Current page plus the fixed page size of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: PageSize,
}

impl Pagination {
    /// Start on page 1.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    /// The current page (1-based).
    pub fn current(&self) -> usize {
        self.current
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Move to `page`, clamped to `[1, total_pages]`. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        let target = page.clamp(1, total_pages.max(1));
        let changed = target != self.current;
        self.current = target;
        changed
    }

    /// Advance one page, stopping at the last. Returns whether the page changed.
    pub fn next(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current.saturating_add(1), total_pages)
    }

    /// Go back one page, stopping at the first. Returns whether the page changed.
    pub fn prev(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current.saturating_sub(1), total_pages)
    }

    /// Jump to page 1. Returns whether the page changed.
    pub fn first(&mut self) -> bool {
        let changed = self.current != 1;
        self.current = 1;
        changed
    }

    /// Jump to the last page. Returns whether the page changed.
    pub fn last(&mut self, total_pages: usize) -> bool {
        self.go_to(total_pages, total_pages)
    }

    /// Pull the current page back into `[1, total_pages]`. Returns whether it moved.
    pub fn clamp(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current, total_pages)
    }
}
