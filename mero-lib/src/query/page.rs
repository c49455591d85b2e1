//! Page arithmetic.

use std::ops::Range;

/// A 1-based page request over a matched sequence.
///
/// # Example
///
/// ```
/// use mero_lib::query::Pagination;
///
/// let pagination = Pagination::new(3, 10);
/// assert_eq!(pagination.page_count(23), 3);
/// assert_eq!(pagination.range(23), 20..23);
/// assert_eq!(Pagination::new(4, 10).range(23), 23..23);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Creates a page request. Zero page or page size is read as 1.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the number of records per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages needed for `total` records, at least 1.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Returns the index range of this page, clamped to `total`.
    ///
    /// A page past the end yields an empty range.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Returns `true` if a page follows this one.
    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.page_count(total)
    }

    /// Returns `true` if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
