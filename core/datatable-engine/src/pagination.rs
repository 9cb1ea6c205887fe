//! FILENAME: core/datatable-engine/src/pagination.rs
//! PURPOSE: Page window arithmetic.
//! CONTEXT: Pages are 1-based. With zero results there is still one (empty)
//! page, so `1 <= page <= max(1, total_pages)` always holds.

use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page: usize,
    pub page_size: usize,
    /// Number of records after search and filters.
    pub total: usize,
    pub total_pages: usize,
}

/// `ceil(total / page_size)`; a zero page size is treated as one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

impl PaginationState {
    /// Build the state for a requested page, clamping it into range.
    pub fn compute(requested_page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total, page_size);
        PaginationState {
            page: clamp_page(requested_page, total_pages),
            page_size,
            total,
            total_pages,
        }
    }

    /// Index range of the current page within the sorted records.
    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first record on this page (0 when empty),
    /// for "Showing 21-40 of 95" style labels.
    pub fn first_item(&self) -> usize {
        let range = self.range();
        if range.is_empty() {
            0
        } else {
            range.start + 1
        }
    }

    pub fn last_item(&self) -> usize {
        self.range().end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(3, 2), 2);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn clamps_requested_page() {
        assert_eq!(PaginationState::compute(0, 10, 25).page, 1);
        assert_eq!(PaginationState::compute(9, 10, 25).page, 3);
        assert_eq!(PaginationState::compute(4, 10, 0).page, 1);
    }

    #[test]
    fn last_page_is_partial() {
        let state = PaginationState::compute(3, 10, 25);
        assert_eq!(state.range(), 20..25);
        assert_eq!(state.first_item(), 21);
        assert_eq!(state.last_item(), 25);
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn empty_result_has_empty_range() {
        let state = PaginationState::compute(1, 10, 0);
        assert!(state.range().is_empty());
        assert_eq!(state.first_item(), 0);
        assert_eq!(state.total_pages, 0);
        assert!(!state.has_next());
    }
}
