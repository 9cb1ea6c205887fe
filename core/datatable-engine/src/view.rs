//! FILENAME: core/datatable-engine/src/view.rs
//! Data-table View - everything a screen renders, derived in one pass.
//!
//! The view borrows records from the engine; nothing in it is stored back.
//! Presentation code reads `display_data()` for the cards/rows, `facets` for
//! the filter chips and `pagination` for the pager.

use crate::definition::{ActiveFilters, SortState};
use crate::facets::Facet;
use crate::pagination::PaginationState;

#[derive(Debug, Clone)]
pub struct TableView<'a, R> {
    /// Records passing search and filters, in sorted order.
    pub sorted: Vec<&'a R>,
    pub facets: Vec<Facet>,
    pub pagination: PaginationState,
    pub search_term: &'a str,
    pub filters: &'a ActiveFilters,
    pub sort: Option<&'a SortState>,
}

impl<'a, R> TableView<'a, R> {
    /// The records on the current page.
    pub fn display_data(&self) -> &[&'a R] {
        let range = self.pagination.range();
        self.sorted.get(range).unwrap_or(&[])
    }

    /// Facets that have at least one value to offer.
    pub fn visible_facets(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter().filter(|f| !f.is_empty())
    }

    pub fn facet(&self, field: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.field == field)
    }

    pub fn filtered_count(&self) -> usize {
        self.pagination.total
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_term.trim().is_empty() || self.filters.values().any(|v| !v.is_empty())
    }
}
