//! FILENAME: core/datatable-engine/src/engine.rs
//! Data-table Engine - UI state plus the recomputation that turns it into a view.
//!
//! The engine owns an immutable record collection and five independent pieces
//! of UI state: search query, active filters, sort, page and page size. Every
//! mutator replaces exactly one of them (never patches), so callers may fire
//! them in any order and any number of times. Derived outputs are recomputed
//! from scratch on every call.
//!
//! Algorithm (`view`):
//! 1. Evaluate each record once: search pass/fail plus the list of failed filters
//! 2. Filtered set = records that pass search and fail nothing
//! 3. Facets = per facet field, count records failing at most that field's own filter
//! 4. Stable sort of the filtered set by precomputed sort keys
//! 5. Clamp the page and slice the window
//!
//! Nothing here fails: bad input is coerced into a degenerate but valid view.

use crate::compare::{compare_keys, SortKey};
use crate::definition::{ActiveFilters, SortState, TableConfig};
use crate::facets::{compute_facets, Facet};
use crate::filter::{active_filter_list, evaluate_records, RecordMatch};
use crate::pagination::{clamp_page, total_pages, PaginationState};
use crate::search::SearchQuery;
use crate::view::TableView;
use catalog::{canonical_field_name, FieldAccess};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct DataTableEngine<R> {
    records: Vec<R>,
    config: TableConfig,
    search: SearchQuery,
    filters: ActiveFilters,
    sort: Option<SortState>,
    page: usize,
    page_size: usize,
}

impl<R: FieldAccess> DataTableEngine<R> {
    pub fn new(records: Vec<R>, config: TableConfig) -> Self {
        let page_size = config.effective_page_size();
        let sort = config.default_sort.clone();
        DataTableEngine {
            records,
            config,
            search: SearchQuery::default(),
            filters: ActiveFilters::new(),
            sort,
            page: 1,
            page_size,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn module_name(&self) -> &str {
        &self.config.module_name
    }

    pub fn search_term(&self) -> &str {
        self.search.raw()
    }

    pub fn active_filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    /// Replace the search query. Resets to the first page.
    pub fn set_search_term(&mut self, query: impl Into<String>) {
        self.search = SearchQuery::new(query);
        self.page = 1;
    }

    /// Replace the accepted values of one filter field. An empty set removes
    /// the restriction. Resets to the first page.
    pub fn set_filter<I, S>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_filter(field.into(), values.into_iter().map(Into::into).collect());
        self.page = 1;
    }

    /// Apply several filter updates at once, with a single page reset.
    pub fn set_filters<F, I, S>(&mut self, updates: impl IntoIterator<Item = (F, I)>)
    where
        F: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (field, values) in updates {
            self.replace_filter(field.into(), values.into_iter().map(Into::into).collect());
        }
        self.page = 1;
    }

    /// Add `value` to the field's accepted set, or remove it if already there.
    pub fn toggle_filter_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field: String = field.into();
        let field = canonical_field_name(&field);
        let value = value.into();
        let mut accepted = self.filters.remove(&field).unwrap_or_default();
        if !accepted.remove(&value) {
            accepted.insert(value);
        }
        self.replace_filter(field, accepted);
        self.page = 1;
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.filters.remove(&canonical_field_name(field));
        self.page = 1;
    }

    /// Drop every filter. Search and sort are left alone.
    pub fn clear_all_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Sort by `key`. Clicking the current key flips the direction; a new key
    /// starts out descending. Resets to the first page.
    pub fn set_sort(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortState::new(key, current.order.toggled()),
            _ => SortState::descending(key),
        });
        self.page = 1;
    }

    /// Set the sort verbatim (e.g. a remembered preference). Resets to the first page.
    pub fn set_sort_state(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Go to `page`, clamped into `[1, max(1, total_pages)]`.
    pub fn set_page(&mut self, page: usize) {
        let total_pages = total_pages(self.filtered_count(), self.page_size);
        self.page = clamp_page(page, total_pages);
    }

    /// Change the page size; the current page number is kept but clamped.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_current_page();
    }

    /// Swap in a new record collection; UI state survives, the page is clamped.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.clamp_current_page();
    }

    /// Filters are keyed by canonical field name, so `dataType` and
    /// `data_type` address the same filter.
    fn replace_filter(&mut self, field: String, accepted: BTreeSet<String>) {
        let field = canonical_field_name(&field);
        if accepted.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, accepted);
        }
    }

    fn clamp_current_page(&mut self) {
        let total_pages = total_pages(self.filtered_count(), self.page_size);
        self.page = clamp_page(self.page, total_pages);
    }

    // ========================================================================
    // DERIVED OUTPUTS
    // ========================================================================

    fn evaluate(&self) -> Vec<RecordMatch> {
        let filters = active_filter_list(&self.filters);
        evaluate_records(&self.records, &filters, &self.search, &self.config.search_fields)
    }

    fn filtered_indices(&self, matches: &[RecordMatch]) -> Vec<usize> {
        matches
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_match())
            .map(|(idx, _)| idx)
            .collect()
    }

    fn sort_indices(&self, indices: &mut [usize]) {
        let Some(sort) = &self.sort else {
            return;
        };
        let keys: Vec<SortKey> = self
            .records
            .iter()
            .map(|r| SortKey::from_value(r.field(&sort.key)))
            .collect();
        // `sort_by` is stable, so equal keys keep input order in both directions.
        indices.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], sort.order));
    }

    /// Number of records passing search and filters.
    pub fn filtered_count(&self) -> usize {
        self.evaluate().iter().filter(|m| m.is_match()).count()
    }

    /// Records passing search and filters, in input order.
    pub fn filtered_records(&self) -> Vec<&R> {
        let matches = self.evaluate();
        self.filtered_indices(&matches)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    pub fn facets(&self) -> Vec<Facet> {
        let filters = active_filter_list(&self.filters);
        let matches = evaluate_records(&self.records, &filters, &self.search, &self.config.search_fields);
        compute_facets(&self.records, &matches, &filters, &self.config.facet_fields)
    }

    /// Filtered records in sort order (input order when unsorted).
    pub fn sorted_records(&self) -> Vec<&R> {
        let matches = self.evaluate();
        let mut indices = self.filtered_indices(&matches);
        self.sort_indices(&mut indices);
        indices.into_iter().map(|idx| &self.records[idx]).collect()
    }

    pub fn pagination(&self) -> PaginationState {
        PaginationState::compute(self.page, self.page_size, self.filtered_count())
    }

    /// The records on the current page.
    pub fn display_data(&self) -> Vec<&R> {
        let sorted = self.sorted_records();
        let range = PaginationState::compute(self.page, self.page_size, sorted.len()).range();
        sorted.get(range).map(<[&R]>::to_vec).unwrap_or_default()
    }

    /// Every derived output at once, from a single evaluation pass.
    pub fn view(&self) -> TableView<'_, R> {
        let filters = active_filter_list(&self.filters);
        let matches = evaluate_records(&self.records, &filters, &self.search, &self.config.search_fields);
        let facets = compute_facets(&self.records, &matches, &filters, &self.config.facet_fields);

        let mut indices = self.filtered_indices(&matches);
        self.sort_indices(&mut indices);
        let sorted: Vec<&R> = indices.into_iter().map(|idx| &self.records[idx]).collect();
        let pagination = PaginationState::compute(self.page, self.page_size, sorted.len());

        TableView {
            sorted,
            facets,
            pagination,
            search_term: self.search.raw(),
            filters: &self.filters,
            sort: self.sort.as_ref(),
        }
    }
}
