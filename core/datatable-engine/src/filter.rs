//! FILENAME: core/datatable-engine/src/filter.rs
//! PURPOSE: Evaluate every record against the search query and the active filters.
//! CONTEXT: One pass produces, per record, whether search passed and which
//! filters failed. Both the filtered result set and the facet counts (which
//! must ignore the facet's own filter) are read off this single evaluation.

use crate::definition::ActiveFilters;
use crate::search::SearchQuery;
use catalog::FieldAccess;
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// An active (non-empty) filter, borrowed out of `ActiveFilters`.
#[derive(Debug, Clone, Copy)]
pub struct ActiveFilter<'a> {
    pub field: &'a str,
    pub accepted: &'a BTreeSet<String>,
}

/// Result of evaluating a single record.
#[derive(Debug, Clone, Default)]
pub struct RecordMatch {
    pub passes_search: bool,
    /// Indices into the active filter list that this record fails.
    pub failed_filters: SmallVec<[usize; 4]>,
}

impl RecordMatch {
    /// Passes search and every filter.
    pub fn is_match(&self) -> bool {
        self.passes_search && self.failed_filters.is_empty()
    }
}

/// Non-empty filters, in field-name order.
pub fn active_filter_list(filters: &ActiveFilters) -> Vec<ActiveFilter<'_>> {
    filters
        .iter()
        .filter(|(_, accepted)| !accepted.is_empty())
        .map(|(field, accepted)| ActiveFilter {
            field: field.as_str(),
            accepted,
        })
        .collect()
}

/// A record passes a filter when its value's facet key is an accepted value.
/// Missing, null, list and object values never pass.
pub fn passes_filter<R: FieldAccess>(record: &R, filter: &ActiveFilter<'_>) -> bool {
    record
        .field(filter.field)
        .and_then(|value| value.scalar_text())
        .map(|key| filter.accepted.contains(key.as_ref()))
        .unwrap_or(false)
}

pub fn evaluate_record<R: FieldAccess>(
    record: &R,
    filters: &[ActiveFilter<'_>],
    search: &SearchQuery,
    search_fields: &[String],
) -> RecordMatch {
    let passes_search = search.matches(record, search_fields);
    let failed_filters = filters
        .iter()
        .enumerate()
        .filter(|(_, filter)| !passes_filter(record, filter))
        .map(|(idx, _)| idx)
        .collect();
    RecordMatch {
        passes_search,
        failed_filters,
    }
}

pub fn evaluate_records<R: FieldAccess>(
    records: &[R],
    filters: &[ActiveFilter<'_>],
    search: &SearchQuery,
    search_fields: &[String],
) -> Vec<RecordMatch> {
    records
        .iter()
        .map(|record| evaluate_record(record, filters, search, search_fields))
        .collect()
}
