//! FILENAME: core/datatable-engine/src/facets.rs
//! PURPOSE: Facet value counting with cross-filter exclusion.
//!
//! The count shown next to a facet value is the number of records that pass
//! the search query and every active filter EXCEPT the facet's own. Selecting
//! a second value in the same facet therefore never starves the first one of
//! options, while selections in other facets do narrow the counts.
//!
//! Values are ordered by descending count; ties keep first-observed order.

use crate::filter::{ActiveFilter, RecordMatch};
use catalog::{canonical_field_name, FieldAccess};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Counts for one facet field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub field: String,
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// A facet with no observed values has nothing to offer and is hidden by the UI.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.values.iter().find(|v| v.value == value).map(|v| v.count)
    }

    pub fn total(&self) -> usize {
        self.values.iter().map(|v| v.count).sum()
    }
}

/// Accumulates counts while remembering first-observed order.
#[derive(Default)]
struct FacetCounter {
    index: FxHashMap<String, usize>,
    values: Vec<FacetValue>,
}

impl FacetCounter {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&idx) => self.values[idx].count += 1,
            None => {
                self.index.insert(key.to_string(), self.values.len());
                self.values.push(FacetValue {
                    value: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    fn finish(self, field: &str) -> Facet {
        let mut values = self.values;
        // Stable: equal counts stay in first-observed order.
        values.sort_by(|a, b| b.count.cmp(&a.count));
        Facet {
            field: field.to_string(),
            values,
        }
    }
}

/// Does a record contribute to the counts of the facet on `field`?
/// It must pass search, and fail no filter other than the one on `field` itself.
/// `field` is the canonical name; filter keys are stored canonically.
fn contributes(record_match: &RecordMatch, filters: &[ActiveFilter<'_>], field: &str) -> bool {
    if !record_match.passes_search {
        return false;
    }
    match record_match.failed_filters.as_slice() {
        [] => true,
        [only] => filters
            .get(*only)
            .map(|f| f.field == field)
            .unwrap_or(false),
        _ => false,
    }
}

/// Compute one `Facet` per configured facet field, in configuration order.
pub fn compute_facets<R: FieldAccess>(
    records: &[R],
    matches: &[RecordMatch],
    filters: &[ActiveFilter<'_>],
    facet_fields: &[String],
) -> Vec<Facet> {
    let mut counters: Vec<FacetCounter> = facet_fields.iter().map(|_| FacetCounter::default()).collect();
    let canonical: Vec<String> = facet_fields.iter().map(|f| canonical_field_name(f)).collect();

    for (record, record_match) in records.iter().zip(matches) {
        if !record_match.passes_search {
            continue;
        }
        for ((field, own), counter) in facet_fields.iter().zip(&canonical).zip(counters.iter_mut()) {
            if !contributes(record_match, filters, own) {
                continue;
            }
            if let Some(key) = record.field(field).and_then(|v| v.scalar_text()) {
                counter.add(key.as_ref());
            }
        }
    }

    counters
        .into_iter()
        .zip(facet_fields)
        .map(|(counter, field)| counter.finish(field))
        .collect()
}
