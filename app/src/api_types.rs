//! FILENAME: app/src/api_types.rs
// PURPOSE: Serializable shapes returned to the presentation layer.

use catalog::Record;
use datatable_engine::{ActiveFilters, Facet, PaginationState, SortState, TableView};
use serde::{Deserialize, Serialize};

/// Everything a table screen renders after a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub module_name: String,
    /// Records on the current page, in display order.
    pub records: Vec<Record>,
    pub facets: Vec<Facet>,
    pub pagination: PaginationState,
    pub search_term: String,
    pub filters: ActiveFilters,
    pub sort: Option<SortState>,
    pub is_filtered: bool,
    /// RFC 3339 timestamp of the last load.
    pub loaded_at: Option<String>,
}

impl ScreenView {
    pub fn from_view(module_name: &str, view: &TableView<'_, Record>, loaded_at: Option<String>) -> Self {
        ScreenView {
            module_name: module_name.to_string(),
            records: view.display_data().iter().map(|r| (*r).clone()).collect(),
            facets: view.facets.clone(),
            pagination: view.pagination,
            search_term: view.search_term.to_string(),
            filters: view.filters.clone(),
            sort: view.sort.cloned(),
            is_filtered: view.is_filtered(),
            loaded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    pub module_name: String,
    pub endpoint: String,
    pub loaded: bool,
    pub record_count: usize,
    pub filtered_count: usize,
}

/// One field's replacement value set in a batch filter update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub field: String,
    #[serde(default)]
    pub values: Vec<String>,
}
