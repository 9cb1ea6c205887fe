//! FILENAME: core/datatable-engine/src/definition.rs
//! Data-table Definition - The serializable configuration.
//!
//! These types DESCRIBE a table screen: which fields are searchable, which
//! are offered as facets, how large a page is and how rows start out sorted.
//! They are immutable snapshots; the engine owns the changing UI state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Page size used when a screen does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Facet field -> accepted values. An empty or missing set means "no restriction".
pub type ActiveFilters = BTreeMap<String, BTreeSet<String>>;

// ============================================================================
// SORTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    /// Most relevant first.
    fn default() -> Self {
        SortOrder::Descending
    }
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Current sort: a field name and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub key: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        SortState {
            key: key.into(),
            order,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        SortState::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortState::new(key, SortOrder::Descending)
    }
}

// ============================================================================
// TABLE CONFIG
// ============================================================================

/// Declarative configuration of one data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Opaque key, used by callers to namespace remembered preferences.
    pub module_name: String,

    /// Fields whose distinct values are counted and offered as filters, in display order.
    #[serde(default)]
    pub facet_fields: Vec<String>,

    /// Fields matched by the free-text search box.
    #[serde(default)]
    pub search_fields: Vec<String>,

    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortState>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl TableConfig {
    pub fn new(module_name: impl Into<String>) -> Self {
        TableConfig {
            module_name: module_name.into(),
            facet_fields: Vec::new(),
            search_fields: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
            default_sort: None,
        }
    }

    pub fn with_facets<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Page size actually used; zero is coerced to one.
    pub fn effective_page_size(&self) -> usize {
        self.default_page_size.max(1)
    }
}
