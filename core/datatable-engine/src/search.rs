//! FILENAME: core/datatable-engine/src/search.rs
//! PURPOSE: Free-text search over the configured search fields.
//! CONTEXT: Case-insensitive substring match, OR across fields. The raw text
//! is kept as typed so the search box can be re-rendered verbatim.

use catalog::{FieldAccess, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        SearchQuery { raw, needle }
    }

    /// The text exactly as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lowercased form used for matching.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Empty or whitespace-only queries match everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<R: FieldAccess>(&self, record: &R, search_fields: &[String]) -> bool {
        if self.is_empty() {
            return true;
        }
        search_fields.iter().any(|field| {
            record
                .field(field)
                .map(|value| value_contains(value, &self.needle))
                .unwrap_or(false)
        })
    }
}

/// Scalars match through their text; lists match if any element does.
fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::List(items) => items.iter().any(|item| value_contains(item, needle)),
        other => other
            .scalar_text()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false),
    }
}

impl From<String> for SearchQuery {
    fn from(raw: String) -> Self {
        SearchQuery::new(raw)
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        SearchQuery::new(raw)
    }
}

impl From<SearchQuery> for String {
    fn from(query: SearchQuery) -> Self {
        query.raw
    }
}
