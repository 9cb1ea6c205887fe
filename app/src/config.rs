//! FILENAME: app/src/config.rs
// PURPOSE: Dashboard configuration: backend location, fetch limits, logging
//          and the table screen definitions.
// CONTEXT: Loaded from a JSON file; every key is optional and falls back to
//          the built-in defaults, which define one screen per catalog entity.

use crate::error::DashboardError;
use catalog::{canonical_field_name, EntityKind};
use datatable_engine::{SortState, TableConfig, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `apiBaseUrl`.
pub const API_URL_ENV: &str = "CATALOG_API_URL";

// ============================================================================
// SCREEN CONFIG
// ============================================================================

/// One table screen: where its collection comes from and how it is browsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
    pub module_name: String,
    /// List endpoint, relative to the API base URL.
    pub endpoint: String,
    #[serde(default)]
    pub facet_fields: Vec<String>,
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

impl ScreenConfig {
    /// Engine configuration with every field name folded to its canonical form,
    /// matching how records are keyed after decoding.
    pub fn to_table_config(&self) -> TableConfig {
        let canonical = |fields: &[String]| -> Vec<String> {
            fields.iter().map(|f| canonical_field_name(f)).collect()
        };
        let mut config = TableConfig::new(self.module_name.clone())
            .with_facets(canonical(&self.facet_fields))
            .with_search(canonical(&self.search_fields))
            .with_page_size(self.default_page_size);
        config.default_sort = self.default_sort.as_ref().map(|sort| {
            SortState::new(canonical_field_name(&sort.key), sort.order)
        });
        config
    }

    /// Built-in screen for a catalog entity kind.
    pub fn for_entity(kind: EntityKind) -> Self {
        let (facets, search, page_size, sort): (&[&str], &[&str], usize, Option<&str>) = match kind {
            EntityKind::Database => (
                &["connection_type", "is_certified"],
                &["name", "host_name", "description"],
                20,
                Some("table_count"),
            ),
            EntityKind::Table => (
                &["database_name", "schema", "is_certified"],
                &["name", "full_name", "database_name"],
                20,
                Some("column_count"),
            ),
            EntityKind::Column => (
                &["remote_type", "table_name"],
                &["name", "table_name", "description"],
                50,
                None,
            ),
            EntityKind::Datasource => (
                &["project_name", "is_certified", "has_extracts"],
                &["name", "project_name", "owner_name"],
                20,
                Some("field_count"),
            ),
            EntityKind::Field => (
                &["role", "data_type", "datasource_name"],
                &["name", "formula", "datasource_name"],
                50,
                Some("usage_count"),
            ),
            EntityKind::Metric => (
                &["datasource_name", "owner_name"],
                &["name", "formula", "description"],
                20,
                Some("usage_count"),
            ),
            EntityKind::Workbook => (
                &["project_name", "owner_name"],
                &["name", "project_name", "owner_name"],
                20,
                Some("view_count"),
            ),
            EntityKind::View => (
                &["workbook_name", "sheet_type"],
                &["name", "workbook_name"],
                50,
                Some("total_views"),
            ),
            EntityKind::Project => (
                &["parent_project_name"],
                &["name", "description"],
                20,
                Some("workbook_count"),
            ),
            EntityKind::User => (
                &["site_role"],
                &["name", "display_name", "email"],
                50,
                None,
            ),
        };

        ScreenConfig {
            module_name: kind.module_name().to_string(),
            endpoint: kind.endpoint(),
            facet_fields: facets.iter().map(|s| s.to_string()).collect(),
            search_fields: search.iter().map(|s| s.to_string()).collect(),
            default_page_size: page_size,
            default_sort: sort.map(SortState::descending),
        }
    }
}

// ============================================================================
// DASHBOARD CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Upper bound on items requested per collection fetch.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "builtin_screens")]
    pub screens: Vec<ScreenConfig>,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_fetch_limit() -> usize {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn builtin_screens() -> Vec<ScreenConfig> {
    EntityKind::ALL.iter().map(|kind| ScreenConfig::for_entity(*kind)).collect()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            api_base_url: default_api_base_url(),
            fetch_limit: default_fetch_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            log_path: None,
            log_level: default_log_level(),
            screens: builtin_screens(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a JSON file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        let url = std::env::var(API_URL_ENV).ok();
        self.with_api_base_url(url)
    }

    /// Replace the base URL when `url` is a non-empty value.
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    pub fn screen(&self, module_name: &str) -> Result<&ScreenConfig, DashboardError> {
        self.screens
            .iter()
            .find(|s| s.module_name == module_name)
            .ok_or_else(|| DashboardError::UnknownScreen(module_name.to_string()))
    }
}
