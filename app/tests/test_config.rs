//! FILENAME: tests/test_config.rs
//! Integration tests for dashboard configuration loading.

use catalog::EntityKind;
use dashboard_lib::{DashboardConfig, DashboardError, ScreenConfig};
use datatable_engine::{SortState, DEFAULT_PAGE_SIZE};
use std::io::Write;

#[test]
fn test_defaults_cover_every_entity() {
    let config = DashboardConfig::default();

    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert_eq!(config.fetch_limit, 1000);
    assert_eq!(config.screens.len(), EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let screen = config.screen(kind.module_name()).unwrap();
        assert_eq!(screen.endpoint, kind.endpoint());
        assert!(!screen.search_fields.is_empty(), "{} has no search fields", kind);
    }
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = DashboardConfig::from_json_str("{}").unwrap();
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "apiBaseUrl": "http://catalog.test",
            "fetchLimit": 250,
            "logLevel": "debug",
            "screens": [
                {{
                    "moduleName": "fields",
                    "endpoint": "v2/fields",
                    "facetFields": ["dataType", "Role"],
                    "searchFields": ["name"],
                    "defaultSort": {{ "key": "usageCount", "order": "ascending" }}
                }}
            ]
        }}"#
    )
    .unwrap();

    let config = DashboardConfig::from_json_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(config.api_base_url, "http://catalog.test");
    assert_eq!(config.fetch_limit, 250);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.screens.len(), 1);

    let screen = config.screen("fields").unwrap();
    assert_eq!(screen.default_page_size, DEFAULT_PAGE_SIZE);

    let table = screen.to_table_config();
    assert_eq!(table.module_name, "fields");
    assert_eq!(table.facet_fields, vec!["data_type".to_string(), "role".to_string()]);
    assert_eq!(table.default_sort, Some(SortState::ascending("usage_count")));

    assert!(matches!(config.screen("tables"), Err(DashboardError::UnknownScreen(_))));
}

#[test]
fn test_load_reports_bad_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = DashboardConfig::load(&dir.path().join("missing.json"));
    assert!(matches!(missing, Err(DashboardError::Io(_))));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(DashboardConfig::load(&broken), Err(DashboardError::Config(_))));
}

#[test]
fn test_api_url_override() {
    let config = DashboardConfig::default().with_api_base_url(Some(" http://other:1 ".to_string()));
    assert_eq!(config.api_base_url, "http://other:1");

    let config = DashboardConfig::default().with_api_base_url(Some("  ".to_string()));
    assert_eq!(config.api_base_url, "http://localhost:8000");

    let config = DashboardConfig::default().with_api_base_url(None);
    assert_eq!(config.api_base_url, "http://localhost:8000");
}

#[test]
fn test_screen_for_entity() {
    let screen = ScreenConfig::for_entity(EntityKind::Field);
    assert_eq!(screen.module_name, "fields");
    assert_eq!(screen.facet_fields, vec!["role", "data_type", "datasource_name"]);
    assert_eq!(screen.default_sort, Some(SortState::descending("usage_count")));
}
