//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for dashboard backend integration tests.

#![allow(dead_code)]

use catalog::{records_from_json, Record};
use dashboard_lib::{
    create_app_state, create_app_state_with_preferences, load_screen_records, AppState,
    DashboardConfig, PreferenceStore, ScreenView,
};
use serde_json::json;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new harness with the built-in screens and nothing loaded.
    pub fn new() -> Self {
        dashboard_lib::logging::set_console_echo(false);
        TestHarness {
            state: create_app_state(DashboardConfig::default()),
        }
    }

    pub fn with_preferences(preferences: Box<dyn PreferenceStore>) -> Self {
        dashboard_lib::logging::set_console_echo(false);
        TestHarness {
            state: create_app_state_with_preferences(DashboardConfig::default(), preferences),
        }
    }

    /// Create a harness with the `fields` screen loaded from the fixture.
    pub fn with_fields() -> Self {
        let harness = Self::new();
        harness.load("fields", FieldsFixture::records());
        harness
    }

    pub fn load(&self, module_name: &str, records: Vec<Record>) -> ScreenView {
        load_screen_records(&self.state, module_name, records).unwrap()
    }
}

/// Names of the records on the current page, in display order.
pub fn page_names(view: &ScreenView) -> Vec<String> {
    view.records
        .iter()
        .map(|r| r.get("name").map(|v| v.display_text()).unwrap_or_default())
        .collect()
}

/// Facet values with counts, in facet order.
pub fn facet_counts(view: &ScreenView, field: &str) -> Vec<(String, usize)> {
    view.facets
        .iter()
        .find(|f| f.field == field)
        .map(|f| f.values.iter().map(|v| (v.value.clone(), v.count)).collect())
        .unwrap_or_default()
}

/// Field-level catalog metadata as the backend returns it (camelCase keys).
pub struct FieldsFixture;

impl FieldsFixture {
    pub fn payload() -> serde_json::Value {
        json!({
            "items": [
                { "id": "f1", "name": "Revenue", "role": "measure", "dataType": "real",
                  "datasourceName": "Sales", "usageCount": 40 },
                { "id": "f2", "name": "Region", "role": "dimension", "dataType": "string",
                  "datasourceName": "Sales", "usageCount": 12 },
                { "id": "f3", "name": "Profit Ratio", "role": "measure", "dataType": "real",
                  "datasourceName": "Sales", "usageCount": 40,
                  "formula": "SUM([Profit]) / SUM([Sales])" },
                { "id": "f4", "name": "Order Date", "role": "dimension", "dataType": "date",
                  "datasourceName": "Sales", "usageCount": 7 },
                { "id": "f5", "name": "Budget", "role": "measure", "dataType": "real",
                  "datasourceName": "Finance", "usageCount": 3 },
                { "id": "f6", "name": "Cost Center", "role": "dimension", "dataType": "string",
                  "datasourceName": "Finance", "usageCount": null },
                { "id": "f7", "name": "Headcount", "role": "measure", "dataType": "integer",
                  "datasourceName": "HR", "usageCount": 25 },
                { "id": "f8", "name": "Department", "role": "dimension", "dataType": "string",
                  "datasourceName": "HR", "usageCount": 25 }
            ],
            "total": 8
        })
    }

    pub fn records() -> Vec<Record> {
        records_from_json(Self::payload())
    }

    /// Display order under the default sort (usage count, descending).
    pub fn default_order() -> Vec<&'static str> {
        vec![
            "Revenue",
            "Profit Ratio",
            "Headcount",
            "Department",
            "Region",
            "Order Date",
            "Budget",
            "Cost Center",
        ]
    }
}

/// Table-level catalog metadata as a bare array with snake_case keys.
pub struct TablesFixture;

impl TablesFixture {
    pub fn payload() -> serde_json::Value {
        json!([
            { "id": "t1", "name": "orders", "database_name": "warehouse", "schema": "public",
              "is_certified": true, "column_count": 14 },
            { "id": "t2", "name": "customers", "database_name": "warehouse", "schema": "public",
              "is_certified": false, "column_count": 9 },
            { "id": "t3", "name": "budget_lines", "database_name": "finance", "schema": "planning",
              "is_certified": true, "column_count": 22 }
        ])
    }

    pub fn records() -> Vec<Record> {
        records_from_json(Self::payload())
    }
}
