//! FILENAME: core/catalog/src/entity.rs
//! PURPOSE: The kinds of catalog entities the dashboard has a screen for.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Database,
    Table,
    Column,
    Datasource,
    Field,
    Metric,
    Workbook,
    View,
    Project,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Database,
        EntityKind::Table,
        EntityKind::Column,
        EntityKind::Datasource,
        EntityKind::Field,
        EntityKind::Metric,
        EntityKind::Workbook,
        EntityKind::View,
        EntityKind::Project,
        EntityKind::User,
    ];

    /// Screen / preference namespace for this entity kind.
    pub fn module_name(self) -> &'static str {
        match self {
            EntityKind::Database => "databases",
            EntityKind::Table => "tables",
            EntityKind::Column => "columns",
            EntityKind::Datasource => "datasources",
            EntityKind::Field => "fields",
            EntityKind::Metric => "metrics",
            EntityKind::Workbook => "workbooks",
            EntityKind::View => "views",
            EntityKind::Project => "projects",
            EntityKind::User => "users",
        }
    }

    /// List endpoint path, relative to the API base URL.
    pub fn endpoint(self) -> String {
        format!("api/{}", self.module_name())
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Database => "Database",
            EntityKind::Table => "Table",
            EntityKind::Column => "Column",
            EntityKind::Datasource => "Datasource",
            EntityKind::Field => "Field",
            EntityKind::Metric => "Metric",
            EntityKind::Workbook => "Workbook",
            EntityKind::View => "View",
            EntityKind::Project => "Project",
            EntityKind::User => "User",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

impl FromStr for EntityKind {
    type Err = CatalogError;

    /// Accepts the module name (`tables`) or the singular label (`Table`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.module_name() == needle || kind.label().to_lowercase() == needle)
            .ok_or_else(|| CatalogError::UnknownEntity(s.to_string()))
    }
}
