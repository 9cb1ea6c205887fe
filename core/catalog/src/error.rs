//! FILENAME: core/catalog/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown entity kind: {0}")]
    UnknownEntity(String),
}
