//! FILENAME: app/src/error.rs

use catalog::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Screen '{0}' has no records loaded")]
    ScreenNotLoaded(String),

    #[error("State lock poisoned: {0}")]
    StatePoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for DashboardError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        DashboardError::StatePoisoned(err.to_string())
    }
}
