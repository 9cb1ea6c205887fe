//! FILENAME: app/src/lib.rs
// PURPOSE: Catalog dashboard backend: shared state and the command surface
//          the presentation layer calls into.
// CONTEXT: One data-table engine per screen, held behind a Mutex so commands
//          can be dispatched from any thread. Loading a screen fetches its
//          collection over HTTP and hands the records to the engine.

pub mod api_types;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod screens;

use chrono::{DateTime, Utc};
use catalog::Record;
use datatable_engine::DataTableEngine;
use std::collections::HashMap;
use std::sync::Mutex;

pub use api_types::{FilterUpdate, ScreenSummary, ScreenView};
pub use client::{fetch_screen, CatalogClient};
pub use config::{DashboardConfig, ScreenConfig};
pub use error::DashboardError;
pub use preferences::{MemoryPreferenceStore, PreferenceStore, ScreenPreferences};
pub use screens::*;

pub type ScreenEngine = DataTableEngine<Record>;

pub struct AppState {
    pub config: DashboardConfig,
    /// Engines keyed by module name; present once the screen has been loaded.
    pub screens: Mutex<HashMap<String, ScreenEngine>>,
    /// When each screen's records were last replaced.
    pub loaded_at: Mutex<HashMap<String, DateTime<Utc>>>,
    pub preferences: Box<dyn PreferenceStore>,
}

pub fn create_app_state(config: DashboardConfig) -> AppState {
    create_app_state_with_preferences(config, Box::new(MemoryPreferenceStore::new()))
}

pub fn create_app_state_with_preferences(
    config: DashboardConfig,
    preferences: Box<dyn PreferenceStore>,
) -> AppState {
    log_info!(
        "SYS",
        "Creating AppState: api={} screens={}",
        config.api_base_url,
        config.screens.len()
    );
    AppState {
        config,
        screens: Mutex::new(HashMap::new()),
        loaded_at: Mutex::new(HashMap::new()),
        preferences,
    }
}
