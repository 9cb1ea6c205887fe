//! FILENAME: app/src/client.rs
// PURPOSE: HTTP access to the catalog backend's list endpoints.
// CONTEXT: One GET per collection, with the configured fetch limit. The body
//          may be a bare array or an envelope object; decoding to records
//          happens in the catalog crate, and a body that is not JSON at all
//          surfaces as a catalog error.

use crate::api_types::ScreenView;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::screens::load_screen_records;
use crate::{log_enter_info, log_exit_info, log_warn, AppState};
use catalog::{parse_payload, Record};
use reqwest::Client;
use std::time::Duration;

pub struct CatalogClient {
    client: Client,
    base_url: String,
    fetch_limit: usize,
}

impl CatalogClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(CatalogClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit,
        })
    }

    /// Absolute URL of an endpoint, including the limit query.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}?limit={}",
            self.base_url,
            endpoint.trim_start_matches('/'),
            self.fetch_limit
        )
    }

    pub async fn fetch_records(&self, endpoint: &str) -> Result<Vec<Record>, DashboardError> {
        let url = self.endpoint_url(endpoint);
        log_enter_info!("HTTP", "fetch_records", "GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log_warn!("HTTP", "GET {} returned {}", url, status);
            return Err(DashboardError::Api { status, body });
        }

        let body = response.text().await?;
        let records = parse_payload(&body)?;
        log_exit_info!("HTTP", "fetch_records", "{} records", records.len());
        Ok(records)
    }
}

/// Fetch a screen's collection and load it into the screen's engine.
pub async fn fetch_screen(
    state: &AppState,
    client: &CatalogClient,
    module_name: &str,
) -> Result<ScreenView, String> {
    let endpoint = state
        .config
        .screen(module_name)
        .map_err(|e| e.to_string())?
        .endpoint
        .clone();
    let records = client
        .fetch_records(&endpoint)
        .await
        .map_err(|e| e.to_string())?;
    load_screen_records(state, module_name, records)
}
