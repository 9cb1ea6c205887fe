//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line front end: fetch one screen, apply UI state, print it.

use crate::client::{fetch_screen, CatalogClient};
use crate::config::{DashboardConfig, API_URL_ENV};
use crate::error::DashboardError;
use crate::logging::{init_log_file, install_log_bridge, parse_level, set_console_echo};
use crate::screens::{list_screens, set_filters, set_page, set_page_size, set_search_term, set_sort};
use crate::{create_app_state, log_info, AppState, FilterUpdate, ScreenView};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Browse a catalog collection from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file. Built-in defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API server URL, overriding the configuration.
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Screen (module name) to show, e.g. `fields`.
    #[arg(long, required_unless_present = "list")]
    pub screen: Option<String>,

    /// List the configured screens instead of fetching one.
    #[arg(long)]
    pub list: bool,

    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,

    /// Facet filter as `field=value`; repeat to accept several values.
    #[arg(long = "filter", value_parser = parse_filter_arg)]
    pub filters: Vec<(String, String)>,

    /// Sort key. Given twice, the direction flips to ascending.
    #[arg(long)]
    pub sort: Vec<String>,

    #[arg(long)]
    pub page: Option<i64>,

    #[arg(long)]
    pub page_size: Option<i64>,

    /// Echo the unified log to stdout.
    #[arg(long)]
    pub verbose: bool,
}

pub fn parse_filter_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected field=value, got '{}'", raw)),
    }
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then the
    /// API URL from the flag or environment.
    pub fn load_config(&self) -> Result<DashboardConfig, DashboardError> {
        let config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                DashboardConfig::from_json_str(&text)?
            }
            None => DashboardConfig::default(),
        };
        Ok(config.with_api_base_url(self.api_url.clone()))
    }

    /// Filter arguments grouped into one update per field.
    pub fn filter_updates(&self) -> Vec<FilterUpdate> {
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (field, value) in &self.filters {
            grouped.entry(field.as_str()).or_default().push(value.clone());
        }
        grouped
            .into_iter()
            .map(|(field, values)| FilterUpdate {
                field: field.to_string(),
                values,
            })
            .collect()
    }
}

fn setup_logging(cli: &Cli, config: &DashboardConfig) -> Result<(), String> {
    set_console_echo(cli.verbose);
    install_log_bridge(parse_level(&config.log_level));
    if let Some(path) = &config.log_path {
        init_log_file(path)?;
    }
    Ok(())
}

/// Apply the CLI's UI state to a loaded screen, in the order a user would.
fn apply_ui_state(state: &AppState, cli: &Cli, module_name: &str) -> Result<ScreenView, String> {
    let mut view = None;
    if let Some(term) = &cli.search {
        view = Some(set_search_term(state, module_name, term)?);
    }
    let updates = cli.filter_updates();
    if !updates.is_empty() {
        view = Some(set_filters(state, module_name, updates)?);
    }
    for key in &cli.sort {
        view = Some(set_sort(state, module_name, key)?);
    }
    if let Some(size) = cli.page_size {
        view = Some(set_page_size(state, module_name, size)?);
    }
    if let Some(page) = cli.page {
        view = Some(set_page(state, module_name, page)?);
    }
    match view {
        Some(view) => Ok(view),
        None => crate::screens::get_screen_view(state, module_name),
    }
}

/// Run the CLI to completion, returning the JSON document to print.
pub async fn run(cli: Cli) -> Result<String, String> {
    let config = cli.load_config().map_err(|e| e.to_string())?;
    setup_logging(&cli, &config)?;
    log_info!("SYS", "catalog-dashboard starting: api={}", config.api_base_url);

    let state = create_app_state(config);

    if cli.list {
        let screens = list_screens(&state)?;
        return serde_json::to_string_pretty(&screens).map_err(|e| e.to_string());
    }

    let module_name = cli
        .screen
        .clone()
        .ok_or_else(|| "--screen is required".to_string())?;
    let client = CatalogClient::new(&state.config).map_err(|e| e.to_string())?;
    fetch_screen(&state, &client, &module_name).await?;
    let view = apply_ui_state(&state, &cli, &module_name)?;
    serde_json::to_string_pretty(&view).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_filters_and_flags() {
        let cli = Cli::parse_from([
            "catalog-dashboard",
            "--screen",
            "fields",
            "--filter",
            "role=dimension",
            "--filter",
            "dataType=string",
            "--filter",
            "role=measure",
            "--sort",
            "name",
            "--page",
            "2",
        ]);

        assert_eq!(cli.screen.as_deref(), Some("fields"));
        assert_eq!(cli.sort, vec!["name".to_string()]);
        assert_eq!(cli.page, Some(2));

        let updates = cli.filter_updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].field, "dataType");
        assert_eq!(updates[1].field, "role");
        assert_eq!(updates[1].values, vec!["dimension".to_string(), "measure".to_string()]);
    }

    #[test]
    fn rejects_malformed_filter() {
        assert!(parse_filter_arg("role").is_err());
        assert!(parse_filter_arg("=x").is_err());
        assert_eq!(
            parse_filter_arg("owner = ana").unwrap(),
            ("owner".to_string(), "ana".to_string())
        );
    }

    #[test]
    fn screen_is_required_unless_listing() {
        assert!(Cli::try_parse_from(["catalog-dashboard"]).is_err());
        assert!(Cli::try_parse_from(["catalog-dashboard", "--list"]).is_ok());
    }

    #[test]
    fn api_url_flag_overrides_defaults() {
        let cli = Cli::parse_from([
            "catalog-dashboard",
            "--list",
            "--api-url",
            "http://catalog.internal:9000",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.api_base_url, "http://catalog.internal:9000");
        assert_eq!(config.screens.len(), 10);
    }
}
