//! FILENAME: app/src/screens.rs
// PURPOSE: Table screen commands: load records, then search, filter, sort and
//          page through them.
// CONTEXT: Every command locks the screen map, applies one engine mutation and
//          returns the freshly derived ScreenView. Field names coming from the
//          presentation layer may be spelled in any casing and are folded to
//          the canonical form records use. Errors are flattened to strings at
//          this boundary.

use crate::api_types::{FilterUpdate, ScreenSummary, ScreenView};
use crate::error::DashboardError;
use crate::{log_debug, log_enter_info, log_exit_info, log_warn};
use crate::{AppState, ScreenEngine};
use catalog::{canonical_field_name, Record};
use chrono::Utc;
use datatable_engine::DataTableEngine;

// ============================================================================
// HELPERS
// ============================================================================

fn loaded_at_text(state: &AppState, module_name: &str) -> Result<Option<String>, DashboardError> {
    let loaded_at = state.loaded_at.lock()?;
    Ok(loaded_at.get(module_name).map(|t| t.to_rfc3339()))
}

/// Run `mutate` against a loaded screen's engine and return the resulting view.
/// `mutate` runs under the screens lock; anything it writes elsewhere (the
/// preference store) is ordered with the engine change.
fn with_screen<F>(state: &AppState, module_name: &str, mutate: F) -> Result<ScreenView, DashboardError>
where
    F: FnOnce(&mut ScreenEngine),
{
    state.config.screen(module_name)?;
    let loaded_at = loaded_at_text(state, module_name)?;
    let mut screens = state.screens.lock()?;
    let engine = screens
        .get_mut(module_name)
        .ok_or_else(|| DashboardError::ScreenNotLoaded(module_name.to_string()))?;
    mutate(engine);
    let view = engine.view();
    Ok(ScreenView::from_view(module_name, &view, loaded_at))
}

fn command_result(name: &str, result: Result<ScreenView, DashboardError>) -> Result<ScreenView, String> {
    match result {
        Ok(view) => {
            log_exit_info!(
                "CMD",
                name,
                "page={}/{} filtered={}",
                view.pagination.page,
                view.pagination.total_pages,
                view.pagination.total
            );
            Ok(view)
        }
        Err(e) => {
            log_warn!("CMD", "{} failed: {}", name, e);
            Err(e.to_string())
        }
    }
}

/// Page numbers and sizes arrive as signed integers; anything below one
/// becomes one.
fn coerce_positive(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

// ============================================================================
// LOADING
// ============================================================================

/// Hand a freshly fetched collection to a screen. The first load builds the
/// engine from the screen config and the remembered preferences; later loads
/// keep the user's search, filters and sort.
pub fn load_screen_records(
    state: &AppState,
    module_name: &str,
    records: Vec<Record>,
) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "load_screen_records", "module={} records={}", module_name, records.len());
    let result = load_records_inner(state, module_name, records);
    command_result("load_screen_records", result)
}

fn load_records_inner(
    state: &AppState,
    module_name: &str,
    records: Vec<Record>,
) -> Result<ScreenView, DashboardError> {
    let screen = state.config.screen(module_name)?;
    let now = Utc::now();
    {
        let mut loaded_at = state.loaded_at.lock()?;
        loaded_at.insert(module_name.to_string(), now);
    }

    let mut screens = state.screens.lock()?;
    let engine = match screens.entry(module_name.to_string()) {
        std::collections::hash_map::Entry::Occupied(entry) => {
            let engine = entry.into_mut();
            engine.set_records(records);
            engine
        }
        std::collections::hash_map::Entry::Vacant(entry) => {
            let mut engine = DataTableEngine::new(records, screen.to_table_config());
            if let Some(prefs) = state.preferences.load(module_name) {
                log_debug!("CMD", "applying preferences for {}: {:?}", module_name, prefs);
                if let Some(page_size) = prefs.page_size {
                    engine.set_page_size(page_size);
                }
                if prefs.sort.is_some() {
                    engine.set_sort_state(prefs.sort);
                }
            }
            entry.insert(engine)
        }
    };

    let view = engine.view();
    Ok(ScreenView::from_view(module_name, &view, Some(now.to_rfc3339())))
}

pub fn get_screen_view(state: &AppState, module_name: &str) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "get_screen_view", "module={}", module_name);
    command_result("get_screen_view", with_screen(state, module_name, |_| {}))
}

pub fn list_screens(state: &AppState) -> Result<Vec<ScreenSummary>, String> {
    let screens = state.screens.lock().map_err(|e| e.to_string())?;
    Ok(state
        .config
        .screens
        .iter()
        .map(|screen| {
            let engine = screens.get(&screen.module_name);
            ScreenSummary {
                module_name: screen.module_name.clone(),
                endpoint: screen.endpoint.clone(),
                loaded: engine.is_some(),
                record_count: engine.map(|e| e.records().len()).unwrap_or(0),
                filtered_count: engine.map(|e| e.filtered_count()).unwrap_or(0),
            }
        })
        .collect())
}

// ============================================================================
// SEARCH AND FILTERS
// ============================================================================

pub fn set_search_term(state: &AppState, module_name: &str, term: &str) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_search_term", "module={} term={:?}", module_name, term);
    let result = with_screen(state, module_name, |engine| engine.set_search_term(term));
    command_result("set_search_term", result)
}

pub fn set_filter(
    state: &AppState,
    module_name: &str,
    field: &str,
    values: Vec<String>,
) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_filter", "module={} field={} values={:?}", module_name, field, values);
    let field = canonical_field_name(field);
    let result = with_screen(state, module_name, |engine| engine.set_filter(field, values));
    command_result("set_filter", result)
}

pub fn set_filters(
    state: &AppState,
    module_name: &str,
    updates: Vec<FilterUpdate>,
) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_filters", "module={} updates={}", module_name, updates.len());
    let updates: Vec<(String, Vec<String>)> = updates
        .into_iter()
        .map(|u| (canonical_field_name(&u.field), u.values))
        .collect();
    let result = with_screen(state, module_name, |engine| engine.set_filters(updates));
    command_result("set_filters", result)
}

pub fn toggle_filter_value(
    state: &AppState,
    module_name: &str,
    field: &str,
    value: &str,
) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "toggle_filter_value", "module={} field={} value={}", module_name, field, value);
    let field = canonical_field_name(field);
    let result = with_screen(state, module_name, |engine| engine.toggle_filter_value(field, value));
    command_result("toggle_filter_value", result)
}

pub fn clear_filter(state: &AppState, module_name: &str, field: &str) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "clear_filter", "module={} field={}", module_name, field);
    let field = canonical_field_name(field);
    let result = with_screen(state, module_name, |engine| engine.clear_filter(&field));
    command_result("clear_filter", result)
}

pub fn clear_all_filters(state: &AppState, module_name: &str) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "clear_all_filters", "module={}", module_name);
    let result = with_screen(state, module_name, |engine| engine.clear_all_filters());
    command_result("clear_all_filters", result)
}

// ============================================================================
// SORT AND PAGING
// ============================================================================

/// Sort by `key`, toggling direction when it is already the sort key. The
/// resulting sort is remembered for the screen, while the screen lock is
/// still held so the stored sort always matches the engine's.
pub fn set_sort(state: &AppState, module_name: &str, key: &str) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_sort", "module={} key={}", module_name, key);
    let key = canonical_field_name(key);
    let result = with_screen(state, module_name, |engine| {
        engine.set_sort(key);
        let sort = engine.sort().cloned();
        state.preferences.update(module_name, &|prefs| prefs.sort = sort.clone());
    });
    command_result("set_sort", result)
}

pub fn set_page(state: &AppState, module_name: &str, page: i64) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_page", "module={} page={}", module_name, page);
    let page = coerce_positive(page);
    let result = with_screen(state, module_name, |engine| engine.set_page(page));
    command_result("set_page", result)
}

/// Change the page size; remembered for the screen.
pub fn set_page_size(state: &AppState, module_name: &str, page_size: i64) -> Result<ScreenView, String> {
    log_enter_info!("CMD", "set_page_size", "module={} page_size={}", module_name, page_size);
    let page_size = coerce_positive(page_size);
    let result = with_screen(state, module_name, |engine| {
        engine.set_page_size(page_size);
        let stored = engine.page_size();
        state
            .preferences
            .update(module_name, &|prefs| prefs.page_size = Some(stored));
    });
    command_result("set_page_size", result)
}
