//! FILENAME: app/src/preferences.rs
// PURPOSE: Remembered per-screen UI preferences (page size, sort).
// CONTEXT: Keyed by the screen's module name. Only an in-process store is
//          provided; a caller wanting cross-session memory plugs in its own
//          `PreferenceStore`.

use datatable_engine::SortState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortState>,
}

pub trait PreferenceStore: Send + Sync {
    fn load(&self, module_name: &str) -> Option<ScreenPreferences>;
    fn save(&self, module_name: &str, preferences: ScreenPreferences);

    /// Read-modify-write helper.
    fn update(&self, module_name: &str, apply: &dyn Fn(&mut ScreenPreferences)) {
        let mut prefs = self.load(module_name).unwrap_or_default();
        apply(&mut prefs);
        self.save(module_name, prefs);
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, ScreenPreferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, module_name: &str) -> Option<ScreenPreferences> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(module_name).cloned())
    }

    fn save(&self, module_name: &str, preferences: ScreenPreferences) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(module_name.to_string(), preferences);
        }
    }

    /// Read-modify-write under a single lock.
    fn update(&self, module_name: &str, apply: &dyn Fn(&mut ScreenPreferences)) {
        if let Ok(mut entries) = self.entries.lock() {
            apply(entries.entry(module_name.to_string()).or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_merges_into_existing_entry() {
        let store = MemoryPreferenceStore::new();
        store.update("fields", &|p| p.page_size = Some(50));
        store.update("fields", &|p| p.sort = Some(SortState::ascending("name")));

        let prefs = store.load("fields").unwrap();
        assert_eq!(prefs.page_size, Some(50));
        assert_eq!(prefs.sort, Some(SortState::ascending("name")));
        assert!(store.load("tables").is_none());
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = MemoryPreferenceStore::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        store.update("fields", &|p| {
                            p.page_size = Some(p.page_size.unwrap_or(0) + 1);
                        });
                    }
                });
            }
        });
        assert_eq!(store.load("fields").unwrap().page_size, Some(800));
    }
}
