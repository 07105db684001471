use std::str::FromStr;

use crate::domain::logging::LogComponent;
use crate::domain::market_data::{FilterKind, PreferenceRepository, SortState};
use crate::{log_debug, log_warn};

pub const FILTER_KEY: &str = "cryptoFilter";
pub const SEARCH_KEY: &str = "cryptoSearch";
pub const SORT_KEY: &str = "cryptoSort";

/// Fail-soft view preference store. Nothing here returns an error: read failures become
/// defaults and write failures are dropped, both with a log line.
pub struct ViewPreferences {
    repository: Box<dyn PreferenceRepository>,
}

impl ViewPreferences {
    pub fn new(repository: Box<dyn PreferenceRepository>) -> Self {
        Self { repository }
    }

    /// Raw slot value, or `default` when missing or unreadable.
    pub fn load(&self, key: &str, default: &str) -> String {
        self.read(key).unwrap_or_else(|| default.to_string())
    }

    pub fn save(&self, key: &str, value: &str) {
        if let Err(e) = self.repository.write(key, value) {
            log_warn!(LogComponent::Application("Preferences"), "Failed to save '{key}': {e}");
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.repository.read(key) {
            Ok(value) => value,
            Err(e) => {
                log_warn!(LogComponent::Application("Preferences"), "Failed to load '{key}': {e}");
                None
            }
        }
    }

    pub fn load_filter(&self) -> FilterKind {
        match self.read(FILTER_KEY) {
            Some(raw) => FilterKind::from_str(&raw).unwrap_or_else(|_| {
                log_warn!(
                    LogComponent::Application("Preferences"),
                    "Ignoring unknown filter preference '{raw}'"
                );
                FilterKind::default()
            }),
            None => FilterKind::default(),
        }
    }

    pub fn load_search(&self) -> String {
        self.load(SEARCH_KEY, "")
    }

    pub fn load_sort(&self) -> SortState {
        match self.read(SORT_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log_warn!(
                    LogComponent::Application("Preferences"),
                    "Ignoring unreadable sort preference: {e}"
                );
                SortState::default()
            }),
            None => SortState::default(),
        }
    }

    pub fn save_filter(&self, filter: FilterKind) {
        self.save(FILTER_KEY, filter.as_ref());
    }

    pub fn save_search(&self, term: &str) {
        self.save(SEARCH_KEY, term);
    }

    pub fn save_sort(&self, sort: SortState) {
        match serde_json::to_string(&sort) {
            Ok(json) => {
                log_debug!(LogComponent::Application("Preferences"), "Saving sort {json}");
                self.save(SORT_KEY, &json);
            }
            Err(e) => {
                log_warn!(LogComponent::Application("Preferences"), "Failed to encode sort: {e}");
            }
        }
    }
}
