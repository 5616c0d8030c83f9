//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use moodmorph_core::ports::{InsightService, KeyValueStorage};
use moodmorph_core::{Calendars, EntryStore, FilterState, Locale};
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    /// The single source of truth for journal entries.
    pub store: Mutex<EntryStore>,
    /// The active locale, search text and selected day.
    pub view: RwLock<FilterState>,
    pub calendars: Calendars,
    pub insight: Arc<dyn InsightService>,
}

impl AppState {
    /// Loads the entry store from `storage` and starts with an empty view in
    /// the configured default locale.
    pub fn new(
        config: &Config,
        storage: Arc<dyn KeyValueStorage>,
        insight: Arc<dyn InsightService>,
    ) -> Self {
        Self {
            store: Mutex::new(EntryStore::load(storage)),
            view: RwLock::new(FilterState::new(config.default_locale)),
            calendars: config.calendars(),
            insight,
        }
    }

    pub async fn locale(&self) -> Locale {
        self.view.read().await.locale
    }
}
